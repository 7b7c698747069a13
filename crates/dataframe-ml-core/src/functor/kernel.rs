//! Kernel shapes for mean-shift mode seeking.
//!
//! Each kernel maps a distance to a non-negative weight. Bounded kernels are
//! zero for distances greater than 1.

use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_2, FRAC_PI_4};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::VisitorError;

/// Kernel shape used to weight neighbours in mean shift.
///
/// Selected once at construction; evaluation is an exhaustive match.
///
/// # Example
///
/// ```
/// use dataframe_ml_core::functor::MeanShiftKernel;
///
/// let kernel: MeanShiftKernel = "triangular".parse().unwrap();
/// assert_eq!(kernel.weight(0.25), 0.75);
/// assert_eq!(MeanShiftKernel::default(), MeanShiftKernel::Gaussian);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeanShiftKernel {
    /// 1 inside the unit distance.
    Uniform,
    /// 1 - |d|.
    Triangular,
    /// 1 - d^2 (Epanechnikov).
    Parabolic,
    /// (1 - d^2)^2.
    Biweight,
    /// (1 - d^2)^3.
    Triweight,
    /// (1 - d^3)^3.
    Tricube,
    /// exp(-d^2 / 2).
    #[default]
    Gaussian,
    /// cos(pi d / 2).
    Cosine,
    /// 1 / (2 + e^d + e^-d).
    Logistic,
    /// 1 / (e^d + e^-d).
    Sigmoid,
    /// exp(-x) sin(x + pi/4) with x = |d| / sqrt(2).
    Silverman,
}

impl MeanShiftKernel {
    /// Every kernel shape, in declaration order.
    pub const ALL: [MeanShiftKernel; 11] = [
        MeanShiftKernel::Uniform,
        MeanShiftKernel::Triangular,
        MeanShiftKernel::Parabolic,
        MeanShiftKernel::Biweight,
        MeanShiftKernel::Triweight,
        MeanShiftKernel::Tricube,
        MeanShiftKernel::Gaussian,
        MeanShiftKernel::Cosine,
        MeanShiftKernel::Logistic,
        MeanShiftKernel::Sigmoid,
        MeanShiftKernel::Silverman,
    ];

    /// Weight assigned to a neighbour at distance `d`.
    #[inline]
    pub fn weight(self, d: f64) -> f64 {
        let inside = d <= 1.0;
        match self {
            MeanShiftKernel::Uniform => {
                if inside {
                    1.0
                } else {
                    0.0
                }
            }
            MeanShiftKernel::Triangular => {
                if inside {
                    1.0 - d.abs()
                } else {
                    0.0
                }
            }
            MeanShiftKernel::Parabolic => {
                if inside {
                    1.0 - d * d
                } else {
                    0.0
                }
            }
            MeanShiftKernel::Biweight => {
                let x = 1.0 - d * d;
                if inside {
                    x * x
                } else {
                    0.0
                }
            }
            MeanShiftKernel::Triweight => {
                let x = 1.0 - d * d;
                if inside {
                    x * x * x
                } else {
                    0.0
                }
            }
            MeanShiftKernel::Tricube => {
                let x = 1.0 - d * d * d;
                if inside {
                    x * x * x
                } else {
                    0.0
                }
            }
            MeanShiftKernel::Gaussian => (-0.5 * d * d).exp(),
            MeanShiftKernel::Cosine => {
                if inside {
                    (FRAC_PI_2 * d).cos()
                } else {
                    0.0
                }
            }
            MeanShiftKernel::Logistic => 1.0 / (2.0 + d.exp() + (-d).exp()),
            MeanShiftKernel::Sigmoid => 1.0 / (d.exp() + (-d).exp()),
            MeanShiftKernel::Silverman => {
                let x = FRAC_1_SQRT_2 * d.abs();
                (-x).exp() * (x + FRAC_PI_4).sin()
            }
        }
    }

    /// Configuration name of the kernel.
    pub fn name(self) -> &'static str {
        match self {
            MeanShiftKernel::Uniform => "uniform",
            MeanShiftKernel::Triangular => "triangular",
            MeanShiftKernel::Parabolic => "parabolic",
            MeanShiftKernel::Biweight => "biweight",
            MeanShiftKernel::Triweight => "triweight",
            MeanShiftKernel::Tricube => "tricube",
            MeanShiftKernel::Gaussian => "gaussian",
            MeanShiftKernel::Cosine => "cosine",
            MeanShiftKernel::Logistic => "logistic",
            MeanShiftKernel::Sigmoid => "sigmoid",
            MeanShiftKernel::Silverman => "silverman",
        }
    }
}

impl fmt::Display for MeanShiftKernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MeanShiftKernel {
    type Err = VisitorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        MeanShiftKernel::ALL
            .iter()
            .copied()
            .find(|kernel| kernel.name() == wanted)
            .ok_or_else(|| {
                VisitorError::invalid_parameter(format!("unknown mean-shift kernel '{}'", s))
            })
    }
}
