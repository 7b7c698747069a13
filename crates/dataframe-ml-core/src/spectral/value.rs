//! Element types accepted by the spectral transform.

use std::fmt::Debug;

use num_complex::Complex;
use num_traits::{Float, FloatConst};

/// Real scalar type the transform computes in.
pub trait FftReal: Float + FloatConst + Default + Debug + Send + Sync + 'static {
    /// Convert a length or table index.
    fn from_usize(value: usize) -> Self;
}

impl FftReal for f32 {
    #[inline]
    fn from_usize(value: usize) -> Self {
        value as f32
    }
}

impl FftReal for f64 {
    #[inline]
    fn from_usize(value: usize) -> Self {
        value as f64
    }
}

/// Column element that can be lifted into the complex plane.
///
/// Real values get a zero imaginary part; complex values pass through.
pub trait SpectralValue: Copy + Send + Sync {
    /// Scalar type of the lifted value.
    type Real: FftReal;

    /// Lift the value to a complex number.
    fn to_complex(self) -> Complex<Self::Real>;
}

impl<R: FftReal> SpectralValue for Complex<R> {
    type Real = R;

    #[inline]
    fn to_complex(self) -> Complex<R> {
        self
    }
}

macro_rules! impl_real_spectral_value {
    ($($t:ty),*) => {$(
        impl SpectralValue for $t {
            type Real = $t;

            #[inline]
            fn to_complex(self) -> Complex<$t> {
                Complex::new(self, 0.0)
            }
        }
    )*};
}

impl_real_spectral_value!(f32, f64);
