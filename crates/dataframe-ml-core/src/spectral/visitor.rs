//! Spectral transform visitor.

use std::sync::OnceLock;

use num_complex::Complex;

use crate::column::effective_len;
use crate::error::VisitorResult;
use crate::parallel::ParallelGate;
use crate::visitor::ColumnVisitor;

use super::engine::{forward_transform, inverse_transform, FftAlgorithm};
use super::value::SpectralValue;

/// Forward or inverse DFT of a column.
///
/// Real columns are lifted to complex values with a zero imaginary part.
/// Magnitude and phase views are computed from the complex result on first
/// access and cached until the next `reset` or `apply`.
///
/// # Example
///
/// ```
/// use dataframe_ml_core::spectral::FftVisitor;
/// use dataframe_ml_core::visitor::ColumnVisitor;
///
/// let column = [1.0, 2.0, 3.0, 4.0];
/// let index = [0u32, 1, 2, 3];
///
/// let mut fft = FftVisitor::<f64>::new(false);
/// fft.apply(&index, &column).unwrap();
/// assert!((fft.result()[0].re - 10.0).abs() < 1e-12);
/// assert!((fft.magnitude()[2] - 2.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct FastFourierTransVisitor<T: SpectralValue> {
    inverse: bool,
    gate: ParallelGate,
    result: Vec<Complex<T::Real>>,
    magnitude: OnceLock<Vec<T::Real>>,
    angle: OnceLock<Vec<T::Real>>,
}

/// Short name for [`FastFourierTransVisitor`].
pub type FftVisitor<T> = FastFourierTransVisitor<T>;

impl<T: SpectralValue> FastFourierTransVisitor<T> {
    /// Create a visitor dispatching through rayon's global pool.
    pub fn new(inverse: bool) -> Self {
        Self::with_gate(inverse, ParallelGate::default())
    }

    /// Create a visitor dispatching through `gate`.
    pub fn with_gate(inverse: bool, gate: ParallelGate) -> Self {
        Self {
            inverse,
            gate,
            result: Vec::new(),
            magnitude: OnceLock::new(),
            angle: OnceLock::new(),
        }
    }

    /// True for the inverse transform.
    pub fn is_inverse(&self) -> bool {
        self.inverse
    }

    /// Gate used for elementwise loops.
    pub fn gate(&self) -> &ParallelGate {
        &self.gate
    }

    /// `|X[k]|` for every element of the result.
    pub fn magnitude(&self) -> &[T::Real] {
        self.magnitude.get_or_init(|| self.derive(|c| c.norm()))
    }

    /// `arg(X[k])` in radians for every element of the result.
    pub fn angle(&self) -> &[T::Real] {
        self.angle.get_or_init(|| self.derive(|c| c.arg()))
    }

    /// Map every element of the result through the gate.
    fn derive<F>(&self, f: F) -> Vec<T::Real>
    where
        F: Fn(Complex<T::Real>) -> T::Real + Send + Sync,
    {
        let result = &self.result;
        let mut view = vec![<T::Real>::default(); result.len()];
        self.gate.for_each_mut(&mut view, |i, v| *v = f(result[i]));
        view
    }
}

impl<T: SpectralValue> ColumnVisitor<T> for FastFourierTransVisitor<T> {
    type Output = [Complex<T::Real>];

    fn reset(&mut self) {
        self.result.clear();
        self.magnitude = OnceLock::new();
        self.angle = OnceLock::new();
    }

    fn apply<I>(&mut self, index: &[I], column: &[T]) -> VisitorResult<()> {
        self.reset();
        let n = effective_len(index, column);
        self.result = column[..n].iter().map(|v| v.to_complex()).collect();

        if self.inverse {
            inverse_transform(&mut self.result, &self.gate);
        } else {
            forward_transform(&mut self.result, &self.gate);
        }

        tracing::debug!(
            n,
            inverse = self.inverse,
            algorithm = %FftAlgorithm::for_len(n),
            parallel = self.gate.is_parallel(n),
            "Spectral transform complete"
        );
        Ok(())
    }

    /// Complex transform, same length as the input.
    fn result(&self) -> &[Complex<T::Real>] {
        &self.result
    }
}
