//! Column element contract.
//!
//! Visitors read caller-owned columns as plain slices. The element type only
//! needs the handful of arithmetic operations the clustering algorithms use
//! (sum, scale by a real weight, divide by a real count) plus a predicate for
//! the missing-value sentinel.

use std::fmt::Debug;

use num_complex::Complex;

/// Element type of a column that clustering visitors can operate on.
///
/// Implemented for `f32`, `f64`, `i32`, `i64`, `Complex<f32>` and
/// `Complex<f64>`.
pub trait ColumnValue: Copy + Default + PartialEq + Debug + Send + Sync {
    /// True if the value is the missing-data sentinel (NaN).
    fn is_missing(&self) -> bool;

    /// `self + rhs`.
    fn plus(self, rhs: Self) -> Self;

    /// `self * factor`.
    fn scaled(self, factor: f64) -> Self;

    /// `self / divisor`.
    fn divided(self, divisor: f64) -> Self;

    /// Squared difference `(self - other)^2`, or `|self - other|^2` for
    /// complex values. This is the default distance functor.
    fn squared_distance(&self, other: &Self) -> f64;
}

macro_rules! impl_float_column_value {
    ($($t:ty),*) => {$(
        impl ColumnValue for $t {
            #[inline]
            fn is_missing(&self) -> bool {
                self.is_nan()
            }

            #[inline]
            fn plus(self, rhs: Self) -> Self {
                self + rhs
            }

            #[inline]
            fn scaled(self, factor: f64) -> Self {
                (self as f64 * factor) as $t
            }

            #[inline]
            fn divided(self, divisor: f64) -> Self {
                (self as f64 / divisor) as $t
            }

            #[inline]
            fn squared_distance(&self, other: &Self) -> f64 {
                let diff = *self as f64 - *other as f64;
                diff * diff
            }
        }
    )*};
}

macro_rules! impl_integer_column_value {
    ($($t:ty),*) => {$(
        impl ColumnValue for $t {
            #[inline]
            fn is_missing(&self) -> bool {
                false
            }

            #[inline]
            fn plus(self, rhs: Self) -> Self {
                self.wrapping_add(rhs)
            }

            #[inline]
            fn scaled(self, factor: f64) -> Self {
                (self as f64 * factor) as $t
            }

            #[inline]
            fn divided(self, divisor: f64) -> Self {
                (self as f64 / divisor) as $t
            }

            #[inline]
            fn squared_distance(&self, other: &Self) -> f64 {
                let diff = *self as f64 - *other as f64;
                diff * diff
            }
        }
    )*};
}

macro_rules! impl_complex_column_value {
    ($($t:ty),*) => {$(
        impl ColumnValue for Complex<$t> {
            #[inline]
            fn is_missing(&self) -> bool {
                self.re.is_nan() || self.im.is_nan()
            }

            #[inline]
            fn plus(self, rhs: Self) -> Self {
                self + rhs
            }

            #[inline]
            fn scaled(self, factor: f64) -> Self {
                self * (factor as $t)
            }

            #[inline]
            fn divided(self, divisor: f64) -> Self {
                self / (divisor as $t)
            }

            #[inline]
            fn squared_distance(&self, other: &Self) -> f64 {
                (*self - *other).norm_sqr() as f64
            }
        }
    )*};
}

impl_float_column_value!(f32, f64);
impl_integer_column_value!(i32, i64);
impl_complex_column_value!(f32, f64);

/// Number of positions a visitor processes for an index/column pair.
///
/// The index sequence only takes part in size bookkeeping: the shorter of the
/// two lengths is used and a mismatch is logged.
pub fn effective_len<I, T>(index: &[I], column: &[T]) -> usize {
    if index.len() != column.len() {
        tracing::warn!(
            index_len = index.len(),
            column_len = column.len(),
            "Index and column lengths differ; using the shorter length"
        );
    }
    index.len().min(column.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_missing_sentinel() {
        assert!(f64::NAN.is_missing());
        assert!(!1.5f64.is_missing());
        assert!(f32::NAN.is_missing());
        assert!(!0i64.is_missing());

        println!("[PASS] NaN is the missing sentinel for floats, integers never miss");
    }

    #[test]
    fn test_complex_missing_if_any_component_nan() {
        assert!(Complex::new(f64::NAN, 0.0).is_missing());
        assert!(Complex::new(0.0, f64::NAN).is_missing());
        assert!(!Complex::new(1.0f64, 2.0).is_missing());
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(2.0f64.plus(3.0), 5.0);
        assert_eq!(2.0f64.scaled(1.5), 3.0);
        assert_eq!(9.0f64.divided(3.0), 3.0);
        assert_eq!(7i32.divided(2.0), 3);
        assert_eq!(Complex::new(2.0f64, 4.0).divided(2.0), Complex::new(1.0, 2.0));
    }

    #[test]
    fn test_squared_distance() {
        assert_eq!(3.0f64.squared_distance(&1.0), 4.0);
        assert_eq!(1i64.squared_distance(&4), 9.0);
        let a = Complex::new(0.0f64, 0.0);
        let b = Complex::new(3.0f64, 4.0);
        assert_eq!(a.squared_distance(&b), 25.0);
    }

    #[test]
    fn test_effective_len_uses_shorter() {
        let index = [0u64, 1, 2, 3];
        let column = [1.0f64, 2.0, 3.0];
        assert_eq!(effective_len(&index, &column), 3);
        assert_eq!(effective_len(&index, &[0.0f64; 4]), 4);
    }
}
