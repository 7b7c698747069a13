//! Distance functors.

use crate::column::ColumnValue;

/// Function-pointer type of the default distance functor.
///
/// Visitors use this as the default for their distance type parameter.
pub type SquaredDistance<T> = fn(&T, &T) -> f64;

/// Squared difference between two column values.
#[inline]
pub fn squared_distance<T: ColumnValue>(x: &T, y: &T) -> f64 {
    x.squared_distance(y)
}

/// Absolute difference between two real values.
#[inline]
pub fn absolute_distance<T: ColumnValue>(x: &T, y: &T) -> f64 {
    x.squared_distance(y).sqrt()
}
