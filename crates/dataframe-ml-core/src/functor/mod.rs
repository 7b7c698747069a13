//! Functor contracts shared by the visitors.
//!
//! - Distance functors: any `Fn(&T, &T) -> f64`, taken by value when a visitor
//!   is constructed. The `Fn` bound keeps them free of mutable state, so a
//!   single functor can be called from any number of places at once.
//! - Kernel functors: the closed [`MeanShiftKernel`] set used by mean shift.

mod distance;
mod kernel;

pub use distance::{absolute_distance, squared_distance, SquaredDistance};
pub use kernel::MeanShiftKernel;
