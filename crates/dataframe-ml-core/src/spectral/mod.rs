//! Discrete Fourier transform over a single column.
//!
//! # Algorithms
//!
//! - Power-of-two lengths use iterative radix-2 decimation in time.
//! - Every other length uses Bluestein's chirp-z algorithm: the transform is
//!   rewritten as a convolution and evaluated with radix-2 transforms of the
//!   next power of two at or above `2n + 1`.
//!
//! The inverse transform is always computed as
//! `conj(forward(conj(x))) / n`; there is no separate inverse code path.
//!
//! Elementwise loops (twiddle tables, pointwise products, conjugation and
//! scaling) go through a [`ParallelGate`](crate::parallel::ParallelGate).
//! Butterfly stages always run on the calling thread.

mod engine;
mod value;
mod visitor;

pub use engine::{forward_transform, inverse_transform, FftAlgorithm};
pub use value::{FftReal, SpectralValue};
pub use visitor::{FastFourierTransVisitor, FftVisitor};
