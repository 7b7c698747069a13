//! Configuration shared across visitors.
//!
//! Per-algorithm configuration lives next to each algorithm
//! (see [`crate::clustering`]). This module holds the named constants and the
//! parallel-dispatch settings consumed by [`crate::parallel::ParallelGate`].

pub mod constants;
mod parallel;

pub use parallel::ParallelConfig;
