//! DataFrame ML Core Library
//!
//! Stateful analytics visitors over dataframe columns: four unsupervised
//! clustering algorithms and a forward/inverse discrete Fourier transform
//! for arbitrary lengths.
//!
//! # Architecture
//!
//! This crate defines:
//! - The visitor lifecycle ([`ColumnVisitor`]): `reset`, a single full-range
//!   `apply`, and a borrowed `result`
//! - Clustering visitors (`KMeansVisitor`, `AffinityPropVisitor`,
//!   `DbscanVisitor`, `MeanShiftVisitor`) reporting membership as positions
//!   into the caller's column
//! - The spectral visitor (`FastFourierTransVisitor`) with radix-2 and
//!   Bluestein kernels
//! - A parallel execution gate over a caller-owned rayon pool
//! - Distance and kernel functors, configuration structures and error types
//!
//! Clustering runs on the calling thread. Only the spectral transform forks
//! work, and it joins before `apply` returns.
//!
//! # Example
//!
//! ```
//! use dataframe_ml_core::clustering::{DbscanConfig, DbscanVisitor};
//! use dataframe_ml_core::visitor::ColumnVisitor;
//!
//! let column = [0.0, 0.5, 1.0, 10.0, 10.5, 11.0, 50.0];
//! let index: Vec<usize> = (0..column.len()).collect();
//!
//! let mut dbscan = DbscanVisitor::<f64>::new(DbscanConfig::new(2, 1.0)).unwrap();
//! dbscan.apply(&index, &column).unwrap();
//!
//! assert_eq!(dbscan.result().len(), 2);
//! assert_eq!(dbscan.noise(), &[6]);
//! ```

pub mod clustering;
pub mod column;
pub mod config;
pub mod error;
pub mod functor;
pub mod parallel;
pub mod spectral;
pub mod visitor;

// Re-exports for convenience
pub use clustering::{
    AffinityPropConfig, AffinityPropVisitor, ClusterPartition, DbscanConfig, DbscanVisitor,
    KMeansConfig, KMeansVisitor, MeanShiftConfig, MeanShiftVisitor, PointLabel,
};
pub use column::ColumnValue;
pub use config::ParallelConfig;
pub use error::{VisitorError, VisitorResult};
pub use functor::MeanShiftKernel;
pub use parallel::ParallelGate;
pub use spectral::{FastFourierTransVisitor, FftVisitor};
pub use visitor::ColumnVisitor;
