//! Unsupervised clustering visitors over a single column.
//!
//! # Algorithms
//!
//! - [`KMeansVisitor`]: Lloyd iterations over a compile-time number of
//!   centroids seeded from random positions.
//! - [`AffinityPropVisitor`]: exemplar discovery by responsibility and
//!   availability message passing over a fixed iteration budget.
//! - [`DbscanVisitor`]: density-based expansion with explicit noise labels.
//! - [`MeanShiftVisitor`]: kernel-weighted mode seeking followed by a greedy
//!   sequential merge.
//!
//! All four run on the calling thread. Cluster membership is reported as
//! positions into the caller's column (see [`ClusterPartition`]); values are
//! looked up on demand and never copied into the result.
//!
//! # Missing values
//!
//! Only K-means skips missing (NaN) points. The other visitors feed every
//! position to the distance functor unchanged, so a NaN value never falls
//! within any radius and ends up isolated.

mod affinity;
mod config;
mod dbscan;
mod kmeans;
mod mean_shift;
#[cfg(test)]
mod tests;
mod types;

pub use affinity::AffinityPropVisitor;
pub use config::{AffinityPropConfig, DbscanConfig, KMeansConfig, MeanShiftConfig};
pub use dbscan::DbscanVisitor;
pub use kmeans::KMeansVisitor;
pub use mean_shift::MeanShiftVisitor;
pub use types::{ClusterPartition, PointLabel};

/// Position of the closest candidate to `value`.
///
/// Ties resolve to the earliest candidate. Returns `None` only when
/// `candidates` is empty.
pub(crate) fn nearest<T, D>(value: &T, candidates: &[T], distance: &D) -> Option<usize>
where
    D: Fn(&T, &T) -> f64,
{
    let mut best = None;
    let mut best_dist = f64::INFINITY;
    for (c, candidate) in candidates.iter().enumerate() {
        let dist = distance(value, candidate);
        if best.is_none() || dist < best_dist {
            best = Some(c);
            best_dist = dist;
        }
    }
    best
}
