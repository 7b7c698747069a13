//! Mean-shift mode seeking over a single column.

use crate::column::{effective_len, ColumnValue};
use crate::config::constants::clustering::MEAN_SHIFT_SEARCH_RADIUS_FACTOR;
use crate::error::VisitorResult;
use crate::functor::{squared_distance, SquaredDistance};
use crate::visitor::ColumnVisitor;

use super::config::MeanShiftConfig;
use super::types::ClusterPartition;

/// Mean shift with a configurable kernel.
///
/// Every point starts at its own value and is repeatedly moved to the
/// kernel-weighted mean of the column values within
/// `3 * bandwidth` of its current position. A point stops moving once a
/// candidate position lies within `max_distance` of the point's original
/// value; the candidate is then discarded. Shifting ends when every point has
/// stopped or after `max_iterations` rounds.
///
/// Clusters are formed by a single scan in column order: a point joins the
/// first cluster whose centroid lies within `max_distance` of its shifted
/// position, otherwise it opens a new cluster centred on that position.
///
/// If no column value falls within the search radius of a point (zero total
/// kernel weight) the point stops where it is and a warning is logged,
/// instead of moving to a NaN position.
#[derive(Debug, Clone)]
pub struct MeanShiftVisitor<T, D = SquaredDistance<T>> {
    config: MeanShiftConfig,
    distance: D,
    clusters: ClusterPartition,
    centroids: Vec<T>,
    iterations: usize,
}

impl<T: ColumnValue> MeanShiftVisitor<T> {
    /// Create a visitor using squared difference as distance.
    ///
    /// # Errors
    ///
    /// Returns `VisitorError::InvalidParameter` if the configuration is invalid.
    pub fn new(config: MeanShiftConfig) -> VisitorResult<Self> {
        Self::with_distance(config, squared_distance::<T>)
    }
}

impl<T, D> MeanShiftVisitor<T, D>
where
    T: ColumnValue,
    D: Fn(&T, &T) -> f64,
{
    /// Create a visitor with a custom distance functor.
    ///
    /// # Errors
    ///
    /// Returns `VisitorError::InvalidParameter` if the configuration is invalid.
    pub fn with_distance(config: MeanShiftConfig, distance: D) -> VisitorResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            distance,
            clusters: ClusterPartition::new(),
            centroids: Vec::new(),
            iterations: 0,
        })
    }

    /// Configuration in use.
    pub fn config(&self) -> &MeanShiftConfig {
        &self.config
    }

    /// Centroid of each cluster: the shifted position of its first member.
    pub fn centroids(&self) -> &[T] {
        &self.centroids
    }

    /// Shifting rounds performed by the last run.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Kernel-weighted mean of `column` around `position`, or `None` if no
    /// value carries weight.
    fn shifted(&self, column: &[T], position: &T) -> Option<T> {
        let bandwidth = self.config.bandwidth;
        let radius = MEAN_SHIFT_SEARCH_RADIUS_FACTOR * bandwidth;
        let norm = 2.0 * bandwidth * bandwidth;

        let mut weighted = T::default();
        let mut total_weight = 0.0f64;
        for value in column {
            let dist = (self.distance)(position, value);
            if dist <= radius {
                let weight = self.config.kernel.weight(dist) / norm;
                weighted = weighted.plus(value.scaled(weight));
                total_weight += weight;
            }
        }

        if total_weight == 0.0 {
            None
        } else {
            Some(weighted.divided(total_weight))
        }
    }

    fn shift_all(&mut self, column: &[T]) -> Vec<T> {
        let n = column.len();
        let mut shifted: Vec<T> = column.to_vec();
        let mut active = vec![true; n];
        let mut active_count = n;

        while self.iterations < self.config.max_iterations && active_count > 0 {
            self.iterations += 1;
            for p in 0..n {
                if !active[p] {
                    continue;
                }
                match self.shifted(column, &shifted[p]) {
                    None => {
                        tracing::warn!(
                            position = p,
                            value = ?shifted[p],
                            kernel = %self.config.kernel,
                            "Zero total kernel weight; point frozen in place"
                        );
                        active[p] = false;
                        active_count -= 1;
                    }
                    Some(candidate) => {
                        if (self.distance)(&candidate, &column[p]) <= self.config.max_distance {
                            active[p] = false;
                            active_count -= 1;
                        } else {
                            shifted[p] = candidate;
                        }
                    }
                }
            }
            tracing::trace!(
                round = self.iterations,
                active = active_count,
                "Mean-shift round complete"
            );
        }
        shifted
    }
}

impl<T, D> ColumnVisitor<T> for MeanShiftVisitor<T, D>
where
    T: ColumnValue,
    D: Fn(&T, &T) -> f64,
{
    type Output = ClusterPartition;

    fn reset(&mut self) {
        self.clusters.clear();
        self.centroids.clear();
        self.iterations = 0;
    }

    fn apply<I>(&mut self, index: &[I], column: &[T]) -> VisitorResult<()> {
        self.reset();
        let n = effective_len(index, column);
        let column = &column[..n];

        let shifted = self.shift_all(column);

        let mut members: Vec<Vec<usize>> = Vec::new();
        for (p, position) in shifted.iter().enumerate() {
            let home = self.centroids.iter().position(|centroid| {
                (self.distance)(centroid, position) <= self.config.max_distance
            });
            match home {
                Some(c) => members[c].push(p),
                None => {
                    self.centroids.push(*position);
                    members.push(vec![p]);
                }
            }
        }
        self.clusters = ClusterPartition::from_clusters(members);

        tracing::debug!(
            n,
            clusters = self.clusters.len(),
            iterations = self.iterations,
            kernel = %self.config.kernel,
            "Mean shift complete"
        );
        Ok(())
    }

    /// Clusters in order of their first member.
    fn result(&self) -> &ClusterPartition {
        &self.clusters
    }
}
