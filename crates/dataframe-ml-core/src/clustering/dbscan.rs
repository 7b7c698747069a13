//! DBSCAN over a single column.

use std::collections::VecDeque;
use std::marker::PhantomData;

use crate::column::{effective_len, ColumnValue};
use crate::error::VisitorResult;
use crate::functor::{squared_distance, SquaredDistance};
use crate::visitor::ColumnVisitor;

use super::config::DbscanConfig;
use super::types::{ClusterPartition, PointLabel};

/// Density-based clustering with explicit noise.
///
/// A point whose neighbourhood (every position within `max_distance`,
/// itself included) holds at least `min_members` positions is a core point.
/// Clusters grow from core points through a FIFO work queue; points that are
/// not reachable from any core point are reported as noise.
///
/// When a cluster is seeded, the seed is dropped from its own work queue by
/// value equality: the last neighbour equal to the seed's value is removed.
/// With duplicate values that may be a different position than the seed.
/// The seed's label is unaffected, so the partition stays the same, but the
/// seed is then expanded a second time.
#[derive(Debug, Clone)]
pub struct DbscanVisitor<T, D = SquaredDistance<T>> {
    config: DbscanConfig,
    distance: D,
    labels: Vec<PointLabel>,
    clusters: ClusterPartition,
    noise: Vec<usize>,
    _marker: PhantomData<fn(&T)>,
}

impl<T: ColumnValue> DbscanVisitor<T> {
    /// Create a visitor using squared difference as distance.
    ///
    /// # Errors
    ///
    /// Returns `VisitorError::InvalidParameter` if the configuration is invalid.
    pub fn new(config: DbscanConfig) -> VisitorResult<Self> {
        Self::with_distance(config, squared_distance::<T>)
    }
}

impl<T, D> DbscanVisitor<T, D>
where
    T: ColumnValue,
    D: Fn(&T, &T) -> f64,
{
    /// Create a visitor with a custom distance functor.
    ///
    /// # Errors
    ///
    /// Returns `VisitorError::InvalidParameter` if the configuration is invalid.
    pub fn with_distance(config: DbscanConfig, distance: D) -> VisitorResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            distance,
            labels: Vec::new(),
            clusters: ClusterPartition::new(),
            noise: Vec::new(),
            _marker: PhantomData,
        })
    }

    /// Configuration in use.
    pub fn config(&self) -> &DbscanConfig {
        &self.config
    }

    /// Noise positions in ascending order.
    pub fn noise(&self) -> &[usize] {
        &self.noise
    }

    /// Final label of every position.
    pub fn labels(&self) -> &[PointLabel] {
        &self.labels
    }

    fn neighbourhood(&self, column: &[T], point: usize) -> Vec<usize> {
        let center = &column[point];
        column
            .iter()
            .enumerate()
            .filter(|(_, value)| (self.distance)(center, value) <= self.config.max_distance)
            .map(|(p, _)| p)
            .collect()
    }

    fn expand(&mut self, column: &[T], seed: usize, cluster: usize) -> bool {
        let hood = self.neighbourhood(column, seed);
        if hood.len() < self.config.min_members {
            self.labels[seed] = PointLabel::Noise;
            return false;
        }

        for &p in &hood {
            self.labels[p] = PointLabel::Cluster(cluster);
        }

        let mut queue: VecDeque<usize> = hood.into();
        let seed_value = column[seed];
        let self_slot = queue
            .iter()
            .rposition(|&p| column[p] == seed_value)
            .unwrap_or(0);
        queue.remove(self_slot);

        while let Some(p) = queue.pop_front() {
            let hood = self.neighbourhood(column, p);
            if hood.len() < self.config.min_members {
                continue;
            }
            for q in hood {
                if matches!(
                    self.labels[q],
                    PointLabel::Unclassified | PointLabel::Noise
                ) {
                    queue.push_back(q);
                    self.labels[q] = PointLabel::Cluster(cluster);
                }
            }
        }
        true
    }
}

impl<T, D> ColumnVisitor<T> for DbscanVisitor<T, D>
where
    T: ColumnValue,
    D: Fn(&T, &T) -> f64,
{
    type Output = ClusterPartition;

    fn reset(&mut self) {
        self.labels.clear();
        self.clusters.clear();
        self.noise.clear();
    }

    fn apply<I>(&mut self, index: &[I], column: &[T]) -> VisitorResult<()> {
        self.reset();
        let n = effective_len(index, column);
        let column = &column[..n];
        self.labels = vec![PointLabel::Unclassified; n];

        let mut cluster_count = 0;
        for p in 0..n {
            if self.labels[p] != PointLabel::Unclassified {
                continue;
            }
            if self.expand(column, p, cluster_count) {
                cluster_count += 1;
            }
        }

        let mut members = vec![Vec::new(); cluster_count];
        for (p, label) in self.labels.iter().enumerate() {
            match label {
                PointLabel::Cluster(c) => members[*c].push(p),
                PointLabel::Noise => self.noise.push(p),
                PointLabel::Unclassified => {}
            }
        }
        self.clusters = ClusterPartition::from_clusters(members);

        tracing::debug!(
            n,
            clusters = cluster_count,
            noise = self.noise.len(),
            "DBSCAN complete"
        );
        Ok(())
    }

    /// Clusters in discovery order.
    fn result(&self) -> &ClusterPartition {
        &self.clusters
    }
}
