//! Result types shared by the clustering visitors.

use serde::{Deserialize, Serialize};

/// Clusters reported as positions into the caller's column.
///
/// A partition never owns column values. Resolve members against the column
/// that was passed to `apply` with [`values`](ClusterPartition::values);
/// the positions are meaningless for any other column.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClusterPartition {
    clusters: Vec<Vec<usize>>,
}

impl ClusterPartition {
    /// Create an empty partition.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_clusters(clusters: Vec<Vec<usize>>) -> Self {
        Self { clusters }
    }

    pub(crate) fn clear(&mut self) {
        self.clusters.clear();
    }

    /// Number of clusters.
    #[inline]
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    /// True if the partition holds no clusters.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Positions belonging to cluster `cluster`, in ascending order.
    pub fn members(&self, cluster: usize) -> Option<&[usize]> {
        self.clusters.get(cluster).map(Vec::as_slice)
    }

    /// Iterate over clusters in id order.
    pub fn iter(&self) -> impl Iterator<Item = &[usize]> + '_ {
        self.clusters.iter().map(Vec::as_slice)
    }

    /// Total number of positions across all clusters.
    pub fn total_points(&self) -> usize {
        self.clusters.iter().map(Vec::len).sum()
    }

    /// Resolve the members of `cluster` to values of `column`.
    ///
    /// Positions outside `column` are skipped.
    pub fn values<'a, T>(&self, cluster: usize, column: &'a [T]) -> Option<Vec<&'a T>> {
        self.members(cluster)
            .map(|members| members.iter().filter_map(|&p| column.get(p)).collect())
    }

    /// Cluster id of every position in `0..n`, `None` for unassigned ones.
    pub fn assignments(&self, n: usize) -> Vec<Option<usize>> {
        let mut out = vec![None; n];
        for (cluster, members) in self.clusters.iter().enumerate() {
            for &p in members {
                if let Some(slot) = out.get_mut(p) {
                    *slot = Some(cluster);
                }
            }
        }
        out
    }
}

/// Per-position classification produced by DBSCAN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PointLabel {
    /// Not yet visited.
    #[default]
    Unclassified,
    /// Not density-reachable from any core point.
    Noise,
    /// Member of the cluster with this id.
    Cluster(usize),
}

impl PointLabel {
    /// Cluster id, if the point belongs to a cluster.
    #[inline]
    pub fn cluster_id(self) -> Option<usize> {
        match self {
            PointLabel::Cluster(id) => Some(id),
            _ => None,
        }
    }

    /// True for noise points.
    #[inline]
    pub fn is_noise(self) -> bool {
        self == PointLabel::Noise
    }
}
