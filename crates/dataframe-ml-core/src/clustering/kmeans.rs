//! K-means (Lloyd's algorithm) over a single column.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::column::{effective_len, ColumnValue};
use crate::config::constants::clustering::CENTROID_CONVERGENCE_EPSILON;
use crate::error::{VisitorError, VisitorResult};
use crate::functor::{squared_distance, SquaredDistance};
use crate::visitor::ColumnVisitor;

use super::config::KMeansConfig;
use super::nearest;
use super::types::ClusterPartition;

/// K-means with `K` centroids.
///
/// Centroids are seeded from `K` independently sampled positions (collisions
/// allowed). Each round assigns every non-missing point to its nearest
/// centroid and moves each centroid to the mean of its members. The run stops
/// once no centroid moves by more than `1e-7` under the distance functor, or
/// after `max_iterations` rounds.
///
/// A centroid only moves when the move exceeds that epsilon. A centroid that
/// attracts no points in a round is pulled to `T::default()`, the mean of an
/// empty sum. A centroid seeded from a missing sample starts at
/// `T::default()`.
///
/// # Example
///
/// ```
/// use dataframe_ml_core::clustering::{KMeansConfig, KMeansVisitor};
/// use dataframe_ml_core::visitor::ColumnVisitor;
///
/// let column = [0.0, 0.0, 1.0, 10.0, 11.0, 10.0];
/// let index: Vec<usize> = (0..column.len()).collect();
///
/// let mut visitor =
///     KMeansVisitor::<2, f64>::new(KMeansConfig::default().with_seed(7)).unwrap();
/// visitor.apply(&index, &column).unwrap();
///
/// let mut centroids = *visitor.result();
/// centroids.sort_by(|a, b| a.total_cmp(b));
/// assert!((centroids[0] - 1.0 / 3.0).abs() < 0.5);
/// assert!((centroids[1] - 31.0 / 3.0).abs() < 0.5);
/// ```
#[derive(Debug, Clone)]
pub struct KMeansVisitor<const K: usize, T, D = SquaredDistance<T>> {
    config: KMeansConfig,
    distance: D,
    centroids: [T; K],
    clusters: ClusterPartition,
    iterations: usize,
    converged: bool,
}

impl<const K: usize, T: ColumnValue> KMeansVisitor<K, T> {
    /// Create a visitor using squared difference as distance.
    ///
    /// # Errors
    ///
    /// Returns `VisitorError::InvalidParameter` if `K` is zero or the
    /// configuration is invalid.
    pub fn new(config: KMeansConfig) -> VisitorResult<Self> {
        Self::with_distance(config, squared_distance::<T>)
    }
}

impl<const K: usize, T, D> KMeansVisitor<K, T, D>
where
    T: ColumnValue,
    D: Fn(&T, &T) -> f64,
{
    /// Create a visitor with a custom distance functor.
    ///
    /// # Errors
    ///
    /// Returns `VisitorError::InvalidParameter` if `K` is zero or the
    /// configuration is invalid.
    pub fn with_distance(config: KMeansConfig, distance: D) -> VisitorResult<Self> {
        if K == 0 {
            return Err(VisitorError::invalid_parameter(
                "cluster count K must be > 0",
            ));
        }
        config.validate()?;
        Ok(Self {
            config,
            distance,
            centroids: [T::default(); K],
            clusters: ClusterPartition::new(),
            iterations: 0,
            converged: false,
        })
    }

    /// Configuration in use.
    pub fn config(&self) -> &KMeansConfig {
        &self.config
    }

    /// Per-centroid membership from the last run.
    ///
    /// Cluster `c` holds the positions nearest to `result()[c]`. Empty when
    /// `calc_clusters` is off.
    pub fn clusters(&self) -> &ClusterPartition {
        &self.clusters
    }

    /// Rounds performed by the last run.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// True if the last run stopped because the centroids settled.
    pub fn converged(&self) -> bool {
        self.converged
    }

    /// Run K-means drawing the initial centroids from `rng`.
    ///
    /// # Errors
    ///
    /// Returns `VisitorError::InsufficientData` if the column is empty.
    pub fn apply_with_rng<I, R>(
        &mut self,
        index: &[I],
        column: &[T],
        rng: &mut R,
    ) -> VisitorResult<()>
    where
        R: Rng + ?Sized,
    {
        self.clear();
        let n = effective_len(index, column);
        if n == 0 {
            return Err(VisitorError::insufficient_data(1, 0));
        }
        let column = &column[..n];

        for centroid in self.centroids.iter_mut() {
            let sample = column[rng.gen_range(0..n)];
            if !sample.is_missing() {
                *centroid = sample;
            }
        }

        let mut sums = [T::default(); K];
        let mut counts = [0usize; K];
        for round in 0..self.config.max_iterations {
            self.iterations = round + 1;
            sums.fill(T::default());
            counts.fill(0);

            for value in column.iter().filter(|v| !v.is_missing()) {
                if let Some(c) = nearest(value, &self.centroids, &self.distance) {
                    sums[c] = sums[c].plus(*value);
                    counts[c] += 1;
                }
            }

            let mut max_shift = 0.0f64;
            let mut settled = true;
            for c in 0..K {
                // An empty cluster's sum is T::default(), so it moves there.
                let updated = sums[c].divided(counts[c].max(1) as f64);
                let shift = (self.distance)(&updated, &self.centroids[c]);
                if shift.is_nan() || shift > CENTROID_CONVERGENCE_EPSILON {
                    settled = false;
                    self.centroids[c] = updated;
                }
                max_shift = max_shift.max(shift);
            }

            tracing::trace!(round = self.iterations, max_shift, "K-means round complete");

            if settled {
                self.converged = true;
                break;
            }
        }

        if self.config.calc_clusters {
            let mut members = vec![Vec::new(); K];
            for (p, value) in column.iter().enumerate() {
                if value.is_missing() {
                    continue;
                }
                if let Some(c) = nearest(value, &self.centroids, &self.distance) {
                    members[c].push(p);
                }
            }
            self.clusters = ClusterPartition::from_clusters(members);
        }

        tracing::debug!(
            n,
            k = K,
            iterations = self.iterations,
            converged = self.converged,
            "K-means complete"
        );
        Ok(())
    }

    fn clear(&mut self) {
        self.centroids = [T::default(); K];
        self.clusters.clear();
        self.iterations = 0;
        self.converged = false;
    }
}

impl<const K: usize, T, D> ColumnVisitor<T> for KMeansVisitor<K, T, D>
where
    T: ColumnValue,
    D: Fn(&T, &T) -> f64,
{
    type Output = [T; K];

    fn reset(&mut self) {
        self.clear();
    }

    fn apply<I>(&mut self, index: &[I], column: &[T]) -> VisitorResult<()> {
        let mut rng = match self.config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        self.apply_with_rng(index, column, &mut rng)
    }

    /// Final centroids.
    fn result(&self) -> &[T; K] {
        &self.centroids
    }
}
