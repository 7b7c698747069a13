//! Affinity propagation over a single column.
//!
//! Messages follow Frey & Dueck (2007). Similarity is the negated distance,
//! and every self-similarity (preference) is set to the smallest pairwise
//! similarity in the column. That preference decides how many exemplars
//! emerge; a median preference would produce more.

use crate::column::{effective_len, ColumnValue};
use crate::error::VisitorResult;
use crate::functor::{squared_distance, SquaredDistance};
use crate::visitor::ColumnVisitor;

use super::config::AffinityPropConfig;
use super::nearest;
use super::types::ClusterPartition;

/// Packed upper triangle (diagonal included) of a symmetric `n x n` matrix.
#[derive(Debug)]
struct SymmetricMatrix {
    n: usize,
    data: Vec<f64>,
}

impl SymmetricMatrix {
    fn new(n: usize) -> Self {
        Self {
            n,
            data: vec![0.0; n * (n + 1) / 2],
        }
    }

    #[inline]
    fn offset(&self, i: usize, j: usize) -> usize {
        let (row, col) = if i <= j { (i, j) } else { (j, i) };
        row * (2 * self.n - row + 1) / 2 + (col - row)
    }

    #[inline]
    fn get(&self, i: usize, j: usize) -> f64 {
        self.data[self.offset(i, j)]
    }

    #[inline]
    fn set(&mut self, i: usize, j: usize, value: f64) {
        let at = self.offset(i, j);
        self.data[at] = value;
    }
}

/// Affinity propagation.
///
/// Runs a fixed number of damped responsibility/availability rounds, then
/// reports every position `i` with `r(i,i) + a(i,i) > 0` as an exemplar.
/// Uses `O(n^2)` memory.
#[derive(Debug, Clone)]
pub struct AffinityPropVisitor<T, D = SquaredDistance<T>> {
    config: AffinityPropConfig,
    distance: D,
    exemplars: Vec<usize>,
    clusters: ClusterPartition,
    _marker: std::marker::PhantomData<fn(&T)>,
}

impl<T: ColumnValue> AffinityPropVisitor<T> {
    /// Create a visitor using squared difference as distance.
    ///
    /// # Errors
    ///
    /// Returns `VisitorError::InvalidParameter` if the configuration is invalid.
    pub fn new(config: AffinityPropConfig) -> VisitorResult<Self> {
        Self::with_distance(config, squared_distance::<T>)
    }
}

impl<T, D> AffinityPropVisitor<T, D>
where
    T: ColumnValue,
    D: Fn(&T, &T) -> f64,
{
    /// Create a visitor with a custom distance functor.
    ///
    /// # Errors
    ///
    /// Returns `VisitorError::InvalidParameter` if the configuration is invalid.
    pub fn with_distance(config: AffinityPropConfig, distance: D) -> VisitorResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            distance,
            exemplars: Vec::new(),
            clusters: ClusterPartition::new(),
            _marker: std::marker::PhantomData,
        })
    }

    /// Configuration in use.
    pub fn config(&self) -> &AffinityPropConfig {
        &self.config
    }

    /// Values of the exemplars found by the last run.
    pub fn exemplar_values<'a>(&self, column: &'a [T]) -> Vec<&'a T> {
        self.exemplars
            .iter()
            .filter_map(|&p| column.get(p))
            .collect()
    }

    /// Points grouped by nearest exemplar. Cluster `c` belongs to
    /// `result()[c]`. Empty when `calc_clusters` is off.
    pub fn clusters(&self) -> &ClusterPartition {
        &self.clusters
    }

    fn find_exemplars(&self, column: &[T]) -> Vec<usize> {
        let n = column.len();
        match n {
            0 => return Vec::new(),
            1 => return vec![0],
            _ => {}
        }

        let mut similarity = SymmetricMatrix::new(n);
        let mut preference = f64::INFINITY;
        for i in 0..n {
            for j in (i + 1)..n {
                let s = -(self.distance)(&column[i], &column[j]);
                similarity.set(i, j, s);
                if s < preference {
                    preference = s;
                }
            }
        }
        if preference == f64::INFINITY {
            tracing::warn!(n, "No comparable pair of points; using f64::MAX as preference");
            preference = f64::MAX;
        }
        for i in 0..n {
            similarity.set(i, i, preference);
        }

        let keep = self.config.damping_factor;
        let learn = 1.0 - keep;
        let mut responsibility = vec![0.0f64; n * n];
        let mut availability = vec![0.0f64; n * n];
        let mut positive_sums = vec![0.0f64; n];

        for _ in 0..self.config.iterations {
            // r(i,k) = s(i,k) - max_{k' != k} (s(i,k') + a(i,k'))
            for i in 0..n {
                let row = i * n;
                let mut best = f64::NEG_INFINITY;
                let mut best_k = usize::MAX;
                let mut runner_up = f64::NEG_INFINITY;
                for k in 0..n {
                    let v = similarity.get(i, k) + availability[row + k];
                    if v > best {
                        runner_up = best;
                        best = v;
                        best_k = k;
                    } else if v > runner_up {
                        runner_up = v;
                    }
                }
                for k in 0..n {
                    let competitor = if k == best_k { runner_up } else { best };
                    let r = &mut responsibility[row + k];
                    *r = learn * (similarity.get(i, k) - competitor) + keep * *r;
                }
            }

            for (k, sum) in positive_sums.iter_mut().enumerate() {
                *sum = (0..n)
                    .filter(|&i| i != k)
                    .map(|i| responsibility[i * n + k].max(0.0))
                    .sum();
            }

            for (k, &sum) in positive_sums.iter().enumerate() {
                let a = &mut availability[k * n + k];
                *a = learn * sum + keep * *a;
            }

            // a(i,k) = min(0, r(k,k) + sum_{i' not in {i,k}} max(0, r(i',k)))
            for i in 0..n {
                for k in 0..n {
                    if i == k {
                        continue;
                    }
                    let others = positive_sums[k] - responsibility[i * n + k].max(0.0);
                    let a = &mut availability[i * n + k];
                    *a = learn * (responsibility[k * n + k] + others).min(0.0) + keep * *a;
                }
            }
        }

        (0..n)
            .filter(|&i| responsibility[i * n + i] + availability[i * n + i] > 0.0)
            .collect()
    }
}

impl<T, D> ColumnVisitor<T> for AffinityPropVisitor<T, D>
where
    T: ColumnValue,
    D: Fn(&T, &T) -> f64,
{
    type Output = [usize];

    fn reset(&mut self) {
        self.exemplars.clear();
        self.clusters.clear();
    }

    fn apply<I>(&mut self, index: &[I], column: &[T]) -> VisitorResult<()> {
        self.reset();
        let n = effective_len(index, column);
        let column = &column[..n];

        self.exemplars = self.find_exemplars(column);
        if n > 0 && self.exemplars.is_empty() {
            tracing::warn!(
                n,
                iterations = self.config.iterations,
                "Affinity propagation finished without exemplars"
            );
        }

        if self.config.calc_clusters && !self.exemplars.is_empty() {
            let centers: Vec<T> = self.exemplars.iter().map(|&p| column[p]).collect();
            let mut members = vec![Vec::new(); centers.len()];
            for (p, value) in column.iter().enumerate() {
                if let Some(c) = nearest(value, &centers, &self.distance) {
                    members[c].push(p);
                }
            }
            self.clusters = ClusterPartition::from_clusters(members);
        }

        tracing::debug!(
            n,
            exemplars = self.exemplars.len(),
            iterations = self.config.iterations,
            "Affinity propagation complete"
        );
        Ok(())
    }

    /// Exemplar positions in ascending order.
    fn result(&self) -> &[usize] {
        &self.exemplars
    }
}
