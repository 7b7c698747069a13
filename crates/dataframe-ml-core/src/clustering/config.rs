//! Configuration for the clustering visitors.
//!
//! Every visitor constructor calls `validate()` and fails fast on an invalid
//! configuration, before any data is touched.

use serde::{Deserialize, Serialize};

use crate::config::constants::clustering::{
    DEFAULT_AFFINITY_ITERATIONS, DEFAULT_DAMPING_FACTOR, DEFAULT_KMEANS_ITERATIONS,
    DEFAULT_MEAN_SHIFT_ITERATIONS,
};
use crate::error::{require_nonzero, require_positive, VisitorError, VisitorResult};
use crate::functor::MeanShiftKernel;

// ============================================================================
// K-means
// ============================================================================

/// Configuration for [`KMeansVisitor`](super::KMeansVisitor).
///
/// The number of clusters is a const generic of the visitor, not a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KMeansConfig {
    /// Upper bound on Lloyd iterations. Must be > 0.
    pub max_iterations: usize,

    /// Materialise per-centroid membership after convergence.
    pub calc_clusters: bool,

    /// Seed for centroid initialisation. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for KMeansConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_KMEANS_ITERATIONS,
            calc_clusters: true,
            seed: None,
        }
    }
}

impl KMeansConfig {
    /// Set the iteration budget.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Enable or disable membership materialisation.
    #[must_use]
    pub fn with_calc_clusters(mut self, calc_clusters: bool) -> Self {
        self.calc_clusters = calc_clusters;
        self
    }

    /// Seed centroid initialisation for reproducible runs.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `VisitorError::InvalidParameter` if `max_iterations` is zero.
    pub fn validate(&self) -> VisitorResult<()> {
        require_nonzero("max_iterations", self.max_iterations)
    }
}

// ============================================================================
// Affinity propagation
// ============================================================================

/// Configuration for [`AffinityPropVisitor`](super::AffinityPropVisitor).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffinityPropConfig {
    /// Number of message-passing rounds. There is no convergence test.
    pub iterations: usize,

    /// Weight of the previous message in each damped update, in `[0, 1)`.
    pub damping_factor: f64,

    /// Assign every point to its nearest exemplar after the last round.
    pub calc_clusters: bool,
}

impl Default for AffinityPropConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_AFFINITY_ITERATIONS,
            damping_factor: DEFAULT_DAMPING_FACTOR,
            calc_clusters: true,
        }
    }
}

impl AffinityPropConfig {
    /// Set the number of rounds.
    #[must_use]
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set the damping factor.
    #[must_use]
    pub fn with_damping_factor(mut self, damping_factor: f64) -> Self {
        self.damping_factor = damping_factor;
        self
    }

    /// Enable or disable exemplar assignment.
    #[must_use]
    pub fn with_calc_clusters(mut self, calc_clusters: bool) -> Self {
        self.calc_clusters = calc_clusters;
        self
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `VisitorError::InvalidParameter` if `iterations` is zero or
    /// `damping_factor` is outside `[0, 1)`.
    pub fn validate(&self) -> VisitorResult<()> {
        require_nonzero("iterations", self.iterations)?;
        if !(0.0..1.0).contains(&self.damping_factor) {
            return Err(VisitorError::invalid_parameter(format!(
                "damping_factor must be in [0.0, 1.0), got {}",
                self.damping_factor
            )));
        }
        Ok(())
    }
}

// ============================================================================
// DBSCAN
// ============================================================================

/// Configuration for [`DbscanVisitor`](super::DbscanVisitor).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DbscanConfig {
    /// Neighbourhood size (self included) that makes a point a core point.
    pub min_members: usize,

    /// Neighbourhood radius under the visitor's distance functor.
    pub max_distance: f64,
}

impl DbscanConfig {
    /// Create a configuration. Call [`validate`](Self::validate) or pass it to
    /// a visitor constructor to check it.
    pub fn new(min_members: usize, max_distance: f64) -> Self {
        Self {
            min_members,
            max_distance,
        }
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `VisitorError::InvalidParameter` if `min_members` is zero or
    /// `max_distance` is not a finite value > 0.
    pub fn validate(&self) -> VisitorResult<()> {
        require_nonzero("min_members", self.min_members)?;
        require_positive("max_distance", self.max_distance)
    }
}

// ============================================================================
// Mean shift
// ============================================================================

/// Configuration for [`MeanShiftVisitor`](super::MeanShiftVisitor).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeanShiftConfig {
    /// Kernel bandwidth. Neighbours are searched within three bandwidths.
    pub bandwidth: f64,

    /// Radius for freezing a shifted point and for merging modes.
    pub max_distance: f64,

    /// Kernel shape.
    #[serde(default)]
    pub kernel: MeanShiftKernel,

    /// Upper bound on shifting rounds.
    #[serde(default = "default_mean_shift_iterations")]
    pub max_iterations: usize,
}

fn default_mean_shift_iterations() -> usize {
    DEFAULT_MEAN_SHIFT_ITERATIONS
}

impl MeanShiftConfig {
    /// Create a configuration with the gaussian kernel and the default
    /// iteration budget.
    pub fn new(bandwidth: f64, max_distance: f64) -> Self {
        Self {
            bandwidth,
            max_distance,
            kernel: MeanShiftKernel::default(),
            max_iterations: DEFAULT_MEAN_SHIFT_ITERATIONS,
        }
    }

    /// Select the kernel shape.
    #[must_use]
    pub fn with_kernel(mut self, kernel: MeanShiftKernel) -> Self {
        self.kernel = kernel;
        self
    }

    /// Set the iteration budget.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `VisitorError::InvalidParameter` if `bandwidth` or
    /// `max_distance` is not a finite value > 0, or `max_iterations` is zero.
    pub fn validate(&self) -> VisitorResult<()> {
        require_positive("bandwidth", self.bandwidth)?;
        require_positive("max_distance", self.max_distance)?;
        require_nonzero("max_iterations", self.max_iterations)
    }
}
