//! Named constants used by the visitors.
//!
//! Magic numbers that change observable output are kept here so that tests
//! and callers refer to the same values.

/// Clustering constants.
pub mod clustering {
    /// Default damping factor for affinity propagation message updates.
    pub const DEFAULT_DAMPING_FACTOR: f64 = 0.9;

    /// Default number of affinity propagation rounds.
    pub const DEFAULT_AFFINITY_ITERATIONS: usize = 200;

    /// Default K-means iteration cap.
    pub const DEFAULT_KMEANS_ITERATIONS: usize = 100;

    /// K-means stops once no centroid moves by more than this under the
    /// configured distance function.
    pub const CENTROID_CONVERGENCE_EPSILON: f64 = 1e-7;

    /// Default mean-shift iteration cap.
    pub const DEFAULT_MEAN_SHIFT_ITERATIONS: usize = 50;

    /// Mean-shift neighbourhood radius as a multiple of the kernel bandwidth.
    pub const MEAN_SHIFT_SEARCH_RADIUS_FACTOR: f64 = 3.0;
}

/// Parallel dispatch constants.
pub mod parallel {
    /// Minimum sequence length before work is split across the pool.
    pub const MIN_PARALLEL_LEN: usize = 150_000;

    /// The concurrency level must exceed this floor for parallel dispatch.
    pub const MIN_THREAD_LEVEL: usize = 2;
}
