//! Parallel dispatch settings.

use serde::{Deserialize, Serialize};

use crate::error::{require_nonzero, VisitorResult};

use super::constants::parallel::MIN_PARALLEL_LEN;

/// Settings for the parallel execution gate.
///
/// # Example
///
/// ```
/// use dataframe_ml_core::config::ParallelConfig;
///
/// let config = ParallelConfig::default().with_thread_level(4);
/// assert_eq!(config.thread_level, Some(4));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParallelConfig {
    /// Concurrency level override.
    ///
    /// `None` uses the thread count of the pool the gate dispatches to.
    pub thread_level: Option<usize>,

    /// Minimum sequence length before a loop is split into chunks.
    pub min_parallel_len: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            thread_level: None,
            min_parallel_len: MIN_PARALLEL_LEN,
        }
    }
}

impl ParallelConfig {
    /// Force a concurrency level instead of asking the pool.
    #[must_use]
    pub fn with_thread_level(mut self, level: usize) -> Self {
        self.thread_level = Some(level);
        self
    }

    /// Set the minimum length for parallel dispatch.
    #[must_use]
    pub fn with_min_parallel_len(mut self, len: usize) -> Self {
        self.min_parallel_len = len;
        self
    }

    /// Validate settings.
    ///
    /// # Errors
    ///
    /// Returns `VisitorError::InvalidParameter` if the thread-level override
    /// or the minimum parallel length is zero.
    pub fn validate(&self) -> VisitorResult<()> {
        if let Some(level) = self.thread_level {
            require_nonzero("thread_level", level)?;
        }
        require_nonzero("min_parallel_len", self.min_parallel_len)
    }
}
