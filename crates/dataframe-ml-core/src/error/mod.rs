//! Error types for dataframe-ml-core.
//!
//! Every visitor reports failures through [`VisitorError`]:
//!
//! - Configuration errors are raised by constructors and `validate()` before
//!   any data is touched.
//! - Data errors are raised by `apply` when the column cannot support the
//!   algorithm at all (e.g. seeding centroids from an empty column).
//!
//! Numeric degeneracies (NaN/infinite intermediate values) are not errors.
//! They propagate into the published result rather than aborting the call.
//!
//! # Examples
//!
//! ```rust
//! use dataframe_ml_core::error::{VisitorError, VisitorResult};
//!
//! fn check_radius(radius: f64) -> VisitorResult<()> {
//!     if radius <= 0.0 {
//!         return Err(VisitorError::invalid_parameter(format!(
//!             "radius must be > 0.0, got {}",
//!             radius
//!         )));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_radius(0.0).unwrap_err().is_configuration_error());
//! ```

use thiserror::Error;


/// Errors raised by visitor construction and application.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VisitorError {
    /// A configuration parameter is outside its valid domain.
    ///
    /// # When This Occurs
    ///
    /// - Zero cluster count or zero minimum-neighbour count
    /// - Non-positive or non-finite radius, bandwidth or merge distance
    /// - Zero iteration budget or damping factor outside `[0, 1)`
    #[error("Invalid parameter: {message}")]
    InvalidParameter {
        /// Description of the violated constraint
        message: String,
    },

    /// The column does not hold enough points for the algorithm.
    #[error("Insufficient data: required {required} points, got {actual}")]
    InsufficientData {
        /// Minimum number of points needed
        required: usize,
        /// Number of points supplied
        actual: usize,
    },
}

impl VisitorError {
    /// Create an [`VisitorError::InvalidParameter`] error.
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            message: message.into(),
        }
    }

    /// Create an [`VisitorError::InsufficientData`] error.
    pub fn insufficient_data(required: usize, actual: usize) -> Self {
        Self::InsufficientData { required, actual }
    }

    /// True if the error was caused by the caller's configuration rather
    /// than by the data.
    #[inline]
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, Self::InvalidParameter { .. })
    }
}

/// Result alias used throughout the crate.
pub type VisitorResult<T> = std::result::Result<T, VisitorError>;

/// Reject values that are not strictly positive finite numbers.
pub(crate) fn require_positive(name: &str, value: f64) -> VisitorResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(VisitorError::invalid_parameter(format!(
            "{} must be a finite value > 0.0, got {}",
            name, value
        )));
    }
    Ok(())
}

/// Reject zero counts.
pub(crate) fn require_nonzero(name: &str, value: usize) -> VisitorResult<()> {
    if value == 0 {
        return Err(VisitorError::invalid_parameter(format!(
            "{} must be > 0",
            name
        )));
    }
    Ok(())
}
