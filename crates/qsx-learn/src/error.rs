//! Error types for the learning crate.

use thiserror::Error;

/// Errors produced while building datasets or training models.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LearnError {
    /// The dataset has no samples.
    #[error("Dataset is empty")]
    EmptyDataset,

    /// Two arrays that must line up do not.
    #[error("Shape mismatch in {context}: expected {expected}, got {got}")]
    ShapeMismatch {
        /// What was being compared.
        context: &'static str,
        /// Expected length.
        expected: usize,
        /// Actual length.
        got: usize,
    },

    /// The test fraction leaves an empty train or test set.
    #[error("Invalid test size {test_size} for {n_samples} samples")]
    InvalidTestSize {
        /// Requested test fraction.
        test_size: f64,
        /// Number of samples available.
        n_samples: usize,
    },

    /// Prediction was requested before `fit`.
    #[error("Model has not been fitted")]
    NotFitted,

    /// A hyper-parameter is out of range.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Result type for learning operations.
pub type LearnResult<T> = Result<T, LearnError>;
