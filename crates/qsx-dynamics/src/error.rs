//! Error types for the dynamics crate.

use thiserror::Error;

/// Errors produced by operator algebra and time evolution.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DynamicsError {
    /// An operator matrix is not square.
    #[error("Operator must be square, got {rows}x{cols}")]
    NotSquare {
        /// Number of rows.
        rows: usize,
        /// Number of columns.
        cols: usize,
    },

    /// Two objects that must act on the same space do not.
    #[error("Dimension mismatch in {context}: expected {expected}, got {got}")]
    DimensionMismatch {
        /// What was being combined.
        context: &'static str,
        /// Expected dimension.
        expected: usize,
        /// Actual dimension.
        got: usize,
    },

    /// Basis index outside the space.
    #[error("Basis index {index} out of range for dimension {dim}")]
    BasisOutOfRange {
        /// Requested index.
        index: usize,
        /// Space dimension.
        dim: usize,
    },

    /// No output times were requested.
    #[error("Time list is empty")]
    EmptyTimes,

    /// Output times must be non-decreasing.
    #[error("Time list is not sorted at index {index} ({prev} > {next})")]
    UnsortedTimes {
        /// Index of the first out-of-order entry.
        index: usize,
        /// The earlier time.
        prev: f64,
        /// The offending time.
        next: f64,
    },

    /// The state has zero norm and cannot be normalised.
    #[error("State has zero norm")]
    ZeroNorm,

    /// Solver options are out of range.
    #[error("Invalid solver options: {0}")]
    InvalidOptions(String),

    /// An expectation series was requested that the solver never computed.
    #[error("No expectation series {index}, only {count} computed")]
    MissingExpectation {
        /// Requested series.
        index: usize,
        /// Number of expectation operators given to the solver.
        count: usize,
    },
}

/// Result type for dynamics operations.
pub type DynamicsResult<T> = Result<T, DynamicsError>;
