//! Error types for the simulator.

use thiserror::Error;

/// Errors produced while sampling a circuit.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SimError {
    /// Circuit needs more qubits than the simulator is configured for.
    #[error("Circuit has {got} qubits but simulator only supports {max}")]
    CircuitTooLarge {
        /// Qubits in the circuit.
        got: usize,
        /// Configured limit.
        max: u32,
    },

    /// At least one repetition is required.
    #[error("Repetitions must be at least 1, got 0")]
    ZeroRepetitions,

    /// No measurement was recorded under this key.
    #[error("No measurement recorded under key '{0}'")]
    UnknownKey(String),
}

/// Result type for simulator operations.
pub type SimResult<T> = Result<T, SimError>;
