//! Error types for the explorer experiments.

use std::path::PathBuf;

use qsx_dynamics::DynamicsError;
use qsx_ir::IrError;
use qsx_learn::LearnError;
use qsx_sim::SimError;
use thiserror::Error;

/// Errors raised while configuring or running an experiment.
///
/// Engine failures carry the name of the experiment that hit them.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExplorerError {
    /// Building the experiment circuit failed.
    #[error("{experiment} experiment: circuit construction failed")]
    Circuit {
        /// Experiment name.
        experiment: &'static str,
        /// Underlying error.
        #[source]
        source: IrError,
    },

    /// Sampling the circuit failed.
    #[error("{experiment} experiment: simulation failed")]
    Simulation {
        /// Experiment name.
        experiment: &'static str,
        /// Underlying error.
        #[source]
        source: SimError,
    },

    /// Time evolution failed.
    #[error("{experiment} experiment: time evolution failed")]
    Dynamics {
        /// Experiment name.
        experiment: &'static str,
        /// Underlying error.
        #[source]
        source: DynamicsError,
    },

    /// Dataset generation or model training failed.
    #[error("{experiment} experiment: classifier failed")]
    Learn {
        /// Experiment name.
        experiment: &'static str,
        /// Underlying error.
        #[source]
        source: LearnError,
    },

    /// Writing an output file failed.
    #[error("Failed to write {}", path.display())]
    Write {
        /// The file or directory involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Reading a configuration file failed.
    #[error("Failed to read config file {}", path.display())]
    ConfigRead {
        /// The configuration file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A configuration file is not valid YAML for [`crate::ExplorerConfig`].
    #[error("Failed to parse config file {}", path.display())]
    ConfigParse {
        /// The configuration file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_yaml_ng::Error,
    },

    /// A configuration value is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ExplorerError {
    pub(crate) fn circuit(experiment: &'static str) -> impl FnOnce(IrError) -> Self {
        move |source| Self::Circuit { experiment, source }
    }

    pub(crate) fn simulation(experiment: &'static str) -> impl FnOnce(SimError) -> Self {
        move |source| Self::Simulation { experiment, source }
    }

    pub(crate) fn dynamics(experiment: &'static str) -> impl FnOnce(DynamicsError) -> Self {
        move |source| Self::Dynamics { experiment, source }
    }

    pub(crate) fn learn(experiment: &'static str) -> impl FnOnce(LearnError) -> Self {
        move |source| Self::Learn { experiment, source }
    }

    pub(crate) fn write(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Write { path, source }
    }

    /// Name of the experiment that failed, if the error came from an engine.
    pub fn experiment(&self) -> Option<&'static str> {
        match self {
            Self::Circuit { experiment, .. }
            | Self::Simulation { experiment, .. }
            | Self::Dynamics { experiment, .. }
            | Self::Learn { experiment, .. } => Some(experiment),
            _ => None,
        }
    }
}

/// Result type for explorer operations.
pub type ExplorerResult<T> = Result<T, ExplorerError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_engine_errors_name_the_experiment() {
        let err = ExplorerError::simulation("noise")(SimError::ZeroRepetitions);
        assert_eq!(err.experiment(), Some("noise"));
        assert_eq!(err.to_string(), "noise experiment: simulation failed");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_write_error_names_the_path() {
        let err = ExplorerError::write("assets/plots/x.svg")(std::io::Error::other("disk full"));
        assert!(err.to_string().contains("assets/plots/x.svg"));
        assert_eq!(err.experiment(), None);
    }
}
