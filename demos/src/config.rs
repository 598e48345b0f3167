//! Explorer configuration.
//!
//! Values are looked up in this order, first match wins:
//! 1. An explicit file passed by the caller (`--config`)
//! 2. `./quantumsim.yaml`
//! 3. `<config dir>/quantumsim/config.yaml`
//! 4. Built-in defaults
//!
//! Missing keys in a file fall back to their defaults, so a file only needs
//! the values it changes:
//!
//! ```yaml
//! seed: 7
//! noise:
//!   kind: dephasing
//! predictor:
//!   n_estimators: 20
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ExplorerError, ExplorerResult};
use crate::experiments::noise::NoiseKind;

/// File name searched for in the working directory.
pub const CONFIG_FILE_NAME: &str = "quantumsim.yaml";

/// Complete explorer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplorerConfig {
    /// Seed shared by the simulator, the dataset, the split and the forest.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Directory the Majorana plot is written to.
    #[serde(default = "default_plot_dir")]
    pub plot_dir: PathBuf,

    /// Log file, appended to on every run.
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,

    /// Majorana dynamics parameters.
    #[serde(default)]
    pub majorana: MajoranaConfig,

    /// Qubit noise sampling.
    #[serde(default)]
    pub noise: NoiseConfig,

    /// Repetition-code sampling.
    #[serde(default)]
    pub error_correction: ErrorCorrectionConfig,

    /// Bell state sampling.
    #[serde(default)]
    pub bell: BellConfig,

    /// Error prediction model.
    #[serde(default)]
    pub predictor: PredictorConfig,
}

/// Parameters of the two-mode Majorana model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MajoranaConfig {
    /// Hopping amplitude `t`.
    #[serde(default = "default_hopping")]
    pub hopping: f64,

    /// Superconducting pairing `Δ`.
    #[serde(default = "default_pairing")]
    pub pairing: f64,

    /// Chemical potential `μ`. Logged with the run; the two-mode
    /// Hamiltonian has no on-site term.
    #[serde(default)]
    pub chemical_potential: f64,

    /// End of the simulated time window.
    #[serde(default = "default_duration")]
    pub duration: f64,

    /// Number of evenly spaced output times in `[0, duration]`.
    #[serde(default = "default_points")]
    pub points: usize,
}

/// Qubit noise settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoiseConfig {
    /// Noise source used when none is requested explicitly.
    #[serde(default)]
    pub kind: NoiseKind,

    /// Number of sampled repetitions.
    #[serde(default = "default_noise_repetitions")]
    pub repetitions: usize,
}

/// Repetition-code settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorCorrectionConfig {
    /// Number of sampled repetitions.
    #[serde(default = "default_correction_repetitions")]
    pub repetitions: usize,
}

/// Bell state settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BellConfig {
    /// Number of sampled repetitions.
    #[serde(default = "default_bell_repetitions")]
    pub repetitions: usize,
}

/// Error prediction settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictorConfig {
    /// Size of the synthetic dataset.
    #[serde(default = "default_samples")]
    pub samples: usize,

    /// Held-out fraction, strictly between 0 and 1.
    #[serde(default = "default_test_size")]
    pub test_size: f64,

    /// Number of trees in the forest.
    #[serde(default = "default_n_estimators")]
    pub n_estimators: usize,
}

// Default value functions
fn default_seed() -> u64 {
    42
}

fn default_plot_dir() -> PathBuf {
    PathBuf::from("assets/plots")
}

fn default_log_file() -> PathBuf {
    PathBuf::from("quantumsim.log")
}

fn default_hopping() -> f64 {
    1.0
}

fn default_pairing() -> f64 {
    0.5
}

fn default_duration() -> f64 {
    10.0
}

fn default_points() -> usize {
    100
}

fn default_noise_repetitions() -> usize {
    10
}

fn default_correction_repetitions() -> usize {
    5
}

fn default_bell_repetitions() -> usize {
    100
}

fn default_samples() -> usize {
    1000
}

fn default_test_size() -> f64 {
    0.2
}

fn default_n_estimators() -> usize {
    100
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            plot_dir: default_plot_dir(),
            log_file: default_log_file(),
            majorana: MajoranaConfig::default(),
            noise: NoiseConfig::default(),
            error_correction: ErrorCorrectionConfig::default(),
            bell: BellConfig::default(),
            predictor: PredictorConfig::default(),
        }
    }
}

impl Default for MajoranaConfig {
    fn default() -> Self {
        Self {
            hopping: default_hopping(),
            pairing: default_pairing(),
            chemical_potential: 0.0,
            duration: default_duration(),
            points: default_points(),
        }
    }
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            kind: NoiseKind::default(),
            repetitions: default_noise_repetitions(),
        }
    }
}

impl Default for ErrorCorrectionConfig {
    fn default() -> Self {
        Self {
            repetitions: default_correction_repetitions(),
        }
    }
}

impl Default for BellConfig {
    fn default() -> Self {
        Self {
            repetitions: default_bell_repetitions(),
        }
    }
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            samples: default_samples(),
            test_size: default_test_size(),
            n_estimators: default_n_estimators(),
        }
    }
}

impl ExplorerConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> ExplorerResult<Self> {
        let path = path.as_ref();
        let contents =
            std::fs::read_to_string(path).map_err(|source| ExplorerError::ConfigRead {
                path: path.to_path_buf(),
                source,
            })?;

        // An empty file deserializes to a unit value, not a mapping
        let config: ExplorerConfig = if contents.trim().is_empty() {
            ExplorerConfig::default()
        } else {
            serde_yaml_ng::from_str(&contents).map_err(|source| ExplorerError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?
        };

        config.validate()?;
        Ok(config)
    }

    /// Load configuration with the precedence described in the module docs.
    pub fn load(explicit: Option<&Path>) -> ExplorerResult<Self> {
        if let Some(path) = explicit {
            debug!(path = %path.display(), "loading explicit config file");
            return Self::from_file(path);
        }

        match Self::search_paths().into_iter().find(|p| p.is_file()) {
            Some(path) => {
                debug!(path = %path.display(), "loading discovered config file");
                Self::from_file(path)
            }
            None => {
                debug!("no config file found, using defaults");
                let config = Self::default();
                config.validate()?;
                Ok(config)
            }
        }
    }

    /// Locations searched when no explicit file is given, in order.
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(CONFIG_FILE_NAME)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("quantumsim").join("config.yaml"));
        }
        paths
    }

    /// Path of the Majorana plot inside [`ExplorerConfig::plot_dir`].
    pub fn majorana_plot_path(&self) -> PathBuf {
        self.plot_dir.join("majorana_plot.svg")
    }

    /// Validate configuration values.
    pub fn validate(&self) -> ExplorerResult<()> {
        if self.plot_dir.as_os_str().is_empty() {
            return Err(ExplorerError::InvalidConfig(
                "plot_dir must not be empty".into(),
            ));
        }

        let m = &self.majorana;
        for (name, value) in [
            ("majorana.hopping", m.hopping),
            ("majorana.pairing", m.pairing),
            ("majorana.chemical_potential", m.chemical_potential),
        ] {
            if !value.is_finite() {
                return Err(ExplorerError::InvalidConfig(format!(
                    "{name} must be a finite number, got {value}"
                )));
            }
        }
        if !(m.duration.is_finite() && m.duration > 0.0) {
            return Err(ExplorerError::InvalidConfig(format!(
                "majorana.duration must be positive, got {}",
                m.duration
            )));
        }
        if m.points < 2 {
            return Err(ExplorerError::InvalidConfig(format!(
                "majorana.points must be at least 2, got {}",
                m.points
            )));
        }

        for (name, reps) in [
            ("noise.repetitions", self.noise.repetitions),
            ("error_correction.repetitions", self.error_correction.repetitions),
            ("bell.repetitions", self.bell.repetitions),
        ] {
            if reps == 0 {
                return Err(ExplorerError::InvalidConfig(format!(
                    "{name} must be at least 1"
                )));
            }
        }

        let p = &self.predictor;
        if !(p.test_size > 0.0 && p.test_size < 1.0) {
            return Err(ExplorerError::InvalidConfig(format!(
                "predictor.test_size must be between 0 and 1 (exclusive), got {}",
                p.test_size
            )));
        }
        if p.samples < 2 {
            return Err(ExplorerError::InvalidConfig(format!(
                "predictor.samples must be at least 2, got {}",
                p.samples
            )));
        }
        if p.n_estimators == 0 {
            return Err(ExplorerError::InvalidConfig(
                "predictor.n_estimators must be at least 1".into(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = ExplorerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.seed, 42);
        assert_eq!(config.noise.repetitions, 10);
        assert_eq!(config.error_correction.repetitions, 5);
        assert_eq!(config.predictor.samples, 1000);
        assert_eq!(config.majorana.points, 100);
        assert_eq!(
            config.majorana_plot_path(),
            PathBuf::from("assets/plots/majorana_plot.svg")
        );
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "seed: 7\nnoise:\n  kind: thermal\npredictor:\n  n_estimators: 20").unwrap();

        let config = ExplorerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.noise.kind, NoiseKind::Thermal);
        assert_eq!(config.noise.repetitions, 10);
        assert_eq!(config.predictor.n_estimators, 20);
        assert_eq!(config.predictor.test_size, 0.2);
    }

    #[test]
    fn test_empty_file_is_default() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert_eq!(
            ExplorerConfig::from_file(file.path()).unwrap(),
            ExplorerConfig::default()
        );
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut config = ExplorerConfig::default();
        config.predictor.test_size = 1.0;
        assert!(matches!(config.validate(), Err(ExplorerError::InvalidConfig(_))));

        let mut config = ExplorerConfig::default();
        config.noise.repetitions = 0;
        assert!(config.validate().is_err());

        let mut config = ExplorerConfig::default();
        config.majorana.duration = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_file_values_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "error_correction:\n  repetitions: 0").unwrap();
        assert!(matches!(
            ExplorerConfig::from_file(file.path()),
            Err(ExplorerError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_parse_error_names_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "seed: [not a number").unwrap();
        let err = ExplorerConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ExplorerError::ConfigParse { .. }));
        assert!(err.to_string().contains(&file.path().display().to_string()));
    }

    #[test]
    fn test_missing_explicit_file() {
        let err = ExplorerConfig::load(Some(Path::new("/nonexistent/quantumsim.yaml"))).unwrap_err();
        assert!(matches!(err, ExplorerError::ConfigRead { .. }));
    }

    #[test]
    fn test_search_paths_start_with_working_dir() {
        let paths = ExplorerConfig::search_paths();
        assert_eq!(paths[0], PathBuf::from(CONFIG_FILE_NAME));
    }
}
