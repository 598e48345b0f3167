//! Shared helpers for CLI commands.

use std::path::PathBuf;

use anyhow::{Context, Result};
use qsx_demos::ExplorerConfig;
use qsx_ir::Circuit;

/// Global flags that take precedence over the configuration file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config: Option<PathBuf>,
    pub seed: Option<u64>,
    pub plot_dir: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
}

impl ConfigOverrides {
    /// Apply the flags that were given to `config`.
    pub fn apply(&self, config: &mut ExplorerConfig) {
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(dir) = &self.plot_dir {
            config.plot_dir.clone_from(dir);
        }
        if let Some(file) = &self.log_file {
            config.log_file.clone_from(file);
        }
    }
}

/// Load the configuration file (or defaults) and apply the overrides.
pub fn load_config(overrides: &ConfigOverrides) -> Result<ExplorerConfig> {
    let mut config =
        ExplorerConfig::load(overrides.config.as_deref()).context("Failed to load configuration")?;
    overrides.apply(&mut config);
    config
        .validate()
        .context("Invalid command-line override")?;
    Ok(config)
}

/// Print a circuit diagram indented under a section.
pub fn print_circuit(circuit: &Circuit) {
    for line in circuit.to_string().lines() {
        println!("  {line}");
    }
}

/// Print multi-line text indented under a section.
pub fn print_block(text: &str) {
    for line in text.lines() {
        println!("  {line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_overrides_win_over_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "seed: 5\nplot_dir: from_file").unwrap();

        let overrides = ConfigOverrides {
            config: Some(file.path().to_path_buf()),
            seed: Some(9),
            ..ConfigOverrides::default()
        };
        let config = load_config(&overrides).unwrap();
        assert_eq!(config.seed, 9);
        assert_eq!(config.plot_dir, PathBuf::from("from_file"));
    }

    #[test]
    fn test_empty_plot_dir_override_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "seed: 1").unwrap();
        let overrides = ConfigOverrides {
            config: Some(file.path().to_path_buf()),
            plot_dir: Some(PathBuf::new()),
            ..ConfigOverrides::default()
        };
        let err = load_config(&overrides).unwrap_err();
        assert!(format!("{err:#}").contains("plot_dir"));
    }
}
