//! CLI argument parsing and configuration tests.
//!
//! The CLI is a binary crate, so parsing is checked on a mirror of its
//! argument structs built from the same value enums, and configuration
//! handling is checked through the library the commands call into.

// ============================================================================
// Configuration as seen by the commands
// ============================================================================

mod config_tests {
    use std::io::Write;
    use std::path::PathBuf;

    use qsx_demos::experiments::NoiseKind;
    use qsx_demos::{ExplorerConfig, ExplorerError};

    #[test]
    fn test_full_file_round_trip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "seed: 11
plot_dir: out/plots
log_file: out/run.log
majorana:
  hopping: 2.0
  points: 50
noise:
  kind: dephasing
  repetitions: 20
error_correction:
  repetitions: 8
bell:
  repetitions: 64
predictor:
  samples: 500
  test_size: 0.25
  n_estimators: 10"
        )
        .unwrap();

        let config = ExplorerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.seed, 11);
        assert_eq!(config.plot_dir, PathBuf::from("out/plots"));
        assert_eq!(config.log_file, PathBuf::from("out/run.log"));
        assert_eq!(config.majorana.hopping, 2.0);
        assert_eq!(config.majorana.pairing, 0.5);
        assert_eq!(config.majorana.points, 50);
        assert_eq!(config.noise.kind, NoiseKind::Dephasing);
        assert_eq!(config.noise.repetitions, 20);
        assert_eq!(config.error_correction.repetitions, 8);
        assert_eq!(config.bell.repetitions, 64);
        assert_eq!(config.predictor.samples, 500);
        assert_eq!(config.predictor.n_estimators, 10);
    }

    #[test]
    fn test_unknown_noise_kind_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "noise:\n  kind: cosmic-rays").unwrap();
        assert!(matches!(
            ExplorerConfig::from_file(file.path()),
            Err(ExplorerError::ConfigParse { .. })
        ));
    }

    #[test]
    fn test_out_of_range_test_size_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "predictor:\n  test_size: 1.5").unwrap();
        let err = ExplorerConfig::from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("predictor.test_size"));
    }
}

// ============================================================================
// Clap argument parsing (test via try_parse_from on equivalent structs)
// ============================================================================

mod clap_parsing {
    use std::path::PathBuf;

    use clap::{Parser, Subcommand, ValueEnum};
    use qsx_demos::experiments::{GateChoice, NoiseKind};
    use qsx_demos::topics::{BasicsTab, UseCase};

    // Mirror the CLI struct for testing (since main.rs is a binary)
    #[derive(Parser)]
    #[command(name = "quantumsim")]
    struct TestCli {
        #[arg(short, long, action = clap::ArgAction::Count, global = true)]
        verbose: u8,
        #[arg(long, global = true)]
        config: Option<PathBuf>,
        #[arg(long, global = true)]
        seed: Option<u64>,
        #[arg(long, global = true)]
        plot_dir: Option<PathBuf>,
        #[arg(long, global = true)]
        log_file: Option<PathBuf>,

        #[command(subcommand)]
        command: TestCommands,
    }

    #[derive(Subcommand)]
    enum TestCommands {
        Basics {
            #[arg(short, long, value_enum, default_value = "qubits")]
            tab: BasicsTab,
            #[arg(short, long, value_enum)]
            use_case: Option<UseCase>,
            #[arg(long)]
            figure: bool,
        },
        Majorana {
            #[arg(long)]
            info: bool,
        },
        Noise {
            #[arg(short, long, value_enum)]
            kind: Option<NoiseKind>,
            #[arg(long)]
            show_circuit: bool,
        },
        Gate {
            #[arg(short, long, value_enum)]
            gate: GateChoice,
        },
        Bell,
        ErrorCorrection {
            #[arg(long)]
            train: bool,
        },
        Train,
        All,
        Version,
    }

    fn names<T: ValueEnum>() -> Vec<String> {
        T::value_variants()
            .iter()
            .filter_map(|v| v.to_possible_value())
            .map(|v| v.get_name().to_string())
            .collect()
    }

    #[test]
    fn test_value_names() {
        assert_eq!(
            names::<NoiseKind>(),
            ["pauli", "dephasing", "amplitude-damping", "thermal"]
        );
        assert_eq!(names::<GateChoice>(), ["hadamard", "cnot", "pauli-x", "t"]);
        assert_eq!(
            names::<UseCase>(),
            [
                "drug-discovery",
                "financial-modeling",
                "cryptography",
                "material-science"
            ]
        );
        assert_eq!(names::<BasicsTab>(), ["qubits", "compare", "applications"]);
    }

    // --- Pages ---

    #[test]
    fn test_parse_basics_tab() {
        let cli = TestCli::try_parse_from(["quantumsim", "basics", "-t", "compare"]).unwrap();
        match cli.command {
            TestCommands::Basics { tab, .. } => assert_eq!(tab, BasicsTab::Compare),
            _ => panic!("Expected Basics command"),
        }
    }

    #[test]
    fn test_parse_basics_bad_tab() {
        assert!(TestCli::try_parse_from(["quantumsim", "basics", "--tab", "history"]).is_err());
    }

    #[test]
    fn test_parse_majorana_info() {
        let cli = TestCli::try_parse_from(["quantumsim", "majorana", "--info"]).unwrap();
        assert!(matches!(cli.command, TestCommands::Majorana { info: true }));
    }

    // --- Simulations ---

    #[test]
    fn test_parse_noise_defaults() {
        let cli = TestCli::try_parse_from(["quantumsim", "noise"]).unwrap();
        match cli.command {
            TestCommands::Noise { kind, show_circuit } => {
                assert!(kind.is_none());
                assert!(!show_circuit);
            }
            _ => panic!("Expected Noise command"),
        }
    }

    #[test]
    fn test_parse_noise_short_flag() {
        let cli = TestCli::try_parse_from(["quantumsim", "noise", "-k", "thermal"]).unwrap();
        assert!(matches!(
            cli.command,
            TestCommands::Noise {
                kind: Some(NoiseKind::Thermal),
                ..
            }
        ));
    }

    #[test]
    fn test_parse_gate() {
        let cli = TestCli::try_parse_from(["quantumsim", "gate", "--gate", "cnot"]).unwrap();
        assert!(matches!(
            cli.command,
            TestCommands::Gate {
                gate: GateChoice::Cnot
            }
        ));
    }

    #[test]
    fn test_parse_gate_unknown() {
        assert!(TestCli::try_parse_from(["quantumsim", "gate", "--gate", "toffoli"]).is_err());
    }

    #[test]
    fn test_parse_simple_commands() {
        let parse = |arg: &str| TestCli::try_parse_from(["quantumsim", arg]).unwrap().command;
        assert!(matches!(parse("bell"), TestCommands::Bell));
        assert!(matches!(parse("train"), TestCommands::Train));
        assert!(matches!(parse("all"), TestCommands::All));
        assert!(matches!(parse("version"), TestCommands::Version));
        assert!(matches!(
            parse("error-correction"),
            TestCommands::ErrorCorrection { train: false }
        ));
    }

    // --- Global flags ---

    #[test]
    fn test_global_flags_before_subcommand() {
        let cli = TestCli::try_parse_from([
            "quantumsim",
            "--config",
            "explorer.yaml",
            "--log-file",
            "logs/run.log",
            "-v",
            "bell",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 1);
        assert_eq!(cli.config, Some(PathBuf::from("explorer.yaml")));
        assert_eq!(cli.log_file, Some(PathBuf::from("logs/run.log")));
        assert!(cli.seed.is_none());
        assert!(cli.plot_dir.is_none());
    }

    #[test]
    fn test_seed_must_be_number() {
        assert!(TestCli::try_parse_from(["quantumsim", "--seed", "abc", "train"]).is_err());
        assert!(TestCli::try_parse_from(["quantumsim", "--seed", "-1", "train"]).is_err());
    }

    #[test]
    fn test_verbose_stacks() {
        let cli = TestCli::try_parse_from(["quantumsim", "-vvv", "train"]).unwrap();
        assert_eq!(cli.verbose, 3);
    }
}
