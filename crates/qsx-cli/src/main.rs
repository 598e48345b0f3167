//! QuantumSim Explorer Command-Line Interface
//!
//! Each subcommand runs one page or one button of the explorer and prints
//! what it produced.
//!
//! ```text
//! quantumsim basics --tab applications --use-case cryptography
//! quantumsim majorana --info
//! quantumsim noise --kind thermal --show-circuit
//! quantumsim error-correction --train
//! quantumsim --seed 7 all
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use tracing::debug;

use qsx_demos::experiments::{GateChoice, NoiseKind};
use qsx_demos::topics::{BasicsTab, UseCase};

mod commands;
mod logging;

use commands::common::ConfigOverrides;
use commands::{all, basics, bell, error_correction, gate, majorana, noise, train, version};

/// QuantumSim Explorer - small quantum simulations from the command line
#[derive(Parser)]
#[command(name = "quantumsim")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (YAML)
    #[arg(long, global = true, env = "QUANTUMSIM_CONFIG")]
    config: Option<PathBuf>,

    /// Override the random seed
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Override the plot output directory
    #[arg(long, global = true)]
    plot_dir: Option<PathBuf>,

    /// Override the log file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Quantum computing fundamentals
    Basics {
        /// Tab to show
        #[arg(short, long, value_enum, default_value = "qubits")]
        tab: BasicsTab,

        /// Use case on the applications tab (all when omitted)
        #[arg(short, long, value_enum)]
        use_case: Option<UseCase>,

        /// Show the qubit visualization reference
        #[arg(long)]
        figure: bool,
    },

    /// Simulate Majorana fermion dynamics and write the plot
    Majorana {
        /// Print the Majorana qubit overview first
        #[arg(long)]
        info: bool,
    },

    /// Sample a qubit under noise
    Noise {
        /// Noise source (defaults to the configured kind)
        #[arg(short, long, value_enum)]
        kind: Option<NoiseKind>,

        /// Print the circuit diagram
        #[arg(long)]
        show_circuit: bool,
    },

    /// Apply a single gate and list the resulting amplitudes
    Gate {
        /// Gate to apply
        #[arg(short, long, value_enum)]
        gate: GateChoice,
    },

    /// Create and sample a Bell state
    Bell,

    /// Run the repetition-code error correction demo
    ErrorCorrection {
        /// Also train the error prediction model
        #[arg(long)]
        train: bool,
    },

    /// Train the error prediction model
    Train,

    /// Run every page and experiment in turn
    All,

    /// Show version information
    Version,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            config: self.config.clone(),
            seed: self.seed,
            plot_dir: self.plot_dir.clone(),
            log_file: self.log_file.clone(),
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    if let Commands::Version = cli.command {
        version::execute();
        return Ok(());
    }

    let config = commands::common::load_config(&cli.overrides())?;
    logging::init(cli.verbose, &config.log_file)?;
    debug!(
        seed = config.seed,
        plot_dir = %config.plot_dir.display(),
        "configuration loaded"
    );

    match cli.command {
        Commands::Basics {
            tab,
            use_case,
            figure,
        } => {
            basics::execute(tab, use_case, figure);
            Ok(())
        }
        Commands::Majorana { info } => majorana::execute(&config, info),
        Commands::Noise { kind, show_circuit } => noise::execute(&config, kind, show_circuit),
        Commands::Gate { gate: choice } => {
            gate::execute(choice);
            Ok(())
        }
        Commands::Bell => bell::execute(&config),
        Commands::ErrorCorrection { train: do_train } => {
            error_correction::execute(&config, do_train)
        }
        Commands::Train => train::execute(&config),
        Commands::All => all::execute(&config),
        Commands::Version => Ok(()),
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{} {e:#}", style("Error:").red().bold());
        std::process::exit(1);
    }
}
