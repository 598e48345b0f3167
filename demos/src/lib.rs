//! QuantumSim Explorer Experiments
//!
//! This crate holds the canned experiments of the explorer and the helpers
//! the command line uses to present them:
//!
//! - **Majorana dynamics**: two-level evolution of Majorana mode operators,
//!   written out as an SVG chart
//! - **Qubit noise**: one-qubit circuit with stochastic flips or a damping
//!   channel, sampled with a fixed seed
//! - **Error correction**: three-qubit repetition code with a forced error
//!   and syndrome decoding
//! - **Error prediction**: random forest predicting bit and phase flips
//!   from synthetic state features
//! - **Gates and Bell states**: small interactive demonstrations
//!
//! # Example
//!
//! ```rust
//! use qsx_demos::{ExplorerConfig, experiments::error_correction_demo};
//!
//! let report = error_correction_demo(&ExplorerConfig::default()).unwrap();
//! assert!(report.text.ends_with("result=00000, 11111, 00000"));
//! ```

pub mod config;
pub mod error;
pub mod experiments;
pub mod plot;
pub mod topics;

pub use config::ExplorerConfig;
pub use error::{ExplorerError, ExplorerResult};

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Create a progress bar for experiment steps.
pub fn create_progress_bar(len: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    let style = ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
    )
    .map(|s| s.progress_chars("#>-"))
    .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb
}

/// Print a page header.
pub fn print_header(title: &str) {
    println!();
    println!("{}", style("═".repeat(60)).cyan());
    println!("{}", style(format!("  {title}")).cyan().bold());
    println!("{}", style("═".repeat(60)).cyan());
    println!();
}

/// Print a section heading.
pub fn print_section(title: &str) {
    println!();
    println!("{}", style(format!("▶ {title}")).green().bold());
    println!("{}", style("─".repeat(40)).dim());
}

/// Print a result line.
pub fn print_result(label: &str, value: impl std::fmt::Display) {
    println!("  {} {}", style(format!("{label}:")).dim(), value);
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("ℹ").blue(), message);
}
