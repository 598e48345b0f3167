//! Error Correction page.

use anyhow::{Context, Result};

use qsx_demos::experiments::error_correction_demo;
use qsx_demos::{ExplorerConfig, print_header, print_section, topics};

use super::common::{print_block, print_circuit};
use super::train;

/// Execute the error-correction command.
pub fn execute(config: &ExplorerConfig, do_train: bool) -> Result<()> {
    print_header("Quantum Error Correction");
    print_block(&topics::error_correction_intro());

    let report = error_correction_demo(config).context("Error correction demo failed")?;

    print_section("Error Correction Demo");
    println!("{}", report.text);

    print_section("Circuit");
    print_circuit(&report.circuit);

    print_section("Decoded syndromes");
    print_block(&report.syndrome_summary());

    if do_train {
        println!();
        train::execute(config)?;
    }
    Ok(())
}
