//! Majorana Qubits page.

use anyhow::{Context, Result};
use console::style;

use qsx_demos::experiments::simulate_majorana;
use qsx_demos::{ExplorerConfig, print_header, print_result, print_section, print_success, topics};

use super::common::print_block;

/// Execute the majorana command.
pub fn execute(config: &ExplorerConfig, info: bool) -> Result<()> {
    print_header("Majorana Fermion Qubits");
    if info {
        print_block(&topics::majorana_info());
    }

    print_section("Majorana Qubit Simulation");
    print_result("Hopping t", config.majorana.hopping);
    print_result("Pairing Δ", config.majorana.pairing);
    print_result(
        "Times",
        format!(
            "{} points in [0, {}]",
            config.majorana.points, config.majorana.duration
        ),
    );

    let path = simulate_majorana(config).context("Majorana simulation failed")?;

    println!();
    print_success(&format!(
        "Majorana Fermion Qubit Simulation written to {}",
        style(path.display()).green()
    ));
    Ok(())
}
