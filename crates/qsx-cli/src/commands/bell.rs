//! Entanglement visualization.

use anyhow::{Context, Result};

use qsx_demos::experiments::bell_state;
use qsx_demos::topics::BELL_CIRCUIT;
use qsx_demos::{ExplorerConfig, print_header, print_info, print_result, print_section};

use super::common::{print_block, print_circuit};

/// Execute the bell command.
pub fn execute(config: &ExplorerConfig) -> Result<()> {
    print_header("Entanglement Visualization");
    print_info("Visualize quantum entanglement between two qubits");

    let report = bell_state(config).context("Bell state simulation failed")?;

    print_section(BELL_CIRCUIT.caption);
    print_circuit(&report.circuit);
    print_result("Reference", BELL_CIRCUIT.url);

    print_section(&format!("Outcomes over {} repetitions", report.result.repetitions()));
    print_block(&report.histogram_text());
    Ok(())
}
