//! Qubit noise simulation.

use anyhow::{Context, Result};

use qsx_demos::experiments::{NoiseKind, simulate_noise};
use qsx_demos::{ExplorerConfig, print_header, print_info, print_result, print_section};

use super::common::{print_block, print_circuit};

/// Execute the noise command.
pub fn execute(config: &ExplorerConfig, kind: Option<NoiseKind>, show_circuit: bool) -> Result<()> {
    let kind = kind.unwrap_or(config.noise.kind);

    print_header("Qubit Noise Dynamics");
    print_info("Explore how different noise sources affect qubit coherence");
    print_result("Noise type", kind);
    print_result("Repetitions", config.noise.repetitions);
    print_result("Seed", config.seed);

    let report = simulate_noise(kind, config)
        .with_context(|| format!("{kind} noise simulation failed"))?;

    print_section("Results");
    print_block(&report.text);

    if show_circuit {
        print_section("Circuit");
        print_circuit(&report.circuit);
    }
    Ok(())
}
