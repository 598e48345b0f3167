//! Quantum gate operations.

use qsx_demos::experiments::{GateChoice, apply_gate};
use qsx_demos::{print_header, print_info, print_success};

use super::common::print_block;

/// Execute the gate command.
pub fn execute(choice: GateChoice) {
    print_header("Quantum Gate Operations");
    let report = apply_gate(choice);

    print_info(&format!("Applying {} gate to {}", report.gate, report.input));
    print_block(&report.amplitude_table());
    println!();
    print_success(&format!("{choice} gate applied successfully!"));
}
