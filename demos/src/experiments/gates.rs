//! Single gate applications on a basis state.

use std::fmt;

use clap::ValueEnum;
use num_complex::Complex64;
use qsx_ir::StandardGate;
use qsx_sim::Statevector;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Amplitudes below this magnitude are not listed.
const AMPLITUDE_CUTOFF: f64 = 1e-12;

/// Gates offered by the gate demo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum GateChoice {
    Hadamard,
    Cnot,
    PauliX,
    T,
}

impl GateChoice {
    pub const ALL: [GateChoice; 4] = [
        GateChoice::Hadamard,
        GateChoice::Cnot,
        GateChoice::PauliX,
        GateChoice::T,
    ];

    fn gate(self) -> StandardGate {
        match self {
            GateChoice::Hadamard => StandardGate::H,
            GateChoice::Cnot => StandardGate::CX,
            GateChoice::PauliX => StandardGate::X,
            GateChoice::T => StandardGate::T,
        }
    }
}

impl fmt::Display for GateChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GateChoice::Hadamard => "Hadamard",
            GateChoice::Cnot => "CNOT",
            GateChoice::PauliX => "Pauli-X",
            GateChoice::T => "T",
        };
        f.write_str(name)
    }
}

/// Output of [`apply_gate`].
#[derive(Debug, Clone, PartialEq)]
pub struct GateReport {
    pub gate: GateChoice,
    /// Label of the input basis state, e.g. `|10⟩`.
    pub input: String,
    /// Non-zero amplitudes of the output state, labelled like `input`.
    pub amplitudes: Vec<(String, Complex64)>,
}

impl GateReport {
    /// One `label: amplitude (p = probability)` line per amplitude.
    pub fn amplitude_table(&self) -> String {
        self.amplitudes
            .iter()
            .map(|(label, amp)| {
                format!(
                    "{label}: {:+.4}{:+.4}i  (p = {:.4})",
                    amp.re,
                    amp.im,
                    amp.norm_sqr()
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for GateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Applying {} gate to {}", self.gate, self.input)?;
        for line in self.amplitude_table().lines() {
            writeln!(f, "  {line}")?;
        }
        write!(f, "{} gate applied successfully!", self.gate)
    }
}

/// Basis label with qubit 0 leftmost.
fn basis_label(index: usize, num_qubits: usize) -> String {
    let bits: String = (0..num_qubits)
        .map(|q| if (index >> q) & 1 == 1 { '1' } else { '0' })
        .collect();
    format!("|{bits}⟩")
}

/// Apply `choice` to `|0⟩`, or to `|10⟩` for CNOT so that the control is set.
pub fn apply_gate(choice: GateChoice) -> GateReport {
    let gate = choice.gate();
    let num_qubits = gate.num_qubits() as usize;
    let mut state = Statevector::new(num_qubits);
    if choice == GateChoice::Cnot {
        state.apply_gate(&StandardGate::X, &[0]);
    }
    let input = basis_label(if choice == GateChoice::Cnot { 1 } else { 0 }, num_qubits);

    let operands: Vec<usize> = (0..num_qubits).collect();
    state.apply_gate(&gate, &operands);

    let amplitudes = state
        .amplitudes()
        .iter()
        .enumerate()
        .filter(|(_, a)| a.norm() > AMPLITUDE_CUTOFF)
        .map(|(i, a)| (basis_label(i, num_qubits), *a))
        .collect();

    info!(gate = %choice, "Applied gate");
    GateReport {
        gate: choice,
        input,
        amplitudes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_1_SQRT_2;

    #[test]
    fn test_hadamard_superposition() {
        let report = apply_gate(GateChoice::Hadamard);
        assert_eq!(report.input, "|0⟩");
        assert_eq!(report.amplitudes.len(), 2);
        for (_, a) in &report.amplitudes {
            assert!((a.re - FRAC_1_SQRT_2).abs() < 1e-12);
        }
    }

    #[test]
    fn test_cnot_flips_target() {
        let report = apply_gate(GateChoice::Cnot);
        assert_eq!(report.input, "|10⟩");
        assert_eq!(report.amplitudes.len(), 1);
        assert_eq!(report.amplitudes[0].0, "|11⟩");
    }

    #[test]
    fn test_pauli_x_and_t() {
        let x = apply_gate(GateChoice::PauliX);
        assert_eq!(x.amplitudes[0].0, "|1⟩");

        let t = apply_gate(GateChoice::T);
        assert_eq!(t.amplitudes.len(), 1);
        assert_eq!(t.amplitudes[0].0, "|0⟩");
    }

    #[test]
    fn test_display() {
        let text = apply_gate(GateChoice::PauliX).to_string();
        assert!(text.starts_with("Applying Pauli-X gate to |0⟩"));
        assert!(text.contains("|1⟩: +1.0000+0.0000i  (p = 1.0000)"));
        assert!(text.ends_with("Pauli-X gate applied successfully!"));
    }
}
