//! Circuit instructions combining operations with operands.

use serde::{Deserialize, Serialize};

use crate::gate::{Gate, StandardGate};
use crate::noise::NoiseModel;
use crate::qubit::QubitId;

/// The kind of instruction in a circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InstructionKind {
    /// A quantum gate operation, possibly stochastic.
    Gate(Gate),
    /// Measurement of the operand qubits, recorded under `key`.
    Measure {
        /// Name the outcomes are stored under.
        key: String,
    },
    /// Single-qubit noise channel.
    Channel(NoiseModel),
    /// Barrier (synchronization point).
    Barrier,
}

/// A complete instruction with operands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    /// The kind of instruction.
    pub kind: InstructionKind,
    /// Qubits this instruction operates on.
    pub qubits: Vec<QubitId>,
}

impl Instruction {
    /// Create a gate instruction.
    pub fn gate(gate: impl Into<Gate>, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Gate(gate.into()),
            qubits: qubits.into_iter().collect(),
        }
    }

    /// Create a single-qubit gate instruction.
    pub fn single_qubit_gate(gate: StandardGate, qubit: QubitId) -> Self {
        Self::gate(gate, [qubit])
    }

    /// Create a two-qubit gate instruction.
    pub fn two_qubit_gate(gate: StandardGate, q1: QubitId, q2: QubitId) -> Self {
        Self::gate(gate, [q1, q2])
    }

    /// Create a measurement instruction.
    pub fn measure(qubits: impl IntoIterator<Item = QubitId>, key: impl Into<String>) -> Self {
        Self {
            kind: InstructionKind::Measure { key: key.into() },
            qubits: qubits.into_iter().collect(),
        }
    }

    /// Create a noise channel instruction.
    pub fn channel(model: NoiseModel, qubit: QubitId) -> Self {
        Self {
            kind: InstructionKind::Channel(model),
            qubits: vec![qubit],
        }
    }

    /// Create a barrier instruction.
    pub fn barrier(qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Barrier,
            qubits: qubits.into_iter().collect(),
        }
    }

    /// Check if this is a noise channel instruction.
    pub fn is_channel(&self) -> bool {
        matches!(self.kind, InstructionKind::Channel(_))
    }

    /// Check if this is a gate instruction.
    pub fn is_gate(&self) -> bool {
        matches!(self.kind, InstructionKind::Gate(_))
    }

    /// Check if this is a measurement.
    pub fn is_measure(&self) -> bool {
        matches!(self.kind, InstructionKind::Measure { .. })
    }

    /// Check if this is a barrier.
    pub fn is_barrier(&self) -> bool {
        matches!(self.kind, InstructionKind::Barrier)
    }

    /// Get the gate if this is a gate instruction.
    pub fn as_gate(&self) -> Option<&Gate> {
        match &self.kind {
            InstructionKind::Gate(g) => Some(g),
            _ => None,
        }
    }

    /// Get the measurement key if this is a measurement.
    pub fn measurement_key(&self) -> Option<&str> {
        match &self.kind {
            InstructionKind::Measure { key } => Some(key),
            _ => None,
        }
    }

    /// Get the name of the instruction.
    pub fn name(&self) -> &str {
        match &self.kind {
            InstructionKind::Gate(g) => g.name(),
            InstructionKind::Measure { .. } => "measure",
            InstructionKind::Channel(model) => model.name(),
            InstructionKind::Barrier => "barrier",
        }
    }

    /// Diagram symbol for each operand, in operand order.
    pub fn diagram_symbols(&self) -> Vec<String> {
        match &self.kind {
            InstructionKind::Gate(g) => g.diagram_symbols(),
            InstructionKind::Measure { key } => {
                let mut symbols = vec![format!("M('{key}')")];
                symbols.extend(std::iter::repeat_n("M".to_string(), self.qubits.len().saturating_sub(1)));
                symbols
            }
            InstructionKind::Channel(model) => vec![model.diagram_symbol()],
            InstructionKind::Barrier => vec!["│".to_string(); self.qubits.len()],
        }
    }

    /// Lowest and highest qubit index touched, if any.
    pub fn qubit_span(&self) -> Option<(u32, u32)> {
        let lo = self.qubits.iter().map(|q| q.0).min()?;
        let hi = self.qubits.iter().map(|q| q.0).max()?;
        Some((lo, hi))
    }
}
