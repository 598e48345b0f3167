//! Quantum gate types.

use serde::{Deserialize, Serialize};

/// Standard gates with known semantics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    // Single-qubit Pauli gates
    /// Identity gate.
    I,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,

    // Single-qubit Clifford gates
    /// Hadamard gate.
    H,
    /// S gate (sqrt(Z)).
    S,
    /// S-dagger gate.
    Sdg,
    /// T gate (fourth root of Z).
    T,
    /// T-dagger gate.
    Tdg,
    /// sqrt(X) gate.
    SX,

    // Single-qubit rotation gates
    /// Rotation around X axis.
    Rx(f64),
    /// Rotation around Y axis.
    Ry(f64),
    /// Rotation around Z axis.
    Rz(f64),

    // Two-qubit gates
    /// Controlled-X (CNOT) gate.
    CX,
    /// Controlled-Y gate.
    CY,
    /// Controlled-Z gate.
    CZ,
    /// SWAP gate.
    Swap,

    // Three-qubit gates
    /// Toffoli gate (CCX).
    CCX,
}

impl StandardGate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::I => "id",
            StandardGate::X => "x",
            StandardGate::Y => "y",
            StandardGate::Z => "z",
            StandardGate::H => "h",
            StandardGate::S => "s",
            StandardGate::Sdg => "sdg",
            StandardGate::T => "t",
            StandardGate::Tdg => "tdg",
            StandardGate::SX => "sx",
            StandardGate::Rx(_) => "rx",
            StandardGate::Ry(_) => "ry",
            StandardGate::Rz(_) => "rz",
            StandardGate::CX => "cx",
            StandardGate::CY => "cy",
            StandardGate::CZ => "cz",
            StandardGate::Swap => "swap",
            StandardGate::CCX => "ccx",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::I
            | StandardGate::X
            | StandardGate::Y
            | StandardGate::Z
            | StandardGate::H
            | StandardGate::S
            | StandardGate::Sdg
            | StandardGate::T
            | StandardGate::Tdg
            | StandardGate::SX
            | StandardGate::Rx(_)
            | StandardGate::Ry(_)
            | StandardGate::Rz(_) => 1,

            StandardGate::CX | StandardGate::CY | StandardGate::CZ | StandardGate::Swap => 2,

            StandardGate::CCX => 3,
        }
    }

    /// Diagram symbol drawn on each operand wire, in operand order.
    pub fn diagram_symbols(&self) -> Vec<String> {
        let single = |s: &str| vec![s.to_string()];
        match self {
            StandardGate::I => single("I"),
            StandardGate::X => single("X"),
            StandardGate::Y => single("Y"),
            StandardGate::Z => single("Z"),
            StandardGate::H => single("H"),
            StandardGate::S => single("S"),
            StandardGate::Sdg => single("S^-1"),
            StandardGate::T => single("T"),
            StandardGate::Tdg => single("T^-1"),
            StandardGate::SX => single("X^0.5"),
            StandardGate::Rx(theta) => vec![format!("Rx({theta:.3})")],
            StandardGate::Ry(theta) => vec![format!("Ry({theta:.3})")],
            StandardGate::Rz(theta) => vec![format!("Rz({theta:.3})")],
            StandardGate::CX => vec!["@".into(), "X".into()],
            StandardGate::CY => vec!["@".into(), "Y".into()],
            StandardGate::CZ => vec!["@".into(), "@".into()],
            StandardGate::Swap => vec!["×".into(), "×".into()],
            StandardGate::CCX => vec!["@".into(), "@".into(), "X".into()],
        }
    }
}

/// A gate with associated metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    /// The kind of gate.
    pub kind: StandardGate,
    /// Probability that the gate fires in a given repetition.
    ///
    /// `None` means the gate is always applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probability: Option<f64>,
    /// Optional label for the gate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Gate {
    /// Create a new gate from a standard gate.
    pub fn standard(gate: StandardGate) -> Self {
        Self {
            kind: gate,
            probability: None,
            label: None,
        }
    }

    /// Add a label to the gate.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Make the gate stochastic: it fires with probability `p`.
    ///
    /// Range checking happens when the gate is added to a circuit.
    #[must_use]
    pub fn with_probability(mut self, p: f64) -> Self {
        self.probability = Some(p);
        self
    }

    /// Get the name of this gate.
    pub fn name(&self) -> &str {
        self.kind.name()
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.kind.num_qubits()
    }

    /// True if the gate only fires with some probability below one.
    pub fn is_stochastic(&self) -> bool {
        self.probability.is_some()
    }

    /// Diagram symbols, with the firing probability attached to the last
    /// operand (the target).
    pub fn diagram_symbols(&self) -> Vec<String> {
        let mut symbols = match &self.label {
            Some(label) => vec![label.clone(); self.kind.num_qubits() as usize],
            None => self.kind.diagram_symbols(),
        };
        if let (Some(p), Some(last)) = (self.probability, symbols.last_mut()) {
            last.push_str(&format!("[p={p:?}]"));
        }
        symbols
    }
}

impl From<StandardGate> for Gate {
    fn from(gate: StandardGate) -> Self {
        Gate::standard(gate)
    }
}
