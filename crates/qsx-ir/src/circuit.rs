//! High-level circuit builder API.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::diagram;
use crate::error::{IrError, IrResult};
use crate::gate::{Gate, StandardGate};
use crate::instruction::{Instruction, InstructionKind};
use crate::noise::NoiseModel;
use crate::qubit::QubitId;

/// A quantum circuit over line qubits `0..n`.
///
/// Instructions are kept in insertion order; [`Circuit::moments`] groups
/// them into layers for depth and diagram purposes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Number of qubits.
    num_qubits: u32,
    /// Instructions in insertion order.
    instructions: Vec<Instruction>,
    /// Measurement keys in first-use order.
    measurement_keys: Vec<String>,
}

/// A layer of instructions that can be drawn in one diagram column.
#[derive(Debug, Clone)]
pub struct Moment<'a> {
    /// The instructions in this layer, in insertion order.
    pub operations: Vec<&'a Instruction>,
}

impl Circuit {
    /// Create a new empty circuit with no qubits.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            num_qubits: 0,
            instructions: vec![],
            measurement_keys: vec![],
        }
    }

    /// Create a circuit with a given number of qubits.
    pub fn with_size(name: impl Into<String>, num_qubits: u32) -> Self {
        let mut circuit = Self::new(name);
        circuit.num_qubits = num_qubits;
        circuit
    }

    /// Add a single qubit to the circuit.
    pub fn add_qubit(&mut self) -> QubitId {
        let id = QubitId(self.num_qubits);
        self.num_qubits += 1;
        id
    }

    /// Append an instruction after validating its operands.
    pub fn apply(&mut self, instruction: Instruction) -> IrResult<&mut Self> {
        self.validate(&instruction)?;
        if let InstructionKind::Measure { key } = &instruction.kind {
            self.measurement_keys.push(key.clone());
        }
        self.instructions.push(instruction);
        Ok(self)
    }

    fn validate(&self, instruction: &Instruction) -> IrResult<()> {
        let name = instruction.name().to_string();
        if instruction.qubits.is_empty() {
            return Err(IrError::NoQubits(name));
        }

        let mut seen = HashSet::with_capacity(instruction.qubits.len());
        for &qubit in &instruction.qubits {
            if qubit.0 >= self.num_qubits {
                return Err(IrError::QubitNotFound {
                    qubit,
                    gate_name: Some(name),
                });
            }
            if !seen.insert(qubit) {
                return Err(IrError::DuplicateQubit {
                    qubit,
                    gate_name: Some(name),
                });
            }
        }

        match &instruction.kind {
            InstructionKind::Gate(gate) => {
                let got = instruction.qubits.len() as u32;
                if gate.num_qubits() != got {
                    return Err(IrError::QubitCountMismatch {
                        gate_name: name,
                        expected: gate.num_qubits(),
                        got,
                    });
                }
                if let Some(p) = gate.probability {
                    if !(0.0..=1.0).contains(&p) {
                        return Err(IrError::InvalidProbability { name, value: p });
                    }
                }
            }
            InstructionKind::Channel(model) => {
                if instruction.qubits.len() != 1 {
                    return Err(IrError::QubitCountMismatch {
                        gate_name: name,
                        expected: 1,
                        got: instruction.qubits.len() as u32,
                    });
                }
                model.validate()?;
            }
            InstructionKind::Measure { key } => {
                if key.is_empty() {
                    return Err(IrError::EmptyMeasurementKey);
                }
                if self.measurement_keys.iter().any(|k| k == key) {
                    return Err(IrError::DuplicateMeasurementKey(key.clone()));
                }
            }
            InstructionKind::Barrier => {}
        }
        Ok(())
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::H, qubit))
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::X, qubit))
    }

    /// Apply Pauli-Y gate.
    pub fn y(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Y, qubit))
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Z, qubit))
    }

    /// Apply S gate.
    pub fn s(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::S, qubit))
    }

    /// Apply S-dagger gate.
    pub fn sdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Sdg, qubit))
    }

    /// Apply T gate.
    pub fn t(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::T, qubit))
    }

    /// Apply T-dagger gate.
    pub fn tdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Tdg, qubit))
    }

    /// Apply sqrt(X) gate.
    pub fn sx(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::SX, qubit))
    }

    /// Apply Rx rotation gate.
    pub fn rx(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Rx(theta), qubit))
    }

    /// Apply Ry rotation gate.
    pub fn ry(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Ry(theta), qubit))
    }

    /// Apply Rz rotation gate.
    pub fn rz(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Rz(theta), qubit))
    }

    // =========================================================================
    // Multi-qubit gates
    // =========================================================================

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(StandardGate::CX, control, target))
    }

    /// Apply CY gate.
    pub fn cy(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(StandardGate::CY, control, target))
    }

    /// Apply CZ gate.
    pub fn cz(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(StandardGate::CZ, control, target))
    }

    /// Apply SWAP gate.
    pub fn swap(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(StandardGate::Swap, q1, q2))
    }

    /// Apply Toffoli (CCX) gate.
    pub fn ccx(&mut self, c1: QubitId, c2: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::gate(StandardGate::CCX, [c1, c2, target]))
    }

    /// Apply an arbitrary gate.
    pub fn gate(
        &mut self,
        gate: impl Into<Gate>,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        self.apply(Instruction::gate(gate, qubits))
    }

    /// Apply `gate` with probability `p` in each repetition.
    pub fn with_probability(
        &mut self,
        gate: StandardGate,
        qubits: impl IntoIterator<Item = QubitId>,
        p: f64,
    ) -> IrResult<&mut Self> {
        self.apply(Instruction::gate(
            Gate::standard(gate).with_probability(p),
            qubits,
        ))
    }

    // =========================================================================
    // Noise, measurement and barriers
    // =========================================================================

    /// Apply a single-qubit noise channel.
    pub fn channel(&mut self, model: NoiseModel, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::channel(model, qubit))
    }

    /// Measure `qubits` and store the outcomes under `key`.
    pub fn measure(
        &mut self,
        qubits: impl IntoIterator<Item = QubitId>,
        key: impl Into<String>,
    ) -> IrResult<&mut Self> {
        self.apply(Instruction::measure(qubits, key))
    }

    /// Measure every qubit under one key.
    pub fn measure_all(&mut self, key: impl Into<String>) -> IrResult<&mut Self> {
        self.measure(QubitId::range(self.num_qubits), key)
    }

    /// Add a barrier on specific qubits.
    pub fn barrier(&mut self, qubits: impl IntoIterator<Item = QubitId>) -> IrResult<&mut Self> {
        self.apply(Instruction::barrier(qubits))
    }

    /// Add a barrier on all qubits.
    pub fn barrier_all(&mut self) -> IrResult<&mut Self> {
        self.barrier(QubitId::range(self.num_qubits))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits as usize
    }

    /// Get the instructions in insertion order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Number of instructions.
    pub fn num_ops(&self) -> usize {
        self.instructions.len()
    }

    /// Measurement keys in first-use order.
    pub fn measurement_keys(&self) -> &[String] {
        &self.measurement_keys
    }

    /// True if any instruction is a stochastic gate or a noise channel.
    pub fn is_noisy(&self) -> bool {
        self.instructions.iter().any(|inst| {
            inst.is_channel() || inst.as_gate().is_some_and(Gate::is_stochastic)
        })
    }

    /// Group instructions into moments, earliest placement first.
    ///
    /// A multi-qubit instruction occupies every wire between its lowest and
    /// highest operand, so its diagram connector never crosses another
    /// operation in the same moment.
    pub fn moments(&self) -> Vec<Moment<'_>> {
        let mut next_free = vec![0usize; self.num_qubits as usize];
        let mut moments: Vec<Moment<'_>> = vec![];

        for inst in &self.instructions {
            let Some((lo, hi)) = inst.qubit_span() else {
                continue;
            };
            let wires = lo as usize..=hi as usize;
            let slot = wires.clone().map(|w| next_free[w]).max().unwrap_or(0);
            if slot == moments.len() {
                moments.push(Moment { operations: vec![] });
            }
            moments[slot].operations.push(inst);
            for w in wires {
                next_free[w] = slot + 1;
            }
        }
        moments
    }

    /// Get the circuit depth (number of moments).
    pub fn depth(&self) -> usize {
        self.moments().len()
    }

    // =========================================================================
    // Pre-built circuits
    // =========================================================================

    /// Create a Bell state circuit measured under key `result`.
    pub fn bell() -> IrResult<Self> {
        let mut circuit = Self::with_size("bell", 2);
        circuit
            .h(QubitId(0))?
            .cx(QubitId(0), QubitId(1))?
            .measure_all("result")?;
        Ok(circuit)
    }

    /// Create a GHZ state circuit measured under key `result`.
    pub fn ghz(n: u32) -> IrResult<Self> {
        if n == 0 {
            return Ok(Self::new("ghz_0"));
        }

        let mut circuit = Self::with_size("ghz", n);
        circuit.h(QubitId(0))?;
        for i in 0..n - 1 {
            circuit.cx(QubitId(i), QubitId(i + 1))?;
        }
        circuit.measure_all("result")?;
        Ok(circuit)
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&diagram::render(self))
    }
}
