//! QuantumSim Explorer Circuit Representation
//!
//! This crate provides the data structures the explorer's experiments use to
//! describe small quantum circuits before handing them to the simulator.
//!
//! # Core Components
//!
//! - **Qubits**: [`QubitId`] addresses a line qubit by index
//! - **Gates**: [`StandardGate`] for built-in gates (H, X, CX, etc.) and
//!   [`Gate`], which can additionally fire only with a given probability
//! - **Noise**: [`NoiseModel`] for single-qubit Kraus channels
//! - **Instructions**: [`Instruction`] combining an operation with its operands
//! - **Circuit**: [`Circuit`] high-level builder API and text diagram
//!
//! # Example: Building a Bell State
//!
//! ```rust
//! use qsx_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::with_size("bell_state", 2);
//!
//! // |00⟩ → (|00⟩ + |11⟩)/√2
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//! circuit.measure_all("result").unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.depth(), 3); // H, CX, measure
//! ```
//!
//! # Example: Stochastic Errors
//!
//! ```rust
//! use qsx_ir::{Circuit, NoiseModel, QubitId, StandardGate};
//!
//! let q = QubitId(0);
//! let mut circuit = Circuit::with_size("noisy", 1);
//! circuit
//!     .h(q).unwrap()
//!     .with_probability(StandardGate::X, [q], 0.3).unwrap()
//!     .channel(NoiseModel::PhaseDamping { gamma: 0.2 }, q).unwrap()
//!     .measure([q], "result").unwrap();
//!
//! println!("{circuit}");
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `H` | 1 | Hadamard gate |
//! | `X`, `Y`, `Z` | 1 | Pauli gates |
//! | `S`, `Sdg` | 1 | S and S-dagger gates |
//! | `T`, `Tdg` | 1 | T and T-dagger gates |
//! | `SX` | 1 | sqrt(X) gate |
//! | `Rx`, `Ry`, `Rz` | 1 | Rotation gates |
//! | `CX` | 2 | Controlled-NOT (CNOT) |
//! | `CY`, `CZ` | 2 | Controlled-Y and Controlled-Z |
//! | `Swap` | 2 | SWAP gate |
//! | `CCX` | 3 | Toffoli (CCNOT) gate |

pub mod circuit;
mod diagram;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod noise;
pub mod qubit;

pub use circuit::{Circuit, Moment};
pub use error::{IrError, IrResult};
pub use gate::{Gate, StandardGate};
pub use instruction::{Instruction, InstructionKind};
pub use noise::{KrausMatrix, NoiseModel};
pub use qubit::QubitId;
