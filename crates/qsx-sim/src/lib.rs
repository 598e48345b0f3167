//! QuantumSim Explorer Statevector Simulator
//!
//! Samples small [`qsx_ir::Circuit`]s exactly, one repetition at a time,
//! from a seeded random generator. Noise is handled as quantum
//! trajectories: every stochastic gate and noise channel makes one random
//! choice per repetition, so the recorded bits follow the same statistics as
//! the mixed-state evolution.
//!
//! # Performance
//!
//! | Qubits | Memory | Simulation Speed |
//! |--------|--------|------------------|
//! | 10 | ~16 KB | Instant |
//! | 15 | ~512 KB | Fast |
//! | 20 | ~16 MB | Moderate |
//!
//! # Example
//!
//! ```rust
//! use qsx_ir::{Circuit, QubitId, StandardGate};
//! use qsx_sim::Simulator;
//!
//! let q = QubitId(0);
//! let mut circuit = Circuit::with_size("noise", 1);
//! circuit
//!     .h(q).unwrap()
//!     .with_probability(StandardGate::X, [q], 0.3).unwrap()
//!     .measure([q], "result").unwrap();
//!
//! let result = Simulator::new().with_seed(42).run(&circuit, 10).unwrap();
//! assert_eq!(result.repetitions(), 10);
//! println!("{}", result.array_string("result").unwrap());
//! ```

pub mod error;
mod result;
mod simulator;
mod statevector;

pub use error::{SimError, SimResult};
pub use result::{BitTable, RunResult};
pub use simulator::{DEFAULT_MAX_QUBITS, DEFAULT_SEED, Simulator};
pub use statevector::Statevector;
