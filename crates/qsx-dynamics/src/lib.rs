//! `qsx-dynamics`: small-dimension operator algebra and time evolution.
//!
//! Provides dense complex [`Operator`]s, [`State`]s (kets and density
//! matrices), expectation values, and an [`Evolution`] solver that
//! integrates either the Schrödinger equation or the Lindblad master
//! equation with fixed-step RK4.
//!
//! # Quick start
//!
//! ```rust
//! use qsx_dynamics::{Evolution, Operator, State};
//!
//! // Rabi oscillation: H = σx, ψ(0) = |0⟩, ⟨σz⟩(t) = cos 2t
//! let times: Vec<f64> = (0..=10).map(|i| i as f64 * 0.1).collect();
//! let result = Evolution::new(Operator::sigmax())
//!     .solve(&State::basis(2, 0).unwrap(), &times, &[Operator::sigmaz()])
//!     .unwrap();
//!
//! let z = result.real_expect(0).unwrap();
//! assert!((z[10] - 2.0_f64.cos()).abs() < 1e-6);
//! ```

pub mod error;
pub mod evolution;
pub mod operator;
pub mod state;

pub use error::{DynamicsError, DynamicsResult};
pub use evolution::{Evolution, EvolutionResult, SolverOptions};
pub use operator::Operator;
pub use state::{State, expect};
