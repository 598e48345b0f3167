//! The explorer's experiments.
//!
//! Each experiment is a single function taking an [`ExplorerConfig`] and
//! returning a report or the path of a written file. Experiments share no
//! state; every random decision is driven by `ExplorerConfig::seed`.
//!
//! [`ExplorerConfig`]: crate::ExplorerConfig

pub mod bell;
pub mod error_correction;
pub mod gates;
pub mod majorana;
pub mod noise;
pub mod predictor;

pub use bell::{BellReport, bell_state};
pub use error_correction::{CorrectionReport, Syndrome, error_correction_demo};
pub use gates::{GateChoice, GateReport, apply_gate};
pub use majorana::{MajoranaDynamics, majorana_dynamics, simulate_majorana};
pub use noise::{NoiseKind, NoiseReport, simulate_noise};
pub use predictor::{PredictorReport, train_predictor};
