//! Single-qubit noise sampling.

use std::fmt;

use clap::ValueEnum;
use qsx_ir::{Circuit, IrResult, NoiseModel, QubitId, StandardGate};
use qsx_sim::{RunResult, Simulator};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::ExplorerConfig;
use crate::error::{ExplorerError, ExplorerResult};

const EXPERIMENT: &str = "noise";

/// Measurement key used by every noise circuit.
pub const RESULT_KEY: &str = "result";

/// Noise source applied after the qubit is put into superposition.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum NoiseKind {
    /// Stochastic X (p = 0.3) followed by stochastic Z (p = 0.2).
    #[default]
    Pauli,
    /// Phase damping, γ = 0.2.
    Dephasing,
    /// Amplitude damping, γ = 0.3.
    AmplitudeDamping,
    /// Generalized amplitude damping, p = 0.1, γ = 0.3.
    Thermal,
}

impl NoiseKind {
    /// All kinds, in menu order.
    pub const ALL: [NoiseKind; 4] = [
        NoiseKind::Pauli,
        NoiseKind::Dephasing,
        NoiseKind::AmplitudeDamping,
        NoiseKind::Thermal,
    ];
}

impl fmt::Display for NoiseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NoiseKind::Pauli => "Pauli",
            NoiseKind::Dephasing => "Dephasing",
            NoiseKind::AmplitudeDamping => "Amplitude Damping",
            NoiseKind::Thermal => "Thermal",
        };
        f.write_str(name)
    }
}

/// Output of [`simulate_noise`].
#[derive(Debug, Clone)]
pub struct NoiseReport {
    pub kind: NoiseKind,
    /// `Measurement results: [[..] ..]`
    pub text: String,
    pub circuit: Circuit,
    pub result: RunResult,
}

/// `H`, then the noise of `kind`, then a measurement under [`RESULT_KEY`].
pub fn noise_circuit(kind: NoiseKind) -> IrResult<Circuit> {
    let q = QubitId(0);
    let mut circuit = Circuit::with_size(format!("noise_{kind:?}").to_lowercase(), 1);
    circuit.h(q)?;
    match kind {
        NoiseKind::Pauli => {
            circuit
                .with_probability(StandardGate::X, [q], 0.3)?
                .with_probability(StandardGate::Z, [q], 0.2)?;
        }
        NoiseKind::Dephasing => {
            circuit.channel(NoiseModel::PhaseDamping { gamma: 0.2 }, q)?;
        }
        NoiseKind::AmplitudeDamping => {
            circuit.channel(NoiseModel::AmplitudeDamping { gamma: 0.3 }, q)?;
        }
        NoiseKind::Thermal => {
            circuit.channel(NoiseModel::GeneralizedAmplitudeDamping { p: 0.1, gamma: 0.3 }, q)?;
        }
    }
    circuit.measure([q], RESULT_KEY)?;
    Ok(circuit)
}

/// Sample the noise circuit of `kind` with the configured seed and
/// repetition count.
pub fn simulate_noise(kind: NoiseKind, config: &ExplorerConfig) -> ExplorerResult<NoiseReport> {
    let circuit = noise_circuit(kind).map_err(ExplorerError::circuit(EXPERIMENT))?;
    let result = Simulator::new()
        .with_seed(config.seed)
        .run(&circuit, config.noise.repetitions)
        .map_err(ExplorerError::simulation(EXPERIMENT))?;
    let text = format!(
        "Measurement results: {}",
        result
            .array_string(RESULT_KEY)
            .map_err(ExplorerError::simulation(EXPERIMENT))?
    );

    info!(kind = %kind, repetitions = config.noise.repetitions, "Ran {kind} noise simulation");
    Ok(NoiseReport {
        kind,
        text,
        circuit,
        result,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pauli_circuit_diagram() {
        let circuit = noise_circuit(NoiseKind::Pauli).unwrap();
        assert_eq!(
            circuit.to_string(),
            "0: ───H───X[p=0.3]───Z[p=0.2]───M('result')───"
        );
    }

    #[test]
    fn test_every_kind_is_noisy() {
        for kind in NoiseKind::ALL {
            let circuit = noise_circuit(kind).unwrap();
            assert!(circuit.is_noisy(), "{kind}");
            assert_eq!(circuit.measurement_keys(), [RESULT_KEY.to_string()]);
        }
    }

    #[test]
    fn test_report_shape() {
        let report = simulate_noise(NoiseKind::Pauli, &ExplorerConfig::default()).unwrap();
        assert!(report.text.starts_with("Measurement results: [["));
        assert!(report.text.ends_with("]]"));
        assert_eq!(report.text.matches('[').count(), 11);
        assert_eq!(report.result.repetitions(), 10);
    }

    #[test]
    fn test_same_seed_same_text() {
        let config = ExplorerConfig::default();
        for kind in NoiseKind::ALL {
            let a = simulate_noise(kind, &config).unwrap();
            let b = simulate_noise(kind, &config).unwrap();
            assert_eq!(a.text, b.text);
        }
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(NoiseKind::AmplitudeDamping.to_string(), "Amplitude Damping");
        let parsed: NoiseKind = serde_yaml_ng::from_str("amplitude-damping").unwrap();
        assert_eq!(parsed, NoiseKind::AmplitudeDamping);
    }
}
