//! Majorana zero-mode dynamics in a single two-level system.
//!
//! The two Majorana operators are built from the qubit ladder operators,
//! `γ₁ = (σx + iσy)/2` and `γ₂ = (σx − iσy)/2`, and the model Hamiltonian is
//!
//!   H = −i·t·γ₁γ₂ + Δ·(γ₁γ₁† − γ₂γ₂†)
//!
//! with hopping `t` and pairing `Δ`. The first term is not Hermitian, so the
//! state loses norm over time; expectation values are reported on the
//! renormalised state.

use std::path::PathBuf;

use num_complex::Complex64;
use qsx_dynamics::{Evolution, EvolutionResult, Operator, State};
use tracing::{debug, info};

use crate::config::ExplorerConfig;
use crate::error::{ExplorerError, ExplorerResult};
use crate::plot::{FigureConfig, LineChart};

const EXPERIMENT: &str = "majorana";

const I: Complex64 = Complex64::new(0.0, 1.0);

/// Real parts of the tracked expectation values over time.
#[derive(Debug, Clone, PartialEq)]
pub struct MajoranaDynamics {
    pub times: Vec<f64>,
    pub gamma1: Vec<f64>,
    pub gamma2: Vec<f64>,
    pub sigma_z: Vec<f64>,
}

/// `(γ₁, γ₂)`.
pub fn majorana_operators() -> (Operator, Operator) {
    let gamma1 = (Operator::sigmax() + Operator::sigmay() * I) * 0.5;
    let gamma2 = (Operator::sigmax() - Operator::sigmay() * I) * 0.5;
    (gamma1, gamma2)
}

/// The model Hamiltonian for the configured hopping and pairing.
pub fn majorana_hamiltonian(config: &ExplorerConfig) -> Operator {
    let (gamma1, gamma2) = majorana_operators();
    let hopping = &gamma1 * &gamma2 * Complex64::new(0.0, -config.majorana.hopping);
    let pairing = (&gamma1 * &gamma1.dag() - &gamma2 * &gamma2.dag()) * config.majorana.pairing;
    hopping + pairing
}

/// `n` evenly spaced points from `start` to `stop`, both included.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => (0..n)
            .map(|i| start + (stop - start) * i as f64 / (n - 1) as f64)
            .collect(),
    }
}

/// Evolve `(|0⟩ + |1⟩)/√2` and record `⟨γ₁⟩`, `⟨γ₂⟩` and `⟨σz⟩`.
pub fn majorana_dynamics(config: &ExplorerConfig) -> ExplorerResult<MajoranaDynamics> {
    let m = &config.majorana;
    debug!(
        hopping = m.hopping,
        pairing = m.pairing,
        chemical_potential = m.chemical_potential,
        "majorana parameters"
    );

    let (gamma1, gamma2) = majorana_operators();
    let times = linspace(0.0, m.duration, m.points);
    let psi0 = State::ket([Complex64::new(1.0, 0.0), Complex64::new(1.0, 0.0)])
        .unit()
        .map_err(ExplorerError::dynamics(EXPERIMENT))?;

    let result = Evolution::new(majorana_hamiltonian(config))
        .solve(&psi0, &times, &[gamma1, gamma2, Operator::sigmaz()])
        .map_err(ExplorerError::dynamics(EXPERIMENT))?;

    Ok(MajoranaDynamics {
        gamma1: real_series(&result, 0)?,
        gamma2: real_series(&result, 1)?,
        sigma_z: real_series(&result, 2)?,
        times: result.times,
    })
}

fn real_series(result: &EvolutionResult, index: usize) -> ExplorerResult<Vec<f64>> {
    result
        .real_expect(index)
        .map_err(ExplorerError::dynamics(EXPERIMENT))
}

/// Run the Majorana simulation and write its plot.
///
/// Returns the path of the written SVG file,
/// `<plot_dir>/majorana_plot.svg`. The directory is created if needed and
/// an existing plot is overwritten.
pub fn simulate_majorana(config: &ExplorerConfig) -> ExplorerResult<PathBuf> {
    let dynamics = majorana_dynamics(config)?;

    let chart = LineChart::new("Majorana Fermion Dynamics", dynamics.times)
        .with_labels("Time", "Expectation Value")
        .with_series("Majorana γ₁", dynamics.gamma1)
        .with_series("Majorana γ₂", dynamics.gamma2)
        .with_series("Pauli Z", dynamics.sigma_z);

    let path = config.majorana_plot_path();
    chart.write_svg(&path, &FigureConfig::default())?;

    info!(path = %path.display(), "Ran Majorana simulation");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hamiltonian_is_diagonal() {
        let h = majorana_hamiltonian(&ExplorerConfig::default());
        let m = h.matrix();
        assert!((m[[0, 0]] - Complex64::new(0.5, -1.0)).norm() < 1e-12);
        assert!((m[[1, 1]] - Complex64::new(-0.5, 0.0)).norm() < 1e-12);
        assert!(m[[0, 1]].norm() < 1e-12 && m[[1, 0]].norm() < 1e-12);
        assert!(!h.is_hermitian(1e-12));
    }

    #[test]
    fn test_linspace() {
        let t = linspace(0.0, 10.0, 100);
        assert_eq!(t.len(), 100);
        assert_eq!(t[0], 0.0);
        assert!((t[99] - 10.0).abs() < 1e-12);
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(3.0, 1.0, 1), vec![3.0]);
    }

    #[test]
    fn test_dynamics_match_closed_form() {
        // Renormalised: ⟨σz⟩ = −tanh(t·τ), Re⟨γ₁⟩ = Re⟨γ₂⟩ = cos(2Δτ) / (2 cosh τ)
        let dynamics = majorana_dynamics(&ExplorerConfig::default()).unwrap();
        assert_eq!(dynamics.times.len(), 100);
        for (i, &tau) in dynamics.times.iter().enumerate() {
            assert!((dynamics.sigma_z[i] + tau.tanh()).abs() < 1e-6, "σz at {tau}");
            let gamma = tau.cos() / (2.0 * tau.cosh());
            assert!((dynamics.gamma1[i] - gamma).abs() < 1e-6, "γ₁ at {tau}");
            assert!((dynamics.gamma2[i] - gamma).abs() < 1e-6, "γ₂ at {tau}");
        }
    }

    #[test]
    fn test_missing_series_is_a_dynamics_error() {
        let result = EvolutionResult {
            times: vec![0.0, 1.0],
            expect: vec![vec![Complex64::new(1.0, 0.0); 2]],
            states: None,
        };
        assert_eq!(real_series(&result, 0).unwrap(), vec![1.0, 1.0]);
        let err = real_series(&result, 2).unwrap_err();
        assert!(matches!(err, ExplorerError::Dynamics { .. }));
        assert_eq!(err.experiment(), Some(EXPERIMENT));
    }
}
