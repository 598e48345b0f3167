//! Integration tests for Schrödinger and Lindblad evolution.

use num_complex::Complex64;
use proptest::prelude::*;
use qsx_dynamics::{Evolution, Operator, SolverOptions, State, expect};

fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| start + (stop - start) * i as f64 / (n - 1) as f64)
        .collect()
}

fn plus_state() -> State {
    let s = 1.0 / 2.0_f64.sqrt();
    State::ket([Complex64::new(s, 0.0), Complex64::new(s, 0.0)])
}

#[test]
fn ket_and_density_paths_agree_without_dissipation() {
    let h = Operator::sigmax() * 0.7 + Operator::sigmaz() * 0.3;
    let times = linspace(0.0, 2.0, 21);
    let e_ops = [Operator::sigmax(), Operator::sigmay(), Operator::sigmaz()];

    let ket = Evolution::new(h.clone())
        .solve(&plus_state(), &times, &e_ops)
        .unwrap();
    let rho = Evolution::new(h)
        .solve(&State::Density(plus_state().to_density()), &times, &e_ops)
        .unwrap();

    for (a, b) in ket.expect.iter().flatten().zip(rho.expect.iter().flatten()) {
        assert!((a - b).norm() < 1e-8);
    }
}

#[test]
fn dephasing_decays_coherence() {
    // L = sqrt(γ/2) σz damps ⟨σx⟩ as exp(-γ t)
    let gamma = 0.5;
    let times = linspace(0.0, 4.0, 41);
    let result = Evolution::new(Operator::zeros(2))
        .with_collapse([Operator::sigmaz() * (gamma / 2.0_f64).sqrt()])
        .solve(&plus_state(), &times, &[Operator::sigmax(), Operator::sigmaz()])
        .unwrap();

    let x = result.real_expect(0).unwrap();
    let z = result.real_expect(1).unwrap();
    for (i, t) in times.iter().enumerate() {
        assert!((x[i] - (-gamma * t).exp()).abs() < 1e-6, "t={t}: {}", x[i]);
        assert!(z[i].abs() < 1e-10);
    }
}

#[test]
fn amplitude_damping_empties_excited_state() {
    // σ₊ = |0⟩⟨1| relaxes |1⟩ into |0⟩
    let relax = (Operator::sigmax() + Operator::sigmay() * Complex64::new(0.0, 1.0)) * 0.5;
    let times = linspace(0.0, 3.0, 31);
    let result = Evolution::new(Operator::zeros(2))
        .with_collapse([relax])
        .solve(&State::basis(2, 1).unwrap(), &times, &[Operator::sigmaz()])
        .unwrap();

    // ⟨σz⟩ = 1 − 2 e^{-t}
    let z = result.real_expect(0).unwrap();
    for (i, t) in times.iter().enumerate() {
        assert!((z[i] - (1.0 - 2.0 * (-t).exp())).abs() < 1e-6);
    }
}

#[test]
fn non_hermitian_norm_is_hidden_by_normalisation() {
    let h = Operator::sigmaz() * Complex64::new(0.0, -0.5);
    let times = linspace(0.0, 2.0, 5);
    let stored = SolverOptions {
        store_states: true,
        ..SolverOptions::default()
    };

    let normalised = Evolution::new(h.clone())
        .with_options(stored.clone())
        .solve(&plus_state(), &times, &[])
        .unwrap();
    for state in normalised.states.unwrap() {
        assert!((state.norm() - 1.0).abs() < 1e-12);
    }

    let raw = Evolution::new(h)
        .with_options(SolverOptions {
            normalize_output: false,
            ..stored
        })
        .solve(&plus_state(), &times, &[])
        .unwrap();
    let last = raw.states.unwrap().pop().unwrap();
    assert!((last.norm() - 1.0).abs() > 0.5);
}

proptest! {
    #[test]
    fn hermitian_evolution_preserves_norm(
        a in -2.0..2.0f64,
        b in -2.0..2.0f64,
        c in -2.0..2.0f64,
        t in 0.1..3.0f64,
    ) {
        let h = Operator::sigmax() * a + Operator::sigmay() * b + Operator::sigmaz() * c;
        let result = Evolution::new(h)
            .with_options(SolverOptions {
                normalize_output: false,
                store_states: true,
                ..SolverOptions::default()
            })
            .solve(&State::basis(2, 0).unwrap(), &[0.0, t], &[])
            .unwrap();
        let last = result.states.unwrap().pop().unwrap();
        prop_assert!((last.norm() - 1.0).abs() < 1e-6);
        let id = expect(&Operator::identity(2), &last).unwrap();
        prop_assert!((id.re - 1.0).abs() < 1e-6);
    }
}
