//! Time evolution of kets and density matrices.
//!
//! # Schrödinger equation
//!
//!   dψ/dt = -i H ψ
//!
//! used for ket input when no collapse operators are given.
//!
//! # Lindblad master equation
//!
//!   dρ/dt = -i (H ρ − ρ H†) + Σ_k ( L_k ρ L_k† − ½ {L_k† L_k, ρ} )
//!
//! used for density-matrix input or whenever collapse operators are given.
//! Writing the coherent part as `Hρ − ρH†` instead of `[H, ρ]` keeps the two
//! paths consistent when `H` is not Hermitian.
//!
//! Both equations are integrated with classic fourth-order Runge-Kutta at a
//! fixed step between consecutive output times.

use ndarray::{Array, Array1, Array2, Dimension};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::{DynamicsError, DynamicsResult};
use crate::operator::Operator;
use crate::state::{State, expect};

const MINUS_I: Complex64 = Complex64::new(0.0, -1.0);

/// Integrator settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverOptions {
    /// Minimum RK4 steps between two output times.
    pub substeps: usize,
    /// Upper bound on a single RK4 step.
    pub max_step: f64,
    /// Rescale each stored state to unit norm (unit trace) before
    /// expectation values are taken. The integration itself is unaffected.
    pub normalize_output: bool,
    /// Keep the state at every output time in the result.
    pub store_states: bool,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            substeps: 10,
            max_step: 0.01,
            normalize_output: true,
            store_states: false,
        }
    }
}

impl SolverOptions {
    fn validate(&self) -> DynamicsResult<()> {
        if self.substeps == 0 {
            return Err(DynamicsError::InvalidOptions(
                "substeps must be at least 1".into(),
            ));
        }
        if !(self.max_step.is_finite() && self.max_step > 0.0) {
            return Err(DynamicsError::InvalidOptions(format!(
                "max_step must be a positive number, got {}",
                self.max_step
            )));
        }
        Ok(())
    }

    /// Number of RK4 steps needed to cover `dt`.
    fn steps_for(&self, dt: f64) -> usize {
        let bounded = (dt / self.max_step).ceil();
        // dt / max_step is finite and non-negative after validation
        self.substeps.max(bounded as usize)
    }
}

/// Output of [`Evolution::solve`].
#[derive(Debug, Clone)]
pub struct EvolutionResult {
    /// The requested output times.
    pub times: Vec<f64>,
    /// One series per expectation operator, one value per output time.
    pub expect: Vec<Vec<Complex64>>,
    /// States at each output time, if requested.
    pub states: Option<Vec<State>>,
}

impl EvolutionResult {
    /// Real parts of the `index`-th expectation series.
    pub fn real_expect(&self, index: usize) -> DynamicsResult<Vec<f64>> {
        self.expect
            .get(index)
            .map(|series| series.iter().map(|c| c.re).collect())
            .ok_or(DynamicsError::MissingExpectation {
                index,
                count: self.expect.len(),
            })
    }
}

/// Time-evolution solver for a fixed Hamiltonian and collapse operators.
#[derive(Debug, Clone)]
pub struct Evolution {
    hamiltonian: Operator,
    c_ops: Vec<Operator>,
    options: SolverOptions,
}

impl Evolution {
    /// Solver for `hamiltonian` with no dissipation and default options.
    pub fn new(hamiltonian: Operator) -> Self {
        Self {
            hamiltonian,
            c_ops: Vec::new(),
            options: SolverOptions::default(),
        }
    }

    /// Add collapse operators.
    #[must_use]
    pub fn with_collapse(mut self, c_ops: impl IntoIterator<Item = Operator>) -> Self {
        self.c_ops.extend(c_ops);
        self
    }

    /// Replace the solver options.
    #[must_use]
    pub fn with_options(mut self, options: SolverOptions) -> Self {
        self.options = options;
        self
    }

    /// The solver options in effect.
    pub fn options(&self) -> &SolverOptions {
        &self.options
    }

    /// Evolve `initial` and record `e_ops` at every entry of `times`.
    ///
    /// The first output time is the initial time; the state is reported
    /// there without evolution.
    #[instrument(skip_all, fields(dim = self.hamiltonian.dim(), n_times = times.len()))]
    pub fn solve(
        &self,
        initial: &State,
        times: &[f64],
        e_ops: &[Operator],
    ) -> DynamicsResult<EvolutionResult> {
        self.validate(initial, times, e_ops)?;

        let solver = if self.c_ops.is_empty() && initial.is_ket() {
            "schrodinger"
        } else {
            "lindblad"
        };
        debug!(
            solver,
            n_c_ops = self.c_ops.len(),
            n_e_ops = e_ops.len(),
            "starting time evolution"
        );

        let mut result = EvolutionResult {
            times: times.to_vec(),
            expect: vec![Vec::with_capacity(times.len()); e_ops.len()],
            states: self.options.store_states.then(Vec::new),
        };

        match initial {
            State::Ket(psi) if self.c_ops.is_empty() => {
                let mut psi = psi.clone();
                self.record(&mut result, State::Ket(psi.clone()), e_ops)?;
                for pair in times.windows(2) {
                    psi = self.integrate(psi, pair[1] - pair[0], |p| self.schrodinger_rhs(p));
                    self.record(&mut result, State::Ket(psi.clone()), e_ops)?;
                }
            }
            _ => {
                let mut rho = initial.to_density();
                self.record(&mut result, State::Density(rho.clone()), e_ops)?;
                for pair in times.windows(2) {
                    rho = self.integrate(rho, pair[1] - pair[0], |r| self.lindblad_rhs(r));
                    self.record(&mut result, State::Density(rho.clone()), e_ops)?;
                }
            }
        }

        debug!("time evolution finished");
        Ok(result)
    }

    fn validate(&self, initial: &State, times: &[f64], e_ops: &[Operator]) -> DynamicsResult<()> {
        self.options.validate()?;
        for c in &self.c_ops {
            self.hamiltonian.checked_dim(c, "collapse operator")?;
        }
        for e in e_ops {
            self.hamiltonian.checked_dim(e, "expectation operator")?;
        }
        if initial.dim() != self.hamiltonian.dim() {
            return Err(DynamicsError::DimensionMismatch {
                context: "initial state",
                expected: self.hamiltonian.dim(),
                got: initial.dim(),
            });
        }
        if times.is_empty() {
            return Err(DynamicsError::EmptyTimes);
        }
        if let Some(index) = times.windows(2).position(|w| w[1] < w[0]) {
            return Err(DynamicsError::UnsortedTimes {
                index: index + 1,
                prev: times[index],
                next: times[index + 1],
            });
        }
        Ok(())
    }

    fn record(
        &self,
        result: &mut EvolutionResult,
        state: State,
        e_ops: &[Operator],
    ) -> DynamicsResult<()> {
        let state = if self.options.normalize_output {
            state.unit()?
        } else {
            state
        };
        for (series, op) in result.expect.iter_mut().zip(e_ops) {
            series.push(expect(op, &state)?);
        }
        if let Some(states) = result.states.as_mut() {
            states.push(state);
        }
        Ok(())
    }

    /// Advance `y` by `dt` with RK4.
    fn integrate<D, F>(&self, mut y: Array<Complex64, D>, dt: f64, f: F) -> Array<Complex64, D>
    where
        D: Dimension,
        F: Fn(&Array<Complex64, D>) -> Array<Complex64, D>,
    {
        if dt == 0.0 {
            return y;
        }
        let steps = self.options.steps_for(dt);
        let h = dt / steps as f64;
        for _ in 0..steps {
            y = rk4_step(&y, h, &f);
        }
        y
    }

    fn schrodinger_rhs(&self, psi: &Array1<Complex64>) -> Array1<Complex64> {
        self.hamiltonian.apply(psi) * MINUS_I
    }

    fn lindblad_rhs(&self, rho: &Array2<Complex64>) -> Array2<Complex64> {
        let h = self.hamiltonian.matrix();
        let h_dag = self.hamiltonian.dag();
        let mut d = (h.dot(rho) - rho.dot(h_dag.matrix())) * MINUS_I;
        for c in &self.c_ops {
            let l = c.matrix();
            let l_dag = c.dag();
            let l_dag_l = l_dag.matrix().dot(l);
            d = d + l.dot(rho).dot(l_dag.matrix())
                - (l_dag_l.dot(rho) + rho.dot(&l_dag_l)) * Complex64::new(0.5, 0.0);
        }
        d
    }
}

fn rk4_step<D, F>(y: &Array<Complex64, D>, h: f64, f: &F) -> Array<Complex64, D>
where
    D: Dimension,
    F: Fn(&Array<Complex64, D>) -> Array<Complex64, D>,
{
    let k1 = f(y);
    let k2 = f(&(y + &(&k1 * (h / 2.0))));
    let k3 = f(&(y + &(&k2 * (h / 2.0))));
    let k4 = f(&(y + &(&k3 * h)));
    y + &((k1 + &(k2 * 2.0) + &(k3 * 2.0) + &k4) * (h / 6.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| start + (stop - start) * i as f64 / (n - 1) as f64)
            .collect()
    }

    #[test]
    fn test_rabi_oscillation() {
        let times = linspace(0.0, 3.0, 31);
        let result = Evolution::new(Operator::sigmax())
            .solve(&State::basis(2, 0).unwrap(), &times, &[Operator::sigmaz()])
            .unwrap();

        let z = result.real_expect(0).unwrap();
        for (t, v) in times.iter().zip(&z) {
            assert!((v - (2.0 * t).cos()).abs() < 1e-6, "t={t}: {v}");
        }
    }

    #[test]
    fn test_real_expect_out_of_range() {
        let result = Evolution::new(Operator::sigmax())
            .solve(&State::basis(2, 0).unwrap(), &[0.0, 1.0], &[Operator::sigmaz()])
            .unwrap();
        assert_eq!(result.real_expect(0).unwrap().len(), 2);
        assert!(matches!(
            result.real_expect(1),
            Err(DynamicsError::MissingExpectation { index: 1, count: 1 })
        ));
    }

    #[test]
    fn test_first_output_is_initial_state() {
        let result = Evolution::new(Operator::sigmaz())
            .with_options(SolverOptions {
                store_states: true,
                ..SolverOptions::default()
            })
            .solve(&State::basis(2, 1).unwrap(), &[0.5, 1.0], &[])
            .unwrap();
        let states = result.states.unwrap();
        assert_eq!(states.len(), 2);
        assert_eq!(states[0], State::basis(2, 1).unwrap());
    }

    #[test]
    fn test_rejects_unsorted_times() {
        let err = Evolution::new(Operator::sigmax())
            .solve(&State::basis(2, 0).unwrap(), &[0.0, 2.0, 1.0], &[])
            .unwrap_err();
        assert!(matches!(err, DynamicsError::UnsortedTimes { index: 2, .. }));
    }

    #[test]
    fn test_rejects_empty_times() {
        let err = Evolution::new(Operator::sigmax())
            .solve(&State::basis(2, 0).unwrap(), &[], &[])
            .unwrap_err();
        assert!(matches!(err, DynamicsError::EmptyTimes));
    }

    #[test]
    fn test_rejects_bad_options() {
        let err = Evolution::new(Operator::sigmax())
            .with_options(SolverOptions {
                substeps: 0,
                ..SolverOptions::default()
            })
            .solve(&State::basis(2, 0).unwrap(), &[0.0, 1.0], &[])
            .unwrap_err();
        assert!(matches!(err, DynamicsError::InvalidOptions(_)));
    }

    #[test]
    fn test_rejects_mismatched_collapse() {
        let err = Evolution::new(Operator::sigmax())
            .with_collapse([Operator::identity(3)])
            .solve(&State::basis(2, 0).unwrap(), &[0.0, 1.0], &[])
            .unwrap_err();
        assert!(matches!(
            err,
            DynamicsError::DimensionMismatch {
                context: "collapse operator",
                ..
            }
        ));
    }

    #[test]
    fn test_steps_for_respects_max_step() {
        let opts = SolverOptions {
            max_step: 0.25,
            ..SolverOptions::default()
        };
        assert_eq!(opts.steps_for(2.0), 10);
        assert_eq!(opts.steps_for(5.0), 20);
    }
}
