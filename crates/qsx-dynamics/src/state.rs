//! Pure and mixed quantum states.

use ndarray::{Array1, Array2};
use num_complex::Complex64;

use crate::error::{DynamicsError, DynamicsResult};
use crate::operator::Operator;

/// A state vector or a density matrix.
#[derive(Debug, Clone, PartialEq)]
pub enum State {
    /// Pure state `|ψ⟩`.
    Ket(Array1<Complex64>),
    /// Density matrix `ρ`.
    Density(Array2<Complex64>),
}

impl State {
    /// Basis ket `|n⟩` in a `dim`-dimensional space.
    pub fn basis(dim: usize, n: usize) -> DynamicsResult<Self> {
        if n >= dim {
            return Err(DynamicsError::BasisOutOfRange { index: n, dim });
        }
        let mut v = Array1::zeros(dim);
        v[n] = Complex64::new(1.0, 0.0);
        Ok(State::Ket(v))
    }

    /// Ket from raw amplitudes, not normalised.
    pub fn ket(amplitudes: impl IntoIterator<Item = Complex64>) -> Self {
        State::Ket(amplitudes.into_iter().collect())
    }

    /// Hilbert-space dimension.
    pub fn dim(&self) -> usize {
        match self {
            State::Ket(v) => v.len(),
            State::Density(rho) => rho.nrows(),
        }
    }

    /// True for a pure-state ket.
    pub fn is_ket(&self) -> bool {
        matches!(self, State::Ket(_))
    }

    /// `‖ψ‖` for kets, `Tr ρ` (real part) for density matrices.
    pub fn norm(&self) -> f64 {
        match self {
            State::Ket(v) => v.iter().map(Complex64::norm_sqr).sum::<f64>().sqrt(),
            State::Density(rho) => rho.diag().sum().re,
        }
    }

    /// Trace of the density matrix, or `⟨ψ|ψ⟩` for a ket.
    pub fn trace(&self) -> Complex64 {
        match self {
            State::Ket(v) => Complex64::new(v.iter().map(Complex64::norm_sqr).sum(), 0.0),
            State::Density(rho) => rho.diag().sum(),
        }
    }

    /// The state scaled to unit norm (unit trace for density matrices).
    pub fn unit(&self) -> DynamicsResult<Self> {
        let norm = self.norm();
        if norm.abs() < f64::EPSILON {
            return Err(DynamicsError::ZeroNorm);
        }
        Ok(match self {
            State::Ket(v) => State::Ket(v / Complex64::new(norm, 0.0)),
            State::Density(rho) => State::Density(rho / Complex64::new(norm, 0.0)),
        })
    }

    /// `|ψ⟩⟨ψ|` for kets; density matrices are returned unchanged.
    pub fn to_density(&self) -> Array2<Complex64> {
        match self {
            State::Ket(v) => {
                let n = v.len();
                Array2::from_shape_fn((n, n), |(r, c)| v[r] * v[c].conj())
            }
            State::Density(rho) => rho.clone(),
        }
    }
}

/// Expectation value of `op` in `state`.
///
/// Kets give `⟨ψ|O|ψ⟩` without dividing by `⟨ψ|ψ⟩`; density matrices give
/// `Tr(Oρ)`. Non-Hermitian operators produce complex values.
pub fn expect(op: &Operator, state: &State) -> DynamicsResult<Complex64> {
    if op.dim() != state.dim() {
        return Err(DynamicsError::DimensionMismatch {
            context: "expectation value",
            expected: op.dim(),
            got: state.dim(),
        });
    }
    Ok(match state {
        State::Ket(psi) => psi
            .iter()
            .zip(op.apply(psi).iter())
            .map(|(a, b)| a.conj() * b)
            .sum(),
        State::Density(rho) => op.matrix().dot(rho).diag().sum(),
    })
}
