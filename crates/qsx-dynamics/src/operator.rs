//! Square complex operators.
//!
//! An [`Operator`] wraps a dense `n x n` matrix. The arithmetic impls follow
//! ndarray's conventions and panic on mismatched dimensions; use
//! [`Operator::checked_dim`] when combining operators from untrusted input.
//!
//! # Example
//!
//! ```rust
//! use num_complex::Complex64;
//! use qsx_dynamics::Operator;
//!
//! // σ₊ = (σx + iσy)/2 maps |1⟩ to |0⟩
//! let i = Complex64::new(0.0, 1.0);
//! let sigma_plus = (Operator::sigmax() + Operator::sigmay() * i) * 0.5;
//! assert!(!sigma_plus.is_hermitian(1e-12));
//! assert!((sigma_plus.dag() * &sigma_plus).is_hermitian(1e-12));
//! ```

use ndarray::{Array1, Array2};
use num_complex::Complex64;
use std::ops::{Add, Mul, Neg, Sub};

use crate::error::{DynamicsError, DynamicsResult};

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);

/// A square complex matrix acting on a `dim`-dimensional Hilbert space.
#[derive(Debug, Clone, PartialEq)]
pub struct Operator(Array2<Complex64>);

impl Operator {
    /// Wrap a matrix, rejecting non-square shapes.
    pub fn new(matrix: Array2<Complex64>) -> DynamicsResult<Self> {
        let (rows, cols) = matrix.dim();
        if rows != cols {
            return Err(DynamicsError::NotSquare { rows, cols });
        }
        Ok(Self(matrix))
    }

    /// Build a 2x2 operator from rows.
    pub fn from_rows_2x2(rows: [[Complex64; 2]; 2]) -> Self {
        Self(Array2::from_shape_fn((2, 2), |(r, c)| rows[r][c]))
    }

    /// Pauli X.
    pub fn sigmax() -> Self {
        Self::from_rows_2x2([[ZERO, ONE], [ONE, ZERO]])
    }

    /// Pauli Y.
    pub fn sigmay() -> Self {
        Self::from_rows_2x2([[ZERO, -I], [I, ZERO]])
    }

    /// Pauli Z.
    pub fn sigmaz() -> Self {
        Self::from_rows_2x2([[ONE, ZERO], [ZERO, -ONE]])
    }

    /// Identity on a `dim`-dimensional space.
    pub fn identity(dim: usize) -> Self {
        Self(Array2::eye(dim))
    }

    /// Zero operator on a `dim`-dimensional space.
    pub fn zeros(dim: usize) -> Self {
        Self(Array2::zeros((dim, dim)))
    }

    /// Hilbert-space dimension.
    pub fn dim(&self) -> usize {
        self.0.nrows()
    }

    /// The underlying matrix.
    pub fn matrix(&self) -> &Array2<Complex64> {
        &self.0
    }

    /// Return `Ok(())` if `other` acts on the same space.
    pub fn checked_dim(&self, other: &Operator, context: &'static str) -> DynamicsResult<()> {
        if self.dim() == other.dim() {
            Ok(())
        } else {
            Err(DynamicsError::DimensionMismatch {
                context,
                expected: self.dim(),
                got: other.dim(),
            })
        }
    }

    /// Conjugate transpose.
    #[must_use]
    pub fn dag(&self) -> Self {
        Self(self.0.t().mapv(|c| c.conj()))
    }

    /// Tensor product `self ⊗ other`.
    #[must_use]
    pub fn kron(&self, other: &Operator) -> Self {
        let m = other.dim();
        Self(Array2::from_shape_fn((self.dim() * m, self.dim() * m), |(r, c)| {
            self.0[[r / m, c / m]] * other.0[[r % m, c % m]]
        }))
    }

    /// Commutator `[self, other] = self·other − other·self`.
    #[must_use]
    pub fn commutator(&self, other: &Operator) -> Self {
        &(self * other) - &(other * self)
    }

    /// Trace.
    pub fn trace(&self) -> Complex64 {
        self.0.diag().sum()
    }

    /// True if every entry matches its conjugate-transpose partner to `tol`.
    pub fn is_hermitian(&self, tol: f64) -> bool {
        let n = self.dim();
        (0..n).all(|r| (r..n).all(|c| (self.0[[r, c]] - self.0[[c, r]].conj()).norm() <= tol))
    }

    /// Matrix-vector product `O·v`.
    pub fn apply(&self, v: &Array1<Complex64>) -> Array1<Complex64> {
        self.0.dot(v)
    }
}

impl From<Operator> for Array2<Complex64> {
    fn from(op: Operator) -> Self {
        op.0
    }
}

impl Add<&Operator> for &Operator {
    type Output = Operator;

    fn add(self, rhs: &Operator) -> Operator {
        Operator(&self.0 + &rhs.0)
    }
}

impl Add for Operator {
    type Output = Operator;

    fn add(self, rhs: Operator) -> Operator {
        &self + &rhs
    }
}

impl Sub<&Operator> for &Operator {
    type Output = Operator;

    fn sub(self, rhs: &Operator) -> Operator {
        Operator(&self.0 - &rhs.0)
    }
}

impl Sub for Operator {
    type Output = Operator;

    fn sub(self, rhs: Operator) -> Operator {
        &self - &rhs
    }
}

/// Matrix product.
impl Mul<&Operator> for &Operator {
    type Output = Operator;

    fn mul(self, rhs: &Operator) -> Operator {
        Operator(self.0.dot(&rhs.0))
    }
}

impl Mul<&Operator> for Operator {
    type Output = Operator;

    fn mul(self, rhs: &Operator) -> Operator {
        &self * rhs
    }
}

impl Mul for Operator {
    type Output = Operator;

    fn mul(self, rhs: Operator) -> Operator {
        &self * &rhs
    }
}

impl Mul<Complex64> for &Operator {
    type Output = Operator;

    fn mul(self, rhs: Complex64) -> Operator {
        Operator(&self.0 * rhs)
    }
}

impl Mul<Complex64> for Operator {
    type Output = Operator;

    fn mul(self, rhs: Complex64) -> Operator {
        &self * rhs
    }
}

impl Mul<f64> for Operator {
    type Output = Operator;

    fn mul(self, rhs: f64) -> Operator {
        self * Complex64::new(rhs, 0.0)
    }
}

impl Neg for Operator {
    type Output = Operator;

    fn neg(self) -> Operator {
        Operator(-self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: &Operator, b: &Operator) {
        for (x, y) in a.matrix().iter().zip(b.matrix().iter()) {
            assert!((x - y).norm() < 1e-12, "{a:?} != {b:?}");
        }
    }

    #[test]
    fn test_paulis_are_hermitian() {
        for p in [Operator::sigmax(), Operator::sigmay(), Operator::sigmaz()] {
            assert!(p.is_hermitian(1e-12));
            assert_close(&(&p * &p), &Operator::identity(2));
        }
    }

    #[test]
    fn test_pauli_commutator() {
        // [σx, σy] = 2iσz
        let lhs = Operator::sigmax().commutator(&Operator::sigmay());
        let rhs = Operator::sigmaz() * Complex64::new(0.0, 2.0);
        assert_close(&lhs, &rhs);
    }

    #[test]
    fn test_dag_of_raising_is_lowering() {
        let plus = (Operator::sigmax() + Operator::sigmay() * I) * 0.5;
        let minus = (Operator::sigmax() - Operator::sigmay() * I) * 0.5;
        assert_close(&plus.dag(), &minus);
        assert_eq!(plus.matrix()[[0, 1]], ONE);
        assert_eq!(plus.matrix()[[1, 0]], ZERO);
    }

    #[test]
    fn test_kron_dimensions_and_entries() {
        let zz = Operator::sigmaz().kron(&Operator::sigmaz());
        assert_eq!(zz.dim(), 4);
        let diag: Vec<f64> = zz.matrix().diag().iter().map(|c| c.re).collect();
        assert_eq!(diag, vec![1.0, -1.0, -1.0, 1.0]);
    }

    #[test]
    fn test_new_rejects_non_square() {
        let m = Array2::<Complex64>::zeros((2, 3));
        assert!(matches!(
            Operator::new(m),
            Err(DynamicsError::NotSquare { rows: 2, cols: 3 })
        ));
    }

    #[test]
    fn test_checked_dim() {
        let a = Operator::identity(2);
        let b = Operator::identity(4);
        assert!(a.checked_dim(&a, "test").is_ok());
        assert!(matches!(
            a.checked_dim(&b, "test"),
            Err(DynamicsError::DimensionMismatch { expected: 2, got: 4, .. })
        ));
    }

    #[test]
    fn test_trace() {
        assert_eq!(Operator::identity(3).trace(), Complex64::new(3.0, 0.0));
        assert_eq!(Operator::sigmaz().trace(), ZERO);
    }
}
