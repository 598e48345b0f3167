//! Statevector simulation engine.

use num_complex::Complex64;
use qsx_ir::{KrausMatrix, StandardGate};
use rand::Rng;
use std::f64::consts::PI;

/// Branch probabilities below this are treated as impossible.
const PROB_EPSILON: f64 = 1e-12;

/// A statevector representing a pure quantum state.
///
/// Qubit `k` is bit `k` of the basis index, so `|q1 q0⟩ = |10⟩` is index 2.
#[derive(Debug, Clone, PartialEq)]
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: usize,
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    pub fn new(num_qubits: usize) -> Self {
        let size = 1 << num_qubits;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); size];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// The amplitudes, indexed by basis state.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Squared norm of the state, 1 for a normalised state.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(Complex64::norm_sqr).sum()
    }

    /// Probability that `qubit` reads 1.
    pub fn probability_one(&self, qubit: usize) -> f64 {
        let mask = 1 << qubit;
        self.amplitudes
            .iter()
            .enumerate()
            .filter(|(i, _)| i & mask != 0)
            .map(|(_, a)| a.norm_sqr())
            .sum()
    }

    /// Apply a standard gate to the given qubits.
    ///
    /// Operand counts are checked when the gate enters a circuit, so the
    /// slice is assumed to match `gate.num_qubits()`.
    pub fn apply_gate(&mut self, gate: &StandardGate, qubits: &[usize]) {
        match *gate {
            // Single-qubit gates
            StandardGate::I => {}
            StandardGate::X => self.apply_x(qubits[0]),
            StandardGate::Y => self.apply_y(qubits[0]),
            StandardGate::Z => self.apply_z(qubits[0]),
            StandardGate::H => self.apply_h(qubits[0]),
            StandardGate::S => self.apply_phase(qubits[0], PI / 2.0),
            StandardGate::Sdg => self.apply_phase(qubits[0], -PI / 2.0),
            StandardGate::T => self.apply_phase(qubits[0], PI / 4.0),
            StandardGate::Tdg => self.apply_phase(qubits[0], -PI / 4.0),
            StandardGate::SX => self.apply_rx(qubits[0], PI / 2.0),
            StandardGate::Rx(theta) => self.apply_rx(qubits[0], theta),
            StandardGate::Ry(theta) => self.apply_ry(qubits[0], theta),
            StandardGate::Rz(theta) => self.apply_rz(qubits[0], theta),

            // Two-qubit gates
            StandardGate::CX => self.apply_cx(qubits[0], qubits[1]),
            StandardGate::CY => self.apply_cy(qubits[0], qubits[1]),
            StandardGate::CZ => self.apply_cz(qubits[0], qubits[1]),
            StandardGate::Swap => self.apply_swap(qubits[0], qubits[1]),

            // Three-qubit gates
            StandardGate::CCX => self.apply_ccx(qubits[0], qubits[1], qubits[2]),
        }
    }

    /// Apply a single-qubit channel by sampling one Kraus branch.
    ///
    /// Branch `i` is chosen with probability `‖K_i ψ‖²` and the state is
    /// renormalised afterwards. Returns the chosen branch index.
    pub fn apply_kraus<R: Rng>(&mut self, kraus: &[KrausMatrix], qubit: usize, rng: &mut R) -> usize {
        let weights: Vec<f64> = kraus.iter().map(|k| self.branch_weight(k, qubit)).collect();
        let r: f64 = rng.r#gen();

        let mut chosen = None;
        let mut cumulative = 0.0;
        for (i, w) in weights.iter().enumerate() {
            if *w < PROB_EPSILON {
                continue;
            }
            cumulative += w;
            chosen = Some(i);
            if r < cumulative {
                break;
            }
        }
        // Rounding can leave `r` just above the last cumulative weight; the
        // last possible branch absorbs it.
        let Some(index) = chosen else {
            return 0;
        };

        self.apply_matrix(&kraus[index], qubit);
        self.scale(1.0 / weights[index].sqrt());
        index
    }

    /// Projectively measure `qubits` in order, collapsing the state.
    ///
    /// Returns one bit per qubit.
    pub fn measure<R: Rng>(&mut self, qubits: &[usize], rng: &mut R) -> Vec<bool> {
        qubits
            .iter()
            .map(|&q| {
                let p1 = self.probability_one(q);
                let r: f64 = rng.r#gen();
                let outcome = r < p1;
                self.collapse(q, outcome, if outcome { p1 } else { 1.0 - p1 });
                outcome
            })
            .collect()
    }

    // =========================================================================
    // Channels and measurement
    // =========================================================================

    fn branch_weight(&self, k: &KrausMatrix, qubit: usize) -> f64 {
        let mask = 1 << qubit;
        let mut weight = 0.0;
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                let a = self.amplitudes[i];
                let b = self.amplitudes[i | mask];
                weight += (k[0][0] * a + k[0][1] * b).norm_sqr();
                weight += (k[1][0] * a + k[1][1] * b).norm_sqr();
            }
        }
        weight
    }

    fn apply_matrix(&mut self, m: &KrausMatrix, qubit: usize) {
        let mask = 1 << qubit;
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = m[0][0] * a + m[0][1] * b;
                self.amplitudes[j] = m[1][0] * a + m[1][1] * b;
            }
        }
    }

    fn collapse(&mut self, qubit: usize, outcome: bool, probability: f64) {
        let mask = 1 << qubit;
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if (i & mask != 0) != outcome {
                *amp = Complex64::new(0.0, 0.0);
            }
        }
        if probability > PROB_EPSILON {
            self.scale(1.0 / probability.sqrt());
        }
    }

    fn scale(&mut self, factor: f64) {
        for amp in &mut self.amplitudes {
            *amp *= factor;
        }
    }

    // =========================================================================
    // Single-qubit gate implementations
    // =========================================================================

    fn apply_x(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                let j = i | mask;
                self.amplitudes.swap(i, j);
            }
        }
    }

    fn apply_y(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        let i_val = Complex64::new(0.0, 1.0);
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                let j = i | mask;
                let tmp = self.amplitudes[i];
                self.amplitudes[i] = -i_val * self.amplitudes[j];
                self.amplitudes[j] = i_val * tmp;
            }
        }
    }

    fn apply_z(&mut self, qubit: usize) {
        self.apply_phase(qubit, PI);
    }

    fn apply_h(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = sqrt2_inv * (a + b);
                self.amplitudes[j] = sqrt2_inv * (a - b);
            }
        }
    }

    fn apply_phase(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let phase = Complex64::from_polar(1.0, theta);
        for i in 0..(1 << self.num_qubits) {
            if i & mask != 0 {
                self.amplitudes[i] *= phase;
            }
        }
    }

    fn apply_rx(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let c = (theta / 2.0).cos();
        let neg_i_s = Complex64::new(0.0, -(theta / 2.0).sin());
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = c * a + neg_i_s * b;
                self.amplitudes[j] = neg_i_s * a + c * b;
            }
        }
    }

    fn apply_ry(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = c * a - s * b;
                self.amplitudes[j] = s * a + c * b;
            }
        }
    }

    fn apply_rz(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let phase_0 = Complex64::from_polar(1.0, -theta / 2.0);
        let phase_1 = Complex64::from_polar(1.0, theta / 2.0);
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            *amp *= if i & mask == 0 { phase_0 } else { phase_1 };
        }
    }

    // =========================================================================
    // Multi-qubit gate implementations
    // =========================================================================

    fn apply_cx(&mut self, control: usize, target: usize) {
        let ctrl_mask = 1 << control;
        let tgt_mask = 1 << target;
        for i in 0..(1 << self.num_qubits) {
            if (i & ctrl_mask != 0) && (i & tgt_mask == 0) {
                self.amplitudes.swap(i, i | tgt_mask);
            }
        }
    }

    fn apply_cy(&mut self, control: usize, target: usize) {
        let ctrl_mask = 1 << control;
        let tgt_mask = 1 << target;
        let i_val = Complex64::new(0.0, 1.0);
        for i in 0..(1 << self.num_qubits) {
            if (i & ctrl_mask != 0) && (i & tgt_mask == 0) {
                let j = i | tgt_mask;
                let tmp = self.amplitudes[i];
                self.amplitudes[i] = -i_val * self.amplitudes[j];
                self.amplitudes[j] = i_val * tmp;
            }
        }
    }

    fn apply_cz(&mut self, control: usize, target: usize) {
        let both = (1 << control) | (1 << target);
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if i & both == both {
                *amp = -*amp;
            }
        }
    }

    fn apply_swap(&mut self, q1: usize, q2: usize) {
        let mask1 = 1 << q1;
        let mask2 = 1 << q2;
        for i in 0..(1 << self.num_qubits) {
            if (i & mask1 != 0) && (i & mask2 == 0) {
                let j = (i & !mask1) | mask2;
                self.amplitudes.swap(i, j);
            }
        }
    }

    fn apply_ccx(&mut self, c1: usize, c2: usize, target: usize) {
        let controls = (1 << c1) | (1 << c2);
        let tgt_mask = 1 << target;
        for i in 0..(1 << self.num_qubits) {
            if (i & controls == controls) && (i & tgt_mask == 0) {
                self.amplitudes.swap(i, i | tgt_mask);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qsx_ir::NoiseModel;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn approx_eq(a: Complex64, b: Complex64) -> bool {
        (a - b).norm() < 1e-10
    }

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    #[test]
    fn test_initial_state() {
        let sv = Statevector::new(2);
        assert!(approx_eq(sv.amplitudes[0], c(1.0, 0.0)));
        for amp in &sv.amplitudes[1..] {
            assert!(approx_eq(*amp, c(0.0, 0.0)));
        }
    }

    #[test]
    fn test_hadamard() {
        let mut sv = Statevector::new(1);
        sv.apply_gate(&StandardGate::H, &[0]);

        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        assert!(approx_eq(sv.amplitudes[0], c(sqrt2_inv, 0.0)));
        assert!(approx_eq(sv.amplitudes[1], c(sqrt2_inv, 0.0)));
    }

    #[test]
    fn test_bell_state() {
        let mut sv = Statevector::new(2);
        sv.apply_gate(&StandardGate::H, &[0]);
        sv.apply_gate(&StandardGate::CX, &[0, 1]);

        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        assert!(approx_eq(sv.amplitudes[0], c(sqrt2_inv, 0.0)));
        assert!(approx_eq(sv.amplitudes[1], c(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[2], c(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[3], c(sqrt2_inv, 0.0)));
    }

    #[test]
    fn test_little_endian_indexing() {
        let mut sv = Statevector::new(2);
        sv.apply_gate(&StandardGate::X, &[1]);
        assert!(approx_eq(sv.amplitudes[2], c(1.0, 0.0)));
    }

    #[test]
    fn test_t_gate_phase() {
        let mut sv = Statevector::new(1);
        sv.apply_gate(&StandardGate::X, &[0]);
        sv.apply_gate(&StandardGate::T, &[0]);
        let s = 1.0 / 2.0_f64.sqrt();
        assert!(approx_eq(sv.amplitudes[1], c(s, s)));
    }

    #[test]
    fn test_toffoli() {
        let mut sv = Statevector::new(3);
        sv.apply_gate(&StandardGate::X, &[0]);
        sv.apply_gate(&StandardGate::X, &[1]);
        sv.apply_gate(&StandardGate::CCX, &[0, 1, 2]);
        assert!(approx_eq(sv.amplitudes[0b111], c(1.0, 0.0)));
    }

    #[test]
    fn test_measure_collapses() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut sv = Statevector::new(2);
        sv.apply_gate(&StandardGate::H, &[0]);
        sv.apply_gate(&StandardGate::CX, &[0, 1]);

        let bits = sv.measure(&[0, 1], &mut rng);
        assert_eq!(bits[0], bits[1]);
        assert!((sv.norm_sqr() - 1.0).abs() < 1e-10);
        let index = usize::from(bits[0]) * 0b11;
        assert!(approx_eq(sv.amplitudes[index], c(1.0, 0.0)));
    }

    #[test]
    fn test_amplitude_damping_full_decay() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut sv = Statevector::new(1);
        sv.apply_gate(&StandardGate::X, &[0]);

        let kraus = NoiseModel::AmplitudeDamping { gamma: 1.0 }.kraus_operators();
        let branch = sv.apply_kraus(&kraus, 0, &mut rng);
        assert_eq!(branch, 1);
        assert!(approx_eq(sv.amplitudes[0], c(1.0, 0.0)));
    }

    #[test]
    fn test_kraus_keeps_norm() {
        let mut rng = StdRng::seed_from_u64(3);
        let kraus = NoiseModel::Depolarizing { p: 0.5 }.kraus_operators();
        let mut sv = Statevector::new(2);
        sv.apply_gate(&StandardGate::H, &[0]);
        for _ in 0..20 {
            sv.apply_kraus(&kraus, 0, &mut rng);
            sv.apply_kraus(&kraus, 1, &mut rng);
            assert!((sv.norm_sqr() - 1.0).abs() < 1e-10);
        }
    }
}
