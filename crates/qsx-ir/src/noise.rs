//! Noise channel types.
//!
//! A [`NoiseModel`] describes a single-qubit, completely positive
//! trace-preserving map through its Kraus operators. The simulator applies a
//! channel to a pure state by sampling one Kraus branch per repetition, so
//! averaging over repetitions reproduces the channel's action on the density
//! matrix.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};

/// A 2x2 Kraus operator in row-major order.
pub type KrausMatrix = [[Complex64; 2]; 2];

/// A single-qubit noise channel model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum NoiseModel {
    /// Bit-flip channel: applies X with probability `p`.
    BitFlip {
        /// Flip probability (0.0 to 1.0).
        p: f64,
    },

    /// Phase-flip channel: applies Z with probability `p`.
    PhaseFlip {
        /// Flip probability (0.0 to 1.0).
        p: f64,
    },

    /// Depolarizing channel: with probability `p`, applies one of X, Y, Z
    /// chosen uniformly.
    Depolarizing {
        /// Error probability (0.0 to 1.0).
        p: f64,
    },

    /// Amplitude damping: models energy relaxation (T1 decay).
    AmplitudeDamping {
        /// Damping parameter (0.0 to 1.0).
        gamma: f64,
    },

    /// Phase damping: models dephasing (T2 decay without energy loss).
    PhaseDamping {
        /// Dephasing parameter (0.0 to 1.0).
        gamma: f64,
    },

    /// Generalized amplitude damping: relaxation towards a thermal state.
    ///
    /// `p` is the weight of decay towards |0⟩; `1 - p` is the weight of
    /// thermal excitation towards |1⟩.
    GeneralizedAmplitudeDamping {
        /// Ground-state population of the bath (0.0 to 1.0).
        p: f64,
        /// Damping parameter (0.0 to 1.0).
        gamma: f64,
    },
}

impl NoiseModel {
    /// Get a human-readable name for this noise model.
    pub fn name(&self) -> &'static str {
        match self {
            NoiseModel::BitFlip { .. } => "bit_flip",
            NoiseModel::PhaseFlip { .. } => "phase_flip",
            NoiseModel::Depolarizing { .. } => "depolarizing",
            NoiseModel::AmplitudeDamping { .. } => "amplitude_damping",
            NoiseModel::PhaseDamping { .. } => "phase_damping",
            NoiseModel::GeneralizedAmplitudeDamping { .. } => "generalized_amplitude_damping",
        }
    }

    /// Get the primary error parameter of this noise model.
    pub fn error_param(&self) -> f64 {
        match self {
            NoiseModel::BitFlip { p }
            | NoiseModel::PhaseFlip { p }
            | NoiseModel::Depolarizing { p } => *p,
            NoiseModel::AmplitudeDamping { gamma }
            | NoiseModel::PhaseDamping { gamma }
            | NoiseModel::GeneralizedAmplitudeDamping { gamma, .. } => *gamma,
        }
    }

    /// Check that every parameter lies in `[0, 1]`.
    pub fn validate(&self) -> IrResult<()> {
        let params: &[f64] = match self {
            NoiseModel::GeneralizedAmplitudeDamping { p, gamma } => &[*p, *gamma],
            NoiseModel::BitFlip { p }
            | NoiseModel::PhaseFlip { p }
            | NoiseModel::Depolarizing { p } => std::slice::from_ref(p),
            NoiseModel::AmplitudeDamping { gamma } | NoiseModel::PhaseDamping { gamma } => {
                std::slice::from_ref(gamma)
            }
        };
        match params.iter().find(|v| !(0.0..=1.0).contains(*v)) {
            Some(&value) => Err(IrError::InvalidProbability {
                name: self.name().to_string(),
                value,
            }),
            None => Ok(()),
        }
    }

    /// Short symbol used in circuit diagrams, e.g. `BF(0.3)`.
    pub fn diagram_symbol(&self) -> String {
        match self {
            NoiseModel::BitFlip { p } => format!("BF({p})"),
            NoiseModel::PhaseFlip { p } => format!("PF({p})"),
            NoiseModel::Depolarizing { p } => format!("D({p})"),
            NoiseModel::AmplitudeDamping { gamma } => format!("AD({gamma})"),
            NoiseModel::PhaseDamping { gamma } => format!("PD({gamma})"),
            NoiseModel::GeneralizedAmplitudeDamping { p, gamma } => format!("GAD({p},{gamma})"),
        }
    }

    /// The Kraus operators `K_i` of this channel, with `Σ K_i† K_i = I`.
    pub fn kraus_operators(&self) -> Vec<KrausMatrix> {
        let zero = Complex64::new(0.0, 0.0);
        let re = |v: f64| Complex64::new(v, 0.0);
        let im = |v: f64| Complex64::new(0.0, v);

        match *self {
            NoiseModel::BitFlip { p } => vec![
                [[re((1.0 - p).sqrt()), zero], [zero, re((1.0 - p).sqrt())]],
                [[zero, re(p.sqrt())], [re(p.sqrt()), zero]],
            ],
            NoiseModel::PhaseFlip { p } => vec![
                [[re((1.0 - p).sqrt()), zero], [zero, re((1.0 - p).sqrt())]],
                [[re(p.sqrt()), zero], [zero, re(-p.sqrt())]],
            ],
            NoiseModel::Depolarizing { p } => {
                let s = (p / 3.0).sqrt();
                vec![
                    [[re((1.0 - p).sqrt()), zero], [zero, re((1.0 - p).sqrt())]],
                    [[zero, re(s)], [re(s), zero]],
                    [[zero, im(-s)], [im(s), zero]],
                    [[re(s), zero], [zero, re(-s)]],
                ]
            }
            NoiseModel::AmplitudeDamping { gamma } => vec![
                [[re(1.0), zero], [zero, re((1.0 - gamma).sqrt())]],
                [[zero, re(gamma.sqrt())], [zero, zero]],
            ],
            NoiseModel::PhaseDamping { gamma } => vec![
                [[re(1.0), zero], [zero, re((1.0 - gamma).sqrt())]],
                [[zero, zero], [zero, re(gamma.sqrt())]],
            ],
            NoiseModel::GeneralizedAmplitudeDamping { p, gamma } => {
                let sp = p.sqrt();
                let sq = (1.0 - p).sqrt();
                vec![
                    [[re(sp), zero], [zero, re(sp * (1.0 - gamma).sqrt())]],
                    [[zero, re(sp * gamma.sqrt())], [zero, zero]],
                    [[re(sq * (1.0 - gamma).sqrt()), zero], [zero, re(sq)]],
                    [[zero, zero], [re(sq * gamma.sqrt()), zero]],
                ]
            }
        }
    }
}

impl std::fmt::Display for NoiseModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NoiseModel::BitFlip { p } => write!(f, "bit_flip(p={p:.4})"),
            NoiseModel::PhaseFlip { p } => write!(f, "phase_flip(p={p:.4})"),
            NoiseModel::Depolarizing { p } => write!(f, "depolarizing(p={p:.4})"),
            NoiseModel::AmplitudeDamping { gamma } => {
                write!(f, "amplitude_damping(γ={gamma:.4})")
            }
            NoiseModel::PhaseDamping { gamma } => write!(f, "phase_damping(γ={gamma:.4})"),
            NoiseModel::GeneralizedAmplitudeDamping { p, gamma } => {
                write!(f, "generalized_amplitude_damping(p={p:.4}, γ={gamma:.4})")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_models() -> Vec<NoiseModel> {
        vec![
            NoiseModel::BitFlip { p: 0.3 },
            NoiseModel::PhaseFlip { p: 0.2 },
            NoiseModel::Depolarizing { p: 0.1 },
            NoiseModel::AmplitudeDamping { gamma: 0.3 },
            NoiseModel::PhaseDamping { gamma: 0.2 },
            NoiseModel::GeneralizedAmplitudeDamping { p: 0.1, gamma: 0.3 },
        ]
    }

    #[test]
    fn test_noise_model_names() {
        assert_eq!(NoiseModel::Depolarizing { p: 0.01 }.name(), "depolarizing");
        assert_eq!(
            NoiseModel::AmplitudeDamping { gamma: 0.02 }.name(),
            "amplitude_damping"
        );
        assert_eq!(NoiseModel::BitFlip { p: 0.05 }.name(), "bit_flip");
    }

    #[test]
    fn test_noise_model_display() {
        let m = NoiseModel::Depolarizing { p: 0.03 };
        assert_eq!(format!("{m}"), "depolarizing(p=0.0300)");
    }

    #[test]
    fn test_diagram_symbols() {
        assert_eq!(NoiseModel::BitFlip { p: 0.3 }.diagram_symbol(), "BF(0.3)");
        assert_eq!(
            NoiseModel::GeneralizedAmplitudeDamping { p: 0.1, gamma: 0.3 }.diagram_symbol(),
            "GAD(0.1,0.3)"
        );
    }

    #[test]
    fn test_kraus_completeness() {
        for model in all_models() {
            let kraus = model.kraus_operators();
            // Σ K† K
            let mut sum = [[Complex64::new(0.0, 0.0); 2]; 2];
            for k in &kraus {
                for (i, row) in sum.iter_mut().enumerate() {
                    for (j, cell) in row.iter_mut().enumerate() {
                        for m in 0..2 {
                            *cell += k[m][i].conj() * k[m][j];
                        }
                    }
                }
            }
            for (i, row) in sum.iter().enumerate() {
                for (j, cell) in row.iter().enumerate() {
                    let expected = if i == j { 1.0 } else { 0.0 };
                    assert!(
                        (cell - Complex64::new(expected, 0.0)).norm() < 1e-12,
                        "{} is not trace preserving",
                        model.name()
                    );
                }
            }
        }
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        assert!(NoiseModel::BitFlip { p: 0.5 }.validate().is_ok());
        assert!(NoiseModel::BitFlip { p: 1.5 }.validate().is_err());
        assert!(NoiseModel::AmplitudeDamping { gamma: -0.1 }.validate().is_err());
        assert!(
            NoiseModel::GeneralizedAmplitudeDamping { p: 0.5, gamma: 2.0 }
                .validate()
                .is_err()
        );
        assert!(NoiseModel::PhaseFlip { p: f64::NAN }.validate().is_err());
    }
}
