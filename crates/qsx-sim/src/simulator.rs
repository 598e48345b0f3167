//! Seeded circuit sampler.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;
use tracing::{debug, instrument, trace};

use qsx_ir::{Circuit, InstructionKind};

use crate::error::{SimError, SimResult};
use crate::result::RunResult;
use crate::statevector::Statevector;

/// Seed used when none is configured.
pub const DEFAULT_SEED: u64 = 42;

/// Largest circuit accepted by default.
pub const DEFAULT_MAX_QUBITS: u32 = 20;

/// Local statevector simulator.
///
/// Each repetition starts from |0...0⟩ and walks the circuit once.
/// Stochastic gates fire when a uniform draw falls below their probability,
/// noise channels sample one Kraus branch, and measurements collapse the
/// state. A single generator seeded at the start of [`Simulator::run`]
/// drives all of these decisions, so equal seeds give equal results.
#[derive(Debug, Clone)]
pub struct Simulator {
    seed: u64,
    max_qubits: u32,
}

impl Simulator {
    /// Create a simulator with the default seed and qubit limit.
    pub fn new() -> Self {
        Self {
            seed: DEFAULT_SEED,
            max_qubits: DEFAULT_MAX_QUBITS,
        }
    }

    /// Set the random seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the maximum number of qubits.
    #[must_use]
    pub fn with_max_qubits(mut self, max_qubits: u32) -> Self {
        self.max_qubits = max_qubits;
        self
    }

    /// The configured seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Sample `circuit` for `repetitions` repetitions.
    #[instrument(skip(self, circuit), fields(circuit = circuit.name(), seed = self.seed))]
    pub fn run(&self, circuit: &Circuit, repetitions: usize) -> SimResult<RunResult> {
        let num_qubits = circuit.num_qubits();
        if num_qubits > self.max_qubits as usize {
            return Err(SimError::CircuitTooLarge {
                got: num_qubits,
                max: self.max_qubits,
            });
        }
        if repetitions == 0 {
            return Err(SimError::ZeroRepetitions);
        }

        let start = Instant::now();
        debug!(
            "Starting simulation: {} qubits, {} instructions, {} repetitions",
            num_qubits,
            circuit.num_ops(),
            repetitions
        );

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut result = RunResult::new(repetitions);

        for rep in 0..repetitions {
            let mut sv = Statevector::new(num_qubits);
            for inst in circuit.instructions() {
                let qubits: Vec<usize> = inst.qubits.iter().map(|q| q.index()).collect();
                match &inst.kind {
                    InstructionKind::Gate(gate) => {
                        let fires = match gate.probability {
                            Some(p) => rng.r#gen::<f64>() < p,
                            None => true,
                        };
                        if fires {
                            sv.apply_gate(&gate.kind, &qubits);
                        } else {
                            trace!(rep, gate = gate.name(), "stochastic gate skipped");
                        }
                    }
                    InstructionKind::Channel(model) => {
                        let branch = sv.apply_kraus(&model.kraus_operators(), qubits[0], &mut rng);
                        trace!(rep, channel = model.name(), branch, "kraus branch sampled");
                    }
                    InstructionKind::Measure { key } => {
                        let bits = sv.measure(&qubits, &mut rng);
                        result.push(key, bits);
                    }
                    InstructionKind::Barrier => {}
                }
            }
        }

        debug!("Simulation completed in {:?}", start.elapsed());
        Ok(result)
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qsx_ir::{NoiseModel, QubitId, StandardGate};

    #[test]
    fn test_simulator_bell_state() {
        let circuit = Circuit::bell().unwrap();
        let result = Simulator::new().run(&circuit, 1000).unwrap();

        assert_eq!(result.repetitions(), 1000);
        let hist = result.histogram("result").unwrap();
        let correlated = hist.get("00").copied().unwrap_or(0) + hist.get("11").copied().unwrap_or(0);
        assert_eq!(correlated, 1000);
    }

    #[test]
    fn test_simulator_ghz_state() {
        let circuit = Circuit::ghz(3).unwrap();
        let result = Simulator::new().run(&circuit, 200).unwrap();

        let hist = result.histogram("result").unwrap();
        assert!(hist.keys().all(|k| k == "000" || k == "111"));
    }

    #[test]
    fn test_simulator_too_many_qubits() {
        let circuit = Circuit::with_size("test", 10);
        let result = Simulator::new().with_max_qubits(5).run(&circuit, 100);

        assert!(matches!(
            result,
            Err(SimError::CircuitTooLarge { got: 10, max: 5 })
        ));
    }

    #[test]
    fn test_zero_repetitions() {
        let circuit = Circuit::bell().unwrap();
        assert!(matches!(
            Simulator::new().run(&circuit, 0),
            Err(SimError::ZeroRepetitions)
        ));
    }

    #[test]
    fn test_certain_gate_always_fires() {
        let mut circuit = Circuit::with_size("certain", 1);
        circuit
            .with_probability(StandardGate::X, [QubitId(0)], 1.0)
            .unwrap()
            .measure([QubitId(0)], "m")
            .unwrap();
        let result = Simulator::new().run(&circuit, 50).unwrap();
        assert_eq!(result.column("m", 0).unwrap(), vec![true; 50]);
    }

    #[test]
    fn test_impossible_gate_never_fires() {
        let mut circuit = Circuit::with_size("never", 1);
        circuit
            .with_probability(StandardGate::X, [QubitId(0)], 0.0)
            .unwrap()
            .measure([QubitId(0)], "m")
            .unwrap();
        let result = Simulator::new().run(&circuit, 50).unwrap();
        assert_eq!(result.column("m", 0).unwrap(), vec![false; 50]);
    }

    #[test]
    fn test_same_seed_same_result() {
        let q = QubitId(0);
        let mut circuit = Circuit::with_size("noise", 1);
        circuit
            .h(q)
            .unwrap()
            .channel(NoiseModel::PhaseDamping { gamma: 0.2 }, q)
            .unwrap()
            .measure([q], "result")
            .unwrap();

        let a = Simulator::new().with_seed(9).run(&circuit, 64).unwrap();
        let b = Simulator::new().with_seed(9).run(&circuit, 64).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), b.to_string());
    }
}
