//! Bell state preparation and sampling.

use std::collections::BTreeMap;

use qsx_ir::Circuit;
use qsx_sim::{RunResult, Simulator};
use tracing::info;

use crate::config::ExplorerConfig;
use crate::error::{ExplorerError, ExplorerResult};

const EXPERIMENT: &str = "bell";

/// Output of [`bell_state`].
#[derive(Debug, Clone)]
pub struct BellReport {
    pub circuit: Circuit,
    pub result: RunResult,
    /// Bitstring counts, qubit 0 leftmost.
    pub histogram: BTreeMap<String, usize>,
}

impl BellReport {
    /// `bits: count` lines in bitstring order.
    pub fn histogram_text(&self) -> String {
        self.histogram
            .iter()
            .map(|(bits, count)| format!("{bits}: {count}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Build `(|00⟩ + |11⟩)/√2` and sample it.
pub fn bell_state(config: &ExplorerConfig) -> ExplorerResult<BellReport> {
    let circuit = Circuit::bell().map_err(ExplorerError::circuit(EXPERIMENT))?;
    let key = circuit
        .measurement_keys()
        .first()
        .cloned()
        .unwrap_or_default();
    let result = Simulator::new()
        .with_seed(config.seed)
        .run(&circuit, config.bell.repetitions)
        .map_err(ExplorerError::simulation(EXPERIMENT))?;
    let histogram = result
        .histogram(&key)
        .map_err(ExplorerError::simulation(EXPERIMENT))?;

    info!(repetitions = config.bell.repetitions, "Ran Bell state simulation");
    Ok(BellReport {
        circuit,
        result,
        histogram,
    })
}
