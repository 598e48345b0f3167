//! Full tour of the explorer.

use anyhow::Result;

use qsx_demos::experiments::{GateChoice, NoiseKind};
use qsx_demos::topics::{self, BasicsTab};
use qsx_demos::{ExplorerConfig, print_info};

use super::{basics, bell, error_correction, gate, majorana, noise};

/// Execute the all command.
pub fn execute(config: &ExplorerConfig) -> Result<()> {
    for tab in [BasicsTab::Qubits, BasicsTab::Compare, BasicsTab::Applications] {
        basics::execute(tab, None, true);
    }

    majorana::execute(config, true)?;

    for kind in NoiseKind::ALL {
        noise::execute(config, Some(kind), kind == NoiseKind::Pauli)?;
    }
    for choice in GateChoice::ALL {
        gate::execute(choice);
    }
    bell::execute(config)?;

    error_correction::execute(config, true)?;

    println!();
    print_info(&topics::footer().replace('\n', " - "));
    Ok(())
}
