//! Informational pages.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// An illustration shown by reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Figure {
    pub caption: &'static str,
    pub url: &'static str,
}

impl Figure {
    fn render(&self) -> String {
        format!("[Figure] {}\n         {}", self.caption, self.url)
    }
}

pub const BLOCH_SPHERE: Figure = Figure {
    caption: "Bloch Sphere representation of a qubit state",
    url: "https://upload.wikimedia.org/wikipedia/commons/thumb/a/ad/Bloch_sphere.svg/1200px-Bloch_sphere.svg.png",
};

pub const MAJORANA_NANOWIRE: Figure = Figure {
    caption: "Majorana particles emerge at ends of nanowires in topological superconductors",
    url: "https://www.quantamagazine.org/wp-content/uploads/2020/06/Majorana-Quanta-1-1440x960.jpg",
};

pub const SURFACE_CODE: Figure = Figure {
    caption: "Surface code - a topological quantum error correcting code",
    url: "https://upload.wikimedia.org/wikipedia/commons/thumb/7/7a/Surface_code.svg/1200px-Surface_code.svg.png",
};

pub const BELL_CIRCUIT: Figure = Figure {
    caption: "Circuit creating an entangled Bell state",
    url: "https://upload.wikimedia.org/wikipedia/commons/thumb/5/5a/Bell-state-circuit.png/800px-Bell-state-circuit.png",
};

/// Tabs of the Quantum Basics page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum BasicsTab {
    #[default]
    Qubits,
    Compare,
    Applications,
}

/// Use cases listed on the Applications tab.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum UseCase {
    #[default]
    DrugDiscovery,
    FinancialModeling,
    Cryptography,
    MaterialScience,
}

impl UseCase {
    pub const ALL: [UseCase; 4] = [
        UseCase::DrugDiscovery,
        UseCase::FinancialModeling,
        UseCase::Cryptography,
        UseCase::MaterialScience,
    ];

    pub fn title(self) -> &'static str {
        match self {
            UseCase::DrugDiscovery => "Drug Discovery",
            UseCase::FinancialModeling => "Financial Modeling",
            UseCase::Cryptography => "Cryptography",
            UseCase::MaterialScience => "Material Science",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            UseCase::DrugDiscovery => {
                "Quantum computers can simulate molecular interactions at atomic scale"
            }
            UseCase::FinancialModeling => {
                "Portfolio optimization and risk analysis with quantum algorithms"
            }
            UseCase::Cryptography => {
                "Breaking current encryption (Shor's algorithm) and quantum-safe cryptography"
            }
            UseCase::MaterialScience => {
                "Designing new materials with specific properties like high-temperature superconductors"
            }
        }
    }
}

/// Text of a Quantum Basics tab. `use_case` only applies to the
/// Applications tab; when absent every use case is listed.
pub fn basics(tab: BasicsTab, use_case: Option<UseCase>, show_figure: bool) -> String {
    match tab {
        BasicsTab::Qubits => {
            let mut text = String::from(
                "What is a Qubit?\n\
                 - Basic unit of quantum information (like a classical bit)\n\
                 - Can be 0, 1, or any quantum superposition of these states\n\
                 - Exhibits quantum properties like entanglement and interference",
            );
            if show_figure {
                text.push_str("\n\n");
                text.push_str(&BLOCH_SPHERE.render());
            }
            text
        }
        BasicsTab::Compare => String::from(
            "Quantum vs Classical Computing\n\
             \n\
             Classical Bits\n\
             - Either 0 or 1\n\
             - Deterministic operations\n\
             - No entanglement\n\
             \n\
             Quantum Qubits\n\
             - Superposition of 0 and 1\n\
             - Probabilistic outcomes\n\
             - Entanglement possible\n\
             \n\
             Quantum advantage grows with problem complexity",
        ),
        BasicsTab::Applications => {
            let cases: Vec<UseCase> = match use_case {
                Some(case) => vec![case],
                None => UseCase::ALL.to_vec(),
            };
            let mut text = String::from("Real-world Applications");
            for case in cases {
                text.push_str(&format!("\n\n{}\n{}", case.title(), case.description()));
            }
            text
        }
    }
}

/// The Majorana Qubits page.
pub fn majorana_info() -> String {
    format!(
        "Majorana Fermion Qubits\n\
         \n\
         Majorana qubits are topological qubits based on exotic particles called Majorana fermions\n\
         that are their own antiparticles. They offer inherent protection against decoherence.\n\
         \n\
         How Majorana Qubits Work\n\
         1. Nanowire Setup: Semiconductor nanowire with strong spin-orbit coupling\n\
         2. Superconductivity: Proximity-coupled to a superconductor\n\
         3. Magnetic Field: Applied to create topological phase\n\
         4. Majoranas: Appear as zero-energy modes at wire ends\n\
         \n\
         {}\n\
         \n\
         Advantages\n\
         Topological Protection\n\
         - Errors require global changes\n\
         - More stable than conventional qubits\n\
         Scalability\n\
         - Braiding operations for gates\n\
         - Natural error resistance",
        MAJORANA_NANOWIRE.render()
    )
}

/// The Error Correction page introduction.
pub fn error_correction_intro() -> String {
    format!(
        "Quantum Error Correction\n\
         \n\
         Quantum error correction uses redundancy to protect quantum information\n\
         from errors due to decoherence and other quantum noise.\n\
         \n\
         Surface Code\n\
         {}",
        SURFACE_CODE.render()
    )
}

/// Footer text.
pub fn footer() -> String {
    format!(
        "QuantumSim Explorer v{}\nExplore the frontier of quantum computing!",
        env!("CARGO_PKG_VERSION")
    )
}
