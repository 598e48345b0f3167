//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - an interactive journey into Majorana-based quantum computing",
        style("QuantumSim Explorer").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qsx-ir        Circuit representation and diagrams");
    println!("  qsx-sim       Seeded statevector sampler");
    println!("  qsx-dynamics  Operators and time evolution");
    println!("  qsx-learn     Random-forest error prediction");
    println!("  qsx-demos     Explorer experiments");
    println!("  qsx-cli       Command-line interface");
    println!();
    println!(
        "Repository: {}",
        style(env!("CARGO_PKG_REPOSITORY")).underlined()
    );
    println!("License:    {}", style(env!("CARGO_PKG_LICENSE")).dim());
}
