//! Quantum Basics page.

use qsx_demos::topics::{self, BasicsTab, UseCase};
use qsx_demos::{print_header, print_section};

use super::common::print_block;

/// Execute the basics command.
pub fn execute(tab: BasicsTab, use_case: Option<UseCase>, figure: bool) {
    print_header("Quantum Computing Fundamentals");
    let title = match tab {
        BasicsTab::Qubits => "Qubits 101",
        BasicsTab::Compare => "Quantum vs Classical",
        BasicsTab::Applications => "Applications",
    };
    print_section(title);
    print_block(&topics::basics(tab, use_case, figure));
}
