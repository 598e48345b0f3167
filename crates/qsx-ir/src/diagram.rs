//! Text diagrams for circuits.
//!
//! One wire row per qubit, separated by connector rows that carry the
//! vertical lines of multi-qubit operations:
//!
//! ```text
//! 0: ───H───@───M('result')───
//!           │   │
//! 1: ───────X───M─────────────
//! ```

use crate::circuit::Circuit;

const WIRE: char = '─';
const GAP: &str = "───";

/// Render `circuit` as a multi-line text diagram.
pub(crate) fn render(circuit: &Circuit) -> String {
    let n = circuit.num_qubits();
    if n == 0 {
        return String::new();
    }

    let labels: Vec<String> = (0..n).map(|q| format!("{q}: ")).collect();
    let label_width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);

    // wires[q] is the wire row of qubit q, links[q] the connector row below it.
    let mut wires: Vec<String> = labels
        .iter()
        .map(|l| format!("{l:<label_width$}{GAP}"))
        .collect();
    let mut links: Vec<String> = vec![" ".repeat(label_width + GAP.chars().count()); n];

    for moment in circuit.moments() {
        let mut cells: Vec<Option<String>> = vec![None; n];
        let mut linked = vec![false; n];

        for inst in &moment.operations {
            for (qubit, symbol) in inst.qubits.iter().zip(inst.diagram_symbols()) {
                cells[qubit.index()] = Some(symbol);
            }
            if let Some((lo, hi)) = inst.qubit_span() {
                for q in lo as usize..hi as usize {
                    linked[q] = true;
                }
                for cell in cells.iter_mut().take(hi as usize).skip(lo as usize + 1) {
                    if cell.is_none() {
                        *cell = Some("┼".to_string());
                    }
                }
            }
        }

        let width = cells
            .iter()
            .flatten()
            .map(|s| s.chars().count())
            .max()
            .unwrap_or(1);

        for q in 0..n {
            let cell = cells[q].as_deref().unwrap_or("");
            let pad = width - cell.chars().count();
            wires[q].push_str(cell);
            wires[q].extend(std::iter::repeat_n(WIRE, pad));
            wires[q].push_str(GAP);

            let link = if linked[q] { "│" } else { " " };
            links[q].push_str(link);
            links[q].push_str(&" ".repeat(width - 1 + 3));
        }
    }

    let mut rows = Vec::with_capacity(2 * n - 1);
    for q in 0..n {
        rows.push(wires[q].clone());
        if q + 1 < n {
            rows.push(links[q].trim_end().to_string());
        }
    }
    rows.join("\n")
}

#[cfg(test)]
mod tests {
    use crate::{Circuit, QubitId, StandardGate};

    #[test]
    fn test_single_qubit_diagram() {
        let q = QubitId(0);
        let mut circuit = Circuit::with_size("noise", 1);
        circuit
            .h(q)
            .unwrap()
            .with_probability(StandardGate::X, [q], 0.3)
            .unwrap()
            .with_probability(StandardGate::Z, [q], 0.2)
            .unwrap()
            .measure([q], "result")
            .unwrap();

        assert_eq!(
            circuit.to_string(),
            "0: ───H───X[p=0.3]───Z[p=0.2]───M('result')───"
        );
    }

    #[test]
    fn test_bell_diagram() {
        let circuit = Circuit::bell().unwrap();
        let expected = [
            "0: ───H───@───M('result')───",
            "          │   │",
            "1: ───────X───M─────────────",
        ]
        .join("\n");
        assert_eq!(circuit.to_string(), expected);
    }

    #[test]
    fn test_crossing_wire() {
        let mut circuit = Circuit::with_size("span", 3);
        circuit.cx(QubitId(0), QubitId(2)).unwrap();
        let expected = [
            "0: ───@───",
            "      │",
            "1: ───┼───",
            "      │",
            "2: ───X───",
        ]
        .join("\n");
        assert_eq!(circuit.to_string(), expected);
    }

    #[test]
    fn test_empty_circuit() {
        assert_eq!(Circuit::new("empty").to_string(), "");
    }
}
