//! Qubit addressing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a line qubit within a circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QubitId(pub u32);

impl QubitId {
    /// The qubit index as a `usize`, for addressing statevector bits.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Qubits `0..n` in order.
    pub fn range(n: u32) -> impl Iterator<Item = QubitId> {
        (0..n).map(QubitId)
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<u32> for QubitId {
    fn from(id: u32) -> Self {
        QubitId(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qubit_display() {
        assert_eq!(format!("{}", QubitId(0)), "q0");
        assert_eq!(format!("{}", QubitId(12)), "q12");
    }

    #[test]
    fn test_qubit_range() {
        let ids: Vec<_> = QubitId::range(3).collect();
        assert_eq!(ids, vec![QubitId(0), QubitId(1), QubitId(2)]);
        assert_eq!(ids[2].index(), 2);
    }
}
