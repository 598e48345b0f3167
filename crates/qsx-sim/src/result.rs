//! Sampled measurement records.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{SimError, SimResult};

/// Bits recorded for one measurement key: one row per repetition, one
/// column per measured qubit.
pub type BitTable = Vec<Vec<bool>>;

/// The outcome of running a circuit for a number of repetitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    repetitions: usize,
    records: FxHashMap<String, BitTable>,
}

impl RunResult {
    pub(crate) fn new(repetitions: usize) -> Self {
        Self {
            repetitions,
            records: FxHashMap::default(),
        }
    }

    pub(crate) fn push(&mut self, key: &str, bits: Vec<bool>) {
        self.records.entry(key.to_string()).or_default().push(bits);
    }

    /// Number of repetitions sampled.
    pub fn repetitions(&self) -> usize {
        self.repetitions
    }

    /// Measurement keys in sorted order.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.records.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// The bit table recorded under `key`.
    pub fn measurements(&self, key: &str) -> SimResult<&BitTable> {
        self.records
            .get(key)
            .ok_or_else(|| SimError::UnknownKey(key.to_string()))
    }

    /// The bits of one measured qubit across all repetitions.
    pub fn column(&self, key: &str, index: usize) -> SimResult<Vec<bool>> {
        Ok(self
            .measurements(key)?
            .iter()
            .filter_map(|row| row.get(index).copied())
            .collect())
    }

    /// Nested-bracket rendering of the table under `key`, one repetition per
    /// row:
    ///
    /// ```text
    /// [[1]
    ///  [0]]
    /// ```
    pub fn array_string(&self, key: &str) -> SimResult<String> {
        let rows: Vec<String> = self
            .measurements(key)?
            .iter()
            .map(|row| {
                let cells: Vec<&str> = row.iter().map(|&b| if b { "1" } else { "0" }).collect();
                format!("[{}]", cells.join(" "))
            })
            .collect();
        Ok(format!("[{}]", rows.join("\n ")))
    }

    /// Counts of each observed bitstring under `key`, qubit 0 leftmost.
    pub fn histogram(&self, key: &str) -> SimResult<BTreeMap<String, usize>> {
        let mut counts = BTreeMap::new();
        for row in self.measurements(key)? {
            *counts.entry(bitstring(row)).or_insert(0) += 1;
        }
        Ok(counts)
    }
}

fn bitstring(bits: &[bool]) -> String {
    bits.iter().map(|&b| if b { '1' } else { '0' }).collect()
}

impl fmt::Display for RunResult {
    /// One line per key: `key=<qubit 0 over reps>, <qubit 1 over reps>, …`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (n, key) in self.keys().into_iter().enumerate() {
            if n > 0 {
                writeln!(f)?;
            }
            let table = &self.records[key];
            let width = table.first().map_or(0, Vec::len);
            let columns: Vec<String> = (0..width)
                .map(|q| table.iter().map(|row| if row[q] { '1' } else { '0' }).collect())
                .collect();
            write!(f, "{key}={}", columns.join(", "))?;
        }
        Ok(())
    }
}
