//! Classification metrics.

use ndarray::ArrayView1;

use crate::error::{LearnError, LearnResult};

/// Fraction of positions where `truth` and `predicted` agree, in `[0, 1]`.
pub fn accuracy_score(truth: ArrayView1<'_, u8>, predicted: ArrayView1<'_, u8>) -> LearnResult<f64> {
    if truth.len() != predicted.len() {
        return Err(LearnError::ShapeMismatch {
            context: "accuracy inputs",
            expected: truth.len(),
            got: predicted.len(),
        });
    }
    if truth.is_empty() {
        return Err(LearnError::EmptyDataset);
    }
    let hits = truth.iter().zip(predicted.iter()).filter(|(a, b)| a == b).count();
    Ok(hits as f64 / truth.len() as f64)
}

/// Accuracy of always predicting the most frequent label of `truth`.
pub fn majority_baseline(truth: ArrayView1<'_, u8>) -> LearnResult<f64> {
    if truth.is_empty() {
        return Err(LearnError::EmptyDataset);
    }
    let mut counts = [0usize; 256];
    for &label in truth {
        counts[label as usize] += 1;
    }
    let top = counts.iter().copied().max().unwrap_or(0);
    Ok(top as f64 / truth.len() as f64)
}
