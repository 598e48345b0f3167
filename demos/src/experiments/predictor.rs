//! Random-forest prediction of bit and phase flips.

use qsx_learn::{ForestParams, RandomForest, accuracy_score, error_patterns, train_test_split};
use tracing::info;

use crate::config::ExplorerConfig;
use crate::error::{ExplorerError, ExplorerResult};

const EXPERIMENT: &str = "predictor";

/// Output of [`train_predictor`].
#[derive(Debug, Clone, PartialEq)]
pub struct PredictorReport {
    /// Held-out accuracy of the bit-flip label, in `[0, 1]`.
    pub bit_flip_accuracy: f64,
    /// Held-out accuracy of the phase-flip label, in `[0, 1]`.
    pub phase_flip_accuracy: f64,
    pub n_train: usize,
    pub n_test: usize,
    /// `Model trained. Accuracy: BitFlip a%, PhaseFlip b%`
    pub message: String,
}

/// Generate the synthetic dataset, train the forest on the training split
/// and score it on the held-out rows.
pub fn train_predictor(config: &ExplorerConfig) -> ExplorerResult<PredictorReport> {
    let p = &config.predictor;
    let learn = ExplorerError::learn;

    let data = error_patterns(p.samples, config.seed).map_err(learn(EXPERIMENT))?;
    let split = train_test_split(&data, p.test_size, config.seed).map_err(learn(EXPERIMENT))?;

    let mut model = RandomForest::new(ForestParams {
        n_estimators: p.n_estimators,
        seed: config.seed,
        ..ForestParams::default()
    });
    model
        .fit(split.train.features().view(), split.train.targets().view())
        .map_err(learn(EXPERIMENT))?;

    let predicted = model
        .predict(split.test.features().view())
        .map_err(learn(EXPERIMENT))?;
    let truth = split.test.targets();
    let bit_flip_accuracy =
        accuracy_score(truth.column(0), predicted.column(0)).map_err(learn(EXPERIMENT))?;
    let phase_flip_accuracy =
        accuracy_score(truth.column(1), predicted.column(1)).map_err(learn(EXPERIMENT))?;

    let message = format!(
        "Model trained. Accuracy: BitFlip {:.1}%, PhaseFlip {:.1}%",
        bit_flip_accuracy * 100.0,
        phase_flip_accuracy * 100.0
    );
    info!(
        bit_flip_accuracy,
        phase_flip_accuracy,
        n_estimators = p.n_estimators,
        "Trained ML model"
    );

    Ok(PredictorReport {
        bit_flip_accuracy,
        phase_flip_accuracy,
        n_train: split.train.n_samples(),
        n_test: split.test.n_samples(),
        message,
    })
}
