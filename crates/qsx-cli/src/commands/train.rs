//! Error prediction model training.

use std::time::Duration;

use anyhow::{Context, Result};

use qsx_demos::experiments::{PredictorReport, train_predictor};
use qsx_demos::{ExplorerConfig, create_progress_bar, print_result, print_section, print_success};

/// Train the model behind a progress bar and return its report.
pub fn train_with_progress(config: &ExplorerConfig) -> Result<PredictorReport> {
    let pb = create_progress_bar(100, "Training error prediction model");
    pb.enable_steady_tick(Duration::from_millis(100));
    let report = train_predictor(config);
    pb.set_position(100);
    pb.finish_and_clear();
    report.context("Error prediction training failed")
}

/// Execute the train command.
pub fn execute(config: &ExplorerConfig) -> Result<()> {
    print_section("Train Error Prediction Model");
    print_result("Samples", config.predictor.samples);
    print_result("Trees", config.predictor.n_estimators);

    let report = train_with_progress(config)?;
    print_result("Train / test", format!("{} / {}", report.n_train, report.n_test));
    print_success(&report.message);
    Ok(())
}
