//! Labelled datasets, the synthetic error-pattern generator and the
//! train/test split.

use ndarray::{Array1, Array2, ArrayView1, Axis};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::error::{LearnError, LearnResult};

/// Weights and threshold of the synthetic bit-flip label.
pub const BIT_FLIP_WEIGHTS: [f64; 3] = [0.3, -0.2, 0.1];
/// Threshold of the synthetic bit-flip label.
pub const BIT_FLIP_THRESHOLD: f64 = 0.2;
/// Weights of the synthetic phase-flip label.
pub const PHASE_FLIP_WEIGHTS: [f64; 3] = [-0.1, 0.4, 0.2];
/// Threshold of the synthetic phase-flip label.
pub const PHASE_FLIP_THRESHOLD: f64 = 0.3;

/// A feature matrix with one or more class-label columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    features: Array2<f64>,
    targets: Array2<u8>,
    feature_names: Vec<String>,
    target_names: Vec<String>,
}

impl Dataset {
    /// Build a dataset, checking that rows and names line up.
    pub fn new(
        features: Array2<f64>,
        targets: Array2<u8>,
        feature_names: Vec<String>,
        target_names: Vec<String>,
    ) -> LearnResult<Self> {
        if features.nrows() != targets.nrows() {
            return Err(LearnError::ShapeMismatch {
                context: "targets rows",
                expected: features.nrows(),
                got: targets.nrows(),
            });
        }
        if feature_names.len() != features.ncols() {
            return Err(LearnError::ShapeMismatch {
                context: "feature names",
                expected: features.ncols(),
                got: feature_names.len(),
            });
        }
        if target_names.len() != targets.ncols() {
            return Err(LearnError::ShapeMismatch {
                context: "target names",
                expected: targets.ncols(),
                got: target_names.len(),
            });
        }
        Ok(Self {
            features,
            targets,
            feature_names,
            target_names,
        })
    }

    /// Number of rows.
    pub fn n_samples(&self) -> usize {
        self.features.nrows()
    }

    /// The feature matrix, one row per sample.
    pub fn features(&self) -> &Array2<f64> {
        &self.features
    }

    /// The label matrix, one column per target.
    pub fn targets(&self) -> &Array2<u8> {
        &self.targets
    }

    /// Feature column names.
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Target column names.
    pub fn target_names(&self) -> &[String] {
        &self.target_names
    }

    /// Labels of the target called `name`.
    pub fn target(&self, name: &str) -> Option<ArrayView1<'_, u8>> {
        let column = self.target_names.iter().position(|n| n == name)?;
        Some(self.targets.column(column))
    }

    /// The rows at `indices`, in that order.
    pub fn select(&self, indices: &[usize]) -> Self {
        Self {
            features: self.features.select(Axis(0), indices),
            targets: self.targets.select(Axis(0), indices),
            feature_names: self.feature_names.clone(),
            target_names: self.target_names.clone(),
        }
    }
}

/// Synthetic single-qubit error data.
///
/// Features `X, Y, Z` are drawn uniformly from `[-1, 1)`. The `BitFlip` and
/// `PhaseFlip` labels are 1 when a fixed linear combination of the features
/// exceeds its threshold.
pub fn error_patterns(n_samples: usize, seed: u64) -> LearnResult<Dataset> {
    if n_samples == 0 {
        return Err(LearnError::EmptyDataset);
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let features = Array2::from_shape_simple_fn((n_samples, 3), || rng.gen_range(-1.0..1.0));

    let label = |weights: [f64; 3], threshold: f64| -> Array1<u8> {
        features.dot(&Array1::from(weights.to_vec())).mapv(|v| u8::from(v > threshold))
    };
    let bit_flip = label(BIT_FLIP_WEIGHTS, BIT_FLIP_THRESHOLD);
    let phase_flip = label(PHASE_FLIP_WEIGHTS, PHASE_FLIP_THRESHOLD);

    let mut targets = Array2::zeros((n_samples, 2));
    targets.column_mut(0).assign(&bit_flip);
    targets.column_mut(1).assign(&phase_flip);

    debug!(
        n_samples,
        bit_flips = bit_flip.iter().map(|&b| usize::from(b)).sum::<usize>(),
        phase_flips = phase_flip.iter().map(|&b| usize::from(b)).sum::<usize>(),
        "generated error patterns"
    );

    Dataset::new(
        features,
        targets,
        vec!["X".into(), "Y".into(), "Z".into()],
        vec!["BitFlip".into(), "PhaseFlip".into()],
    )
}

/// A train/test partition of a dataset.
#[derive(Debug, Clone)]
pub struct Split {
    /// Training rows.
    pub train: Dataset,
    /// Held-out rows.
    pub test: Dataset,
}

/// Shuffle the rows with `seed` and hold out `ceil(n * test_size)` of them.
pub fn train_test_split(data: &Dataset, test_size: f64, seed: u64) -> LearnResult<Split> {
    let n = data.n_samples();
    if n == 0 {
        return Err(LearnError::EmptyDataset);
    }
    let invalid = || LearnError::InvalidTestSize {
        test_size,
        n_samples: n,
    };
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(invalid());
    }
    let n_test = (n as f64 * test_size).ceil() as usize;
    if n_test == 0 || n_test >= n {
        return Err(invalid());
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.shuffle(&mut StdRng::seed_from_u64(seed));
    let (test_idx, train_idx) = order.split_at(n_test);

    debug!(n_train = train_idx.len(), n_test, seed, "split dataset");
    Ok(Split {
        train: data.select(train_idx),
        test: data.select(test_idx),
    })
}
