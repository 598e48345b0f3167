//! Random-forest classifier over multi-output decision trees.

use ndarray::{Array2, ArrayView2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::error::{LearnError, LearnResult};
use crate::tree::{DecisionTree, MaxFeatures, TreeParams};

/// Forest hyper-parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForestParams {
    /// Number of trees.
    pub n_estimators: usize,
    /// Features considered per split.
    pub max_features: MaxFeatures,
    /// Maximum tree depth, unlimited when `None`.
    pub max_depth: Option<usize>,
    /// Nodes with fewer samples become leaves.
    pub min_samples_split: usize,
    /// Train each tree on a bootstrap resample of the training rows.
    pub bootstrap: bool,
    /// Seed for bootstrap draws and feature subsets.
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            max_features: MaxFeatures::Sqrt,
            max_depth: None,
            min_samples_split: 2,
            bootstrap: true,
            seed: 42,
        }
    }
}

/// An ensemble of decision trees voting by averaged class probabilities.
#[derive(Debug, Clone)]
pub struct RandomForest {
    params: ForestParams,
    trees: Vec<DecisionTree>,
    n_classes: Vec<usize>,
    n_features: usize,
}

impl RandomForest {
    /// Unfitted forest with the given parameters.
    pub fn new(params: ForestParams) -> Self {
        Self {
            params,
            trees: Vec::new(),
            n_classes: Vec::new(),
            n_features: 0,
        }
    }

    /// Set the number of trees.
    #[must_use]
    pub fn with_n_estimators(mut self, n_estimators: usize) -> Self {
        self.params.n_estimators = n_estimators;
        self
    }

    /// Set the seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.params.seed = seed;
        self
    }

    /// The parameters of this forest.
    pub fn params(&self) -> &ForestParams {
        &self.params
    }

    /// True once [`RandomForest::fit`] has succeeded.
    pub fn is_fitted(&self) -> bool {
        !self.trees.is_empty()
    }

    /// Fit on features `x` (samples x features) and labels `y`
    /// (samples x outputs).
    #[instrument(skip_all, fields(n_estimators = self.params.n_estimators, seed = self.params.seed))]
    pub fn fit(&mut self, x: ArrayView2<'_, f64>, y: ArrayView2<'_, u8>) -> LearnResult<()> {
        if self.params.n_estimators == 0 {
            return Err(LearnError::InvalidParameter {
                name: "n_estimators",
                reason: "must be at least 1".into(),
            });
        }
        let n = x.nrows();
        if n == 0 || x.ncols() == 0 || y.ncols() == 0 {
            return Err(LearnError::EmptyDataset);
        }
        if y.nrows() != n {
            return Err(LearnError::ShapeMismatch {
                context: "targets rows",
                expected: n,
                got: y.nrows(),
            });
        }

        let n_classes: Vec<usize> = y
            .columns()
            .into_iter()
            .map(|c| c.iter().copied().max().map_or(1, |m| m as usize + 1))
            .collect();
        let tree_params = TreeParams {
            max_depth: self.params.max_depth,
            min_samples_split: self.params.min_samples_split,
            max_features: self.params.max_features,
        };

        let mut master = StdRng::seed_from_u64(self.params.seed);
        let mut trees = Vec::with_capacity(self.params.n_estimators);
        for i in 0..self.params.n_estimators {
            let mut rng = StdRng::seed_from_u64(master.r#gen());
            let samples: Vec<usize> = if self.params.bootstrap {
                (0..n).map(|_| rng.gen_range(0..n)).collect()
            } else {
                (0..n).collect()
            };
            let tree = DecisionTree::fit(x, y, &samples, &n_classes, tree_params, &mut rng)?;
            debug!(tree = i, nodes = tree.node_count(), depth = tree.depth(), "grew tree");
            trees.push(tree);
        }

        info!(
            n_samples = n,
            n_features = x.ncols(),
            n_outputs = y.ncols(),
            "random forest fitted"
        );
        self.trees = trees;
        self.n_classes = n_classes;
        self.n_features = x.ncols();
        Ok(())
    }

    /// Averaged class probabilities: one `samples x classes` matrix per
    /// output.
    pub fn predict_proba(&self, x: ArrayView2<'_, f64>) -> LearnResult<Vec<Array2<f64>>> {
        if !self.is_fitted() {
            return Err(LearnError::NotFitted);
        }
        if x.ncols() != self.n_features {
            return Err(LearnError::ShapeMismatch {
                context: "feature count",
                expected: self.n_features,
                got: x.ncols(),
            });
        }

        let mut proba: Vec<Array2<f64>> = self
            .n_classes
            .iter()
            .map(|&k| Array2::zeros((x.nrows(), k)))
            .collect();
        for tree in &self.trees {
            for (r, row) in x.rows().into_iter().enumerate() {
                for (output, p) in tree.predict_proba_row(row)?.iter().enumerate() {
                    for (class, v) in p.iter().enumerate() {
                        proba[output][[r, class]] += v;
                    }
                }
            }
        }
        let scale = 1.0 / self.trees.len() as f64;
        for p in &mut proba {
            p.mapv_inplace(|v| v * scale);
        }
        Ok(proba)
    }

    /// Most probable class per sample and output (`samples x outputs`).
    ///
    /// Ties go to the lowest class label.
    pub fn predict(&self, x: ArrayView2<'_, f64>) -> LearnResult<Array2<u8>> {
        let proba = self.predict_proba(x)?;
        let mut out = Array2::zeros((x.nrows(), proba.len()));
        for (output, p) in proba.iter().enumerate() {
            for (r, row) in p.rows().into_iter().enumerate() {
                let mut best = 0;
                for (class, v) in row.iter().enumerate() {
                    if *v > row[best] {
                        best = class;
                    }
                }
                out[[r, output]] = best as u8;
            }
        }
        Ok(out)
    }
}

impl Default for RandomForest {
    fn default() -> Self {
        Self::new(ForestParams::default())
    }
}
