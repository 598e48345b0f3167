//! QuantumSim Explorer Error Prediction
//!
//! Generates the synthetic single-qubit error dataset, splits it, and
//! trains a multi-output random forest that predicts bit flips and phase
//! flips from the state features.
//!
//! # Example
//!
//! ```rust
//! use qsx_learn::{ForestParams, RandomForest, accuracy_score, error_patterns, train_test_split};
//!
//! let data = error_patterns(200, 42).unwrap();
//! let split = train_test_split(&data, 0.2, 42).unwrap();
//!
//! let mut forest = RandomForest::new(ForestParams { n_estimators: 10, ..Default::default() });
//! forest.fit(split.train.features().view(), split.train.targets().view()).unwrap();
//!
//! let pred = forest.predict(split.test.features().view()).unwrap();
//! let acc = accuracy_score(split.test.targets().column(0), pred.column(0)).unwrap();
//! assert!((0.0..=1.0).contains(&acc));
//! ```

pub mod dataset;
pub mod error;
pub mod forest;
pub mod metrics;
pub mod tree;

pub use dataset::{Dataset, Split, error_patterns, train_test_split};
pub use error::{LearnError, LearnResult};
pub use forest::{ForestParams, RandomForest};
pub use metrics::{accuracy_score, majority_baseline};
pub use tree::{DecisionTree, MaxFeatures, TreeParams};
