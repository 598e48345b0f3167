//! Multi-output CART decision trees.
//!
//! A single tree predicts every target column at once. Split quality is the
//! sum of the Gini impurities of all outputs, weighted by child size, and
//! thresholds are placed halfway between neighbouring distinct feature
//! values.

use ndarray::{ArrayView1, ArrayView2};
use rand::Rng;
use rand::seq::index;
use serde::{Deserialize, Serialize};

use crate::error::{LearnError, LearnResult};

/// How many features each split may look at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaxFeatures {
    /// `floor(sqrt(n_features))`, at least 1.
    Sqrt,
    /// `floor(log2(n_features))`, at least 1.
    Log2,
    /// Every feature.
    All,
    /// A fixed count, capped at the number of features.
    Count(usize),
}

impl MaxFeatures {
    /// Resolve to a concrete count for `n_features` features.
    pub fn resolve(self, n_features: usize) -> usize {
        let n = match self {
            MaxFeatures::Sqrt => (n_features as f64).sqrt() as usize,
            MaxFeatures::Log2 => (n_features as f64).log2() as usize,
            MaxFeatures::All => n_features,
            MaxFeatures::Count(k) => k,
        };
        n.clamp(1, n_features.max(1))
    }
}

/// Growth limits for a tree.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TreeParams {
    /// Maximum depth, unlimited when `None`.
    pub max_depth: Option<usize>,
    /// Nodes with fewer samples become leaves.
    pub min_samples_split: usize,
    /// Features considered per split.
    pub max_features: MaxFeatures,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            max_depth: None,
            min_samples_split: 2,
            max_features: MaxFeatures::All,
        }
    }
}

impl TreeParams {
    pub(crate) fn validate(&self) -> LearnResult<()> {
        if self.min_samples_split < 2 {
            return Err(LearnError::InvalidParameter {
                name: "min_samples_split",
                reason: format!("must be at least 2, got {}", self.min_samples_split),
            });
        }
        if let MaxFeatures::Count(0) = self.max_features {
            return Err(LearnError::InvalidParameter {
                name: "max_features",
                reason: "must be at least 1".into(),
            });
        }
        if self.max_depth == Some(0) {
            return Err(LearnError::InvalidParameter {
                name: "max_depth",
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
enum Node {
    Leaf {
        /// Class probabilities, one vector per output.
        proba: Vec<Vec<f64>>,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

/// Per-output class counts of a set of samples.
#[derive(Debug, Clone)]
struct ClassCounts {
    counts: Vec<Vec<usize>>,
    total: usize,
}

impl ClassCounts {
    fn new(n_classes: &[usize]) -> Self {
        Self {
            counts: n_classes.iter().map(|&k| vec![0; k]).collect(),
            total: 0,
        }
    }

    fn add(&mut self, labels: ArrayView1<'_, u8>) {
        for (output, &label) in labels.iter().enumerate() {
            self.counts[output][label as usize] += 1;
        }
        self.total += 1;
    }

    fn remove(&mut self, labels: ArrayView1<'_, u8>) {
        for (output, &label) in labels.iter().enumerate() {
            self.counts[output][label as usize] -= 1;
        }
        self.total -= 1;
    }

    /// Sum over outputs of `1 − Σ p_k²`.
    fn gini(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let n = self.total as f64;
        self.counts
            .iter()
            .map(|c| 1.0 - c.iter().map(|&k| (k as f64 / n).powi(2)).sum::<f64>())
            .sum()
    }

    fn proba(&self) -> Vec<Vec<f64>> {
        let n = self.total.max(1) as f64;
        self.counts
            .iter()
            .map(|c| c.iter().map(|&k| k as f64 / n).collect())
            .collect()
    }
}

/// A fitted multi-output decision tree.
#[derive(Debug, Clone)]
pub struct DecisionTree {
    params: TreeParams,
    nodes: Vec<Node>,
    n_features: usize,
}

struct Grower<'a, 'x, 'y, R> {
    x: ArrayView2<'x, f64>,
    y: ArrayView2<'y, u8>,
    n_classes: &'a [usize],
    params: TreeParams,
    n_try: usize,
    rng: &'a mut R,
    nodes: Vec<Node>,
}

impl DecisionTree {
    /// Grow a tree on the rows of `x`/`y` listed in `samples`.
    ///
    /// `samples` may repeat rows (bootstrap draws). `n_classes[j]` is the
    /// number of classes of output `j`; labels must be below it.
    pub fn fit<R: Rng>(
        x: ArrayView2<'_, f64>,
        y: ArrayView2<'_, u8>,
        samples: &[usize],
        n_classes: &[usize],
        params: TreeParams,
        rng: &mut R,
    ) -> LearnResult<Self> {
        params.validate()?;
        if samples.is_empty() {
            return Err(LearnError::EmptyDataset);
        }
        if x.nrows() != y.nrows() {
            return Err(LearnError::ShapeMismatch {
                context: "targets rows",
                expected: x.nrows(),
                got: y.nrows(),
            });
        }
        if n_classes.len() != y.ncols() {
            return Err(LearnError::ShapeMismatch {
                context: "class counts",
                expected: y.ncols(),
                got: n_classes.len(),
            });
        }

        let mut grower = Grower {
            x,
            y,
            n_classes,
            params,
            n_try: params.max_features.resolve(x.ncols()),
            rng,
            nodes: Vec::new(),
        };
        grower.grow(samples.to_vec(), 0);

        Ok(Self {
            params,
            nodes: grower.nodes,
            n_features: x.ncols(),
        })
    }

    /// Number of nodes, leaves included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Depth of the deepest leaf (a lone leaf has depth 0).
    pub fn depth(&self) -> usize {
        fn walk(nodes: &[Node], at: usize) -> usize {
            match &nodes[at] {
                Node::Leaf { .. } => 0,
                Node::Split { left, right, .. } => 1 + walk(nodes, *left).max(walk(nodes, *right)),
            }
        }
        walk(&self.nodes, 0)
    }

    /// The growth limits this tree was fitted with.
    pub fn params(&self) -> &TreeParams {
        &self.params
    }

    /// Class probabilities of one sample, one vector per output.
    pub fn predict_proba_row(&self, row: ArrayView1<'_, f64>) -> LearnResult<&[Vec<f64>]> {
        if row.len() != self.n_features {
            return Err(LearnError::ShapeMismatch {
                context: "feature count",
                expected: self.n_features,
                got: row.len(),
            });
        }
        let mut at = 0;
        loop {
            match &self.nodes[at] {
                Node::Leaf { proba } => return Ok(proba),
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    at = if row[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }
}

impl<R: Rng> Grower<'_, '_, '_, R> {
    /// Grow the subtree for `samples` and return its node index.
    fn grow(&mut self, samples: Vec<usize>, depth: usize) -> usize {
        let counts = self.counts_of(&samples);
        let at = self.nodes.len();
        self.nodes.push(Node::Leaf {
            proba: counts.proba(),
        });

        let depth_reached = self.params.max_depth.is_some_and(|d| depth >= d);
        if depth_reached || samples.len() < self.params.min_samples_split || counts.gini() <= 0.0 {
            return at;
        }

        let Some((feature, threshold)) = self.best_split(&samples, &counts) else {
            return at;
        };
        let (left_samples, right_samples): (Vec<usize>, Vec<usize>) = samples
            .iter()
            .copied()
            .partition(|&s| self.x[[s, feature]] <= threshold);

        let left = self.grow(left_samples, depth + 1);
        let right = self.grow(right_samples, depth + 1);
        self.nodes[at] = Node::Split {
            feature,
            threshold,
            left,
            right,
        };
        at
    }

    fn counts_of(&self, samples: &[usize]) -> ClassCounts {
        let mut counts = ClassCounts::new(self.n_classes);
        for &s in samples {
            counts.add(self.y.row(s));
        }
        counts
    }

    /// Lowest weighted child impurity over a random feature subset.
    fn best_split(&mut self, samples: &[usize], parent: &ClassCounts) -> Option<(usize, f64)> {
        let candidates = index::sample(&mut *self.rng, self.x.ncols(), self.n_try);
        let n = samples.len() as f64;
        let mut best: Option<(f64, usize, f64)> = None;

        for feature in candidates.iter() {
            let mut order = samples.to_vec();
            order.sort_by(|&a, &b| self.x[[a, feature]].total_cmp(&self.x[[b, feature]]));

            let mut left = ClassCounts::new(self.n_classes);
            let mut right = parent.clone();
            for i in 0..order.len() - 1 {
                left.add(self.y.row(order[i]));
                right.remove(self.y.row(order[i]));

                let lo = self.x[[order[i], feature]];
                let hi = self.x[[order[i + 1], feature]];
                if hi <= lo {
                    continue;
                }
                let score = (left.total as f64 * left.gini() + right.total as f64 * right.gini()) / n;
                if best.is_none_or(|(s, _, _)| score < s) {
                    let mut threshold = lo / 2.0 + hi / 2.0;
                    if threshold >= hi {
                        threshold = lo;
                    }
                    best = Some((score, feature, threshold));
                }
            }
        }
        best.map(|(_, feature, threshold)| (feature, threshold))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_max_features_resolve() {
        assert_eq!(MaxFeatures::Sqrt.resolve(3), 1);
        assert_eq!(MaxFeatures::Sqrt.resolve(16), 4);
        assert_eq!(MaxFeatures::Log2.resolve(8), 3);
        assert_eq!(MaxFeatures::All.resolve(5), 5);
        assert_eq!(MaxFeatures::Count(10).resolve(3), 3);
    }

    #[test]
    fn test_fits_separable_data_exactly() {
        let x = array![[0.0], [1.0], [2.0], [3.0]];
        let y = array![[0u8, 1], [0, 1], [1, 0], [1, 0]];
        let mut rng = StdRng::seed_from_u64(0);
        let tree = DecisionTree::fit(
            x.view(),
            y.view(),
            &[0, 1, 2, 3],
            &[2, 2],
            TreeParams::default(),
            &mut rng,
        )
        .unwrap();

        assert_eq!(tree.depth(), 1);
        assert_eq!(tree.node_count(), 3);
        let p = tree.predict_proba_row(array![1.4].view()).unwrap();
        assert_eq!(p[0], vec![1.0, 0.0]);
        assert_eq!(p[1], vec![0.0, 1.0]);
        let p = tree.predict_proba_row(array![1.6].view()).unwrap();
        assert_eq!(p[0], vec![0.0, 1.0]);
    }

    #[test]
    fn test_max_depth_limits_growth() {
        let x = array![[0.0], [1.0], [2.0], [3.0]];
        let y = array![[0u8], [1], [0], [1]];
        let mut rng = StdRng::seed_from_u64(0);
        let params = TreeParams {
            max_depth: Some(1),
            ..TreeParams::default()
        };
        let tree = DecisionTree::fit(x.view(), y.view(), &[0, 1, 2, 3], &[2], params, &mut rng).unwrap();
        assert_eq!(tree.depth(), 1);
    }

    #[test]
    fn test_constant_features_give_single_leaf() {
        let x = array![[1.0], [1.0], [1.0]];
        let y = array![[0u8], [1], [1]];
        let mut rng = StdRng::seed_from_u64(0);
        let tree = DecisionTree::fit(x.view(), y.view(), &[0, 1, 2], &[2], TreeParams::default(), &mut rng)
            .unwrap();
        assert_eq!(tree.node_count(), 1);
        let p = tree.predict_proba_row(array![1.0].view()).unwrap();
        assert!((p[0][1] - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_bad_params() {
        let x = array![[0.0]];
        let y = array![[0u8]];
        let mut rng = StdRng::seed_from_u64(0);
        let params = TreeParams {
            min_samples_split: 1,
            ..TreeParams::default()
        };
        assert!(matches!(
            DecisionTree::fit(x.view(), y.view(), &[0], &[1], params, &mut rng),
            Err(LearnError::InvalidParameter { name: "min_samples_split", .. })
        ));
    }

    #[test]
    fn test_wrong_row_width() {
        let x = array![[0.0, 1.0], [1.0, 0.0]];
        let y = array![[0u8], [1]];
        let mut rng = StdRng::seed_from_u64(0);
        let tree = DecisionTree::fit(x.view(), y.view(), &[0, 1], &[2], TreeParams::default(), &mut rng)
            .unwrap();
        assert!(tree.predict_proba_row(array![0.0].view()).is_err());
    }

    #[test]
    fn test_fit_on_views_with_separate_lifetimes() {
        let x = array![[0.0, 0.5], [1.0, 0.5], [2.0, -0.5], [3.0, -0.5]];
        let tree = {
            let y = array![[0u8], [0], [1], [1]];
            let n_classes = vec![2];
            let samples = vec![0, 1, 2, 3, 3];
            let mut rng = StdRng::seed_from_u64(7);
            DecisionTree::fit(
                x.view(),
                y.view(),
                &samples,
                &n_classes,
                TreeParams::default(),
                &mut rng,
            )
            .unwrap()
        };
        let p = tree.predict_proba_row(x.row(3)).unwrap();
        assert_eq!(p[0], vec![0.0, 1.0]);
    }
}
