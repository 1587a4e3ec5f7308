//! Isolation forest outlier detector.
//!
//! An ensemble of random binary trees, each grown on a sub-sample of the
//! training data by splitting a random non-constant feature at a random
//! threshold. Outliers separate from the bulk in few splits, so a short
//! average path length means a high anomaly score.
//!
//! The decision offset is fitted so that roughly `contamination` of the
//! training points fall on the outlier side.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::CoreError;
use crate::types::FeatureVector;

/// Euler–Mascheroni constant, used in the harmonic-number approximation.
const EULER_GAMMA: f64 = 0.577_215_664_901_532_9;

/// Upper bound on the per-tree sub-sample size.
pub const MAX_SAMPLE_SIZE: usize = 256;

// ---------------------------------------------------------------------------
// Parameters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IsolationForestParams {
    /// Number of trees in the ensemble.
    pub n_estimators: usize,
    /// Expected share of outliers in the training set, in `(0.0, 0.5]`.
    pub contamination: f64,
    /// Per-tree sub-sample cap; the effective size is `min(max_samples, n)`.
    pub max_samples: usize,
    /// Seed for the forest's single random generator.
    pub seed: u64,
}

impl Default for IsolationForestParams {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            contamination: 0.1,
            max_samples: MAX_SAMPLE_SIZE,
            seed: 0,
        }
    }
}

impl IsolationForestParams {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.n_estimators == 0 {
            return Err(CoreError::InvalidParameter {
                name: "n_estimators",
                reason: "must be at least 1".to_string(),
            });
        }
        if !(self.contamination > 0.0 && self.contamination <= 0.5) {
            return Err(CoreError::InvalidParameter {
                name: "contamination",
                reason: format!("must be in (0.0, 0.5], got {}", self.contamination),
            });
        }
        if self.max_samples == 0 {
            return Err(CoreError::InvalidParameter {
                name: "max_samples",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Trees
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
enum Node {
    Leaf {
        size: usize,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

#[derive(Debug, Clone)]
struct IsolationTree {
    root: Node,
}

impl IsolationTree {
    fn grow(points: Vec<FeatureVector>, max_depth: usize, rng: &mut StdRng) -> Self {
        Self {
            root: grow_node(points, 0, max_depth, rng),
        }
    }

    fn path_length(&self, x: &FeatureVector) -> f64 {
        let mut node = &self.root;
        let mut depth = 0usize;
        loop {
            match node {
                Node::Leaf { size } => return depth as f64 + average_path_length(*size),
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if x[*feature] <= *threshold {
                        left.as_ref()
                    } else {
                        right.as_ref()
                    };
                    depth += 1;
                }
            }
        }
    }
}

fn grow_node(
    points: Vec<FeatureVector>,
    depth: usize,
    max_depth: usize,
    rng: &mut StdRng,
) -> Node {
    if depth >= max_depth || points.len() <= 1 {
        return Node::Leaf { size: points.len() };
    }

    // Features that still vary inside this node.
    let candidates: Vec<(usize, f64, f64)> = (0..2)
        .filter_map(|j| {
            let (lo, hi) = points.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p[j]), hi.max(p[j]))
            });
            (hi > lo).then_some((j, lo, hi))
        })
        .collect();

    if candidates.is_empty() {
        return Node::Leaf { size: points.len() };
    }

    let (feature, lo, hi) = candidates[rng.random_range(0..candidates.len())];
    let threshold = rng.random_range(lo..hi);

    let (left, right): (Vec<_>, Vec<_>) = points.into_iter().partition(|p| p[feature] <= threshold);

    Node::Split {
        feature,
        threshold,
        left: Box::new(grow_node(left, depth + 1, max_depth, rng)),
        right: Box::new(grow_node(right, depth + 1, max_depth, rng)),
    }
}

/// Average path length of an unsuccessful search in a binary search tree
/// of `n` points. Normalizes path lengths across sub-sample sizes.
pub fn average_path_length(n: usize) -> f64 {
    match n {
        0 | 1 => 0.0,
        2 => 1.0,
        _ => {
            let n = n as f64;
            2.0 * ((n - 1.0).ln() + EULER_GAMMA) - 2.0 * (n - 1.0) / n
        }
    }
}

/// Linear-interpolated percentile of `values`, `q` in `[0, 100]`.
fn percentile(values: &[f64], q: f64) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let rank = q / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (rank - lo as f64)
}

// ---------------------------------------------------------------------------
// Forest
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct IsolationForest {
    params: IsolationForestParams,
    trees: Vec<IsolationTree>,
    sample_size: usize,
    /// Decision offset on the negated anomaly score.
    offset: f64,
}

impl IsolationForest {
    pub fn new(params: IsolationForestParams) -> Result<Self, CoreError> {
        params.validate()?;
        Ok(Self {
            params,
            trees: Vec::new(),
            sample_size: 0,
            offset: 0.0,
        })
    }

    pub fn is_fitted(&self) -> bool {
        !self.trees.is_empty()
    }

    /// Grow the ensemble on `data` and fit the decision offset.
    ///
    /// Refitting replaces the previous trees. Requires at least two points.
    pub fn fit(&mut self, data: &[FeatureVector]) -> Result<(), CoreError> {
        if data.len() < 2 {
            return Err(CoreError::Validation(format!(
                "isolation forest needs at least 2 samples, got {}",
                data.len()
            )));
        }

        let mut rng = StdRng::seed_from_u64(self.params.seed);
        let sample_size = self.params.max_samples.min(data.len());
        let max_depth = (sample_size as f64).log2().ceil() as usize;

        self.trees = (0..self.params.n_estimators)
            .map(|_| {
                let points = rand::seq::index::sample(&mut rng, data.len(), sample_size)
                    .iter()
                    .map(|i| data[i])
                    .collect();
                IsolationTree::grow(points, max_depth, &mut rng)
            })
            .collect();
        self.sample_size = sample_size;

        let negated: Vec<f64> = self.score_samples(data)?.iter().map(|s| -s).collect();
        self.offset = percentile(&negated, 100.0 * self.params.contamination);
        Ok(())
    }

    /// Anomaly score `2^(-E[h(x)] / c(psi))` per point, in `(0, 1]`.
    /// Higher means more anomalous.
    pub fn score_samples(&self, data: &[FeatureVector]) -> Result<Vec<f64>, CoreError> {
        if !self.is_fitted() {
            return Err(CoreError::Internal(
                "isolation forest used before fit".to_string(),
            ));
        }

        let norm = average_path_length(self.sample_size);
        let n_trees = self.trees.len() as f64;

        Ok(data
            .iter()
            .map(|x| {
                let mean_depth =
                    self.trees.iter().map(|t| t.path_length(x)).sum::<f64>() / n_trees;
                if norm > 0.0 {
                    2f64.powf(-mean_depth / norm)
                } else {
                    1.0
                }
            })
            .collect())
    }

    /// Signed distance to the decision boundary; negative means outlier.
    pub fn decision_function(&self, data: &[FeatureVector]) -> Result<Vec<f64>, CoreError> {
        Ok(self
            .score_samples(data)?
            .into_iter()
            .map(|s| -s - self.offset)
            .collect())
    }

    /// `true` for each point classified as an outlier.
    pub fn predict(&self, data: &[FeatureVector]) -> Result<Vec<bool>, CoreError> {
        Ok(self
            .decision_function(data)?
            .into_iter()
            .map(|d| d < 0.0)
            .collect())
    }

    pub fn fit_predict(&mut self, data: &[FeatureVector]) -> Result<Vec<bool>, CoreError> {
        self.fit(data)?;
        self.predict(data)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
