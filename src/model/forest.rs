//! Tree-Ensemble Classifiers
//!
//! Trees are stored as flat node arrays exported from the training pipeline.
//! A split sends `x[feature] <= threshold` left. Leaves carry either per-class
//! votes (random forest) or a single additive score (boosted trees).
//!
//! Models return a class index only; mapping that index to a crop label is
//! the caller's job.

use serde::Deserialize;
use std::path::Path;

use crate::error::ArtifactLoadError;
use crate::features::N_FEATURES;

/// Anything that maps a scaled feature vector to a class index
pub trait Classifier: Send + Sync {
    fn predict_index(&self, x: &[f64; N_FEATURES]) -> usize;
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: Vec<f64>,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<Node>,
}

impl DecisionTree {
    /// Walk from the root to a leaf
    ///
    /// `validate` guarantees children come after their parent, so the walk
    /// always terminates.
    pub fn leaf(&self, x: &[f64; N_FEATURES]) -> &[f64] {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                Node::Split { feature, threshold, left, right } => {
                    idx = if x[*feature] <= *threshold { *left } else { *right };
                }
                Node::Leaf { value } => return value,
            }
        }
    }

    fn validate(&self, leaf_len: usize, path: &Path) -> Result<(), ArtifactLoadError> {
        if self.nodes.is_empty() {
            return Err(ArtifactLoadError::shape(path, "tree has no nodes"));
        }
        for (idx, node) in self.nodes.iter().enumerate() {
            match node {
                Node::Split { feature, left, right, .. } => {
                    if *feature >= N_FEATURES {
                        return Err(ArtifactLoadError::shape(
                            path,
                            format!("node {} splits on feature {}", idx, feature),
                        ));
                    }
                    for child in [*left, *right] {
                        if child <= idx || child >= self.nodes.len() {
                            return Err(ArtifactLoadError::shape(
                                path,
                                format!("node {} has invalid child {}", idx, child),
                            ));
                        }
                    }
                }
                Node::Leaf { value } => {
                    if value.len() != leaf_len {
                        return Err(ArtifactLoadError::shape(
                            path,
                            format!("leaf {} has {} values, expected {}", idx, value.len(), leaf_len),
                        ));
                    }
                }
            }
        }
        Ok(())
    }
}

/// Index of the largest score; ties resolve to the lowest index
fn argmax(scores: &[f64]) -> usize {
    let mut best = 0;
    for (i, s) in scores.iter().enumerate() {
        if *s > scores[best] {
            best = i;
        }
    }
    best
}

/// Averages normalized leaf votes across trees
#[derive(Debug, Clone, Deserialize)]
pub struct RandomForest {
    pub n_classes: usize,
    pub trees: Vec<DecisionTree>,
}

impl Classifier for RandomForest {
    fn predict_index(&self, x: &[f64; N_FEATURES]) -> usize {
        let mut votes = vec![0.0; self.n_classes];
        for tree in &self.trees {
            let leaf = tree.leaf(x);
            let total: f64 = leaf.iter().sum();
            if total > 0.0 {
                for (v, l) in votes.iter_mut().zip(leaf) {
                    *v += l / total;
                }
            }
        }
        argmax(&votes)
    }
}

/// Sums single-value leaves per class; tree `i` scores class `i % n_classes`
#[derive(Debug, Clone, Deserialize)]
pub struct BoostedTrees {
    pub n_classes: usize,
    #[serde(default)]
    pub base_score: f64,
    pub trees: Vec<DecisionTree>,
}

impl Classifier for BoostedTrees {
    fn predict_index(&self, x: &[f64; N_FEATURES]) -> usize {
        let mut scores = vec![self.base_score; self.n_classes];
        for (i, tree) in self.trees.iter().enumerate() {
            scores[i % self.n_classes] += tree.leaf(x)[0];
        }
        argmax(&scores)
    }
}

/// Classifier artifact as stored on disk
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifierModel {
    RandomForest(RandomForest),
    BoostedTrees(BoostedTrees),
}

impl ClassifierModel {
    pub fn validate(&self, path: &Path) -> Result<(), ArtifactLoadError> {
        let (n_classes, trees, leaf_len) = match self {
            ClassifierModel::RandomForest(m) => (m.n_classes, &m.trees, m.n_classes),
            ClassifierModel::BoostedTrees(m) => (m.n_classes, &m.trees, 1),
        };
        if n_classes == 0 {
            return Err(ArtifactLoadError::shape(path, "n_classes is zero"));
        }
        if trees.is_empty() {
            return Err(ArtifactLoadError::shape(path, "model has no trees"));
        }
        trees.iter().try_for_each(|t| t.validate(leaf_len, path))
    }
}

impl Classifier for ClassifierModel {
    fn predict_index(&self, x: &[f64; N_FEATURES]) -> usize {
        match self {
            ClassifierModel::RandomForest(m) => m.predict_index(x),
            ClassifierModel::BoostedTrees(m) => m.predict_index(x),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Stump on rainfall (feature 6): <= 0.0 -> class 0, else class 1
    fn stump(left: Vec<f64>, right: Vec<f64>) -> DecisionTree {
        DecisionTree {
            nodes: vec![
                Node::Split { feature: 6, threshold: 0.0, left: 1, right: 2 },
                Node::Leaf { value: left },
                Node::Leaf { value: right },
            ],
        }
    }

    fn x_with_rain(rain: f64) -> [f64; N_FEATURES] {
        [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, rain]
    }

    #[test]
    fn test_forest_majority() {
        let forest = RandomForest {
            n_classes: 2,
            trees: vec![
                stump(vec![10.0, 0.0], vec![0.0, 10.0]),
                stump(vec![3.0, 1.0], vec![1.0, 3.0]),
            ],
        };
        assert_eq!(forest.predict_index(&x_with_rain(-1.0)), 0);
        assert_eq!(forest.predict_index(&x_with_rain(1.0)), 1);
        // Threshold itself goes left
        assert_eq!(forest.predict_index(&x_with_rain(0.0)), 0);
    }

    #[test]
    fn test_forest_tie_takes_lowest_index() {
        let forest = RandomForest {
            n_classes: 2,
            trees: vec![stump(vec![1.0, 1.0], vec![1.0, 1.0])],
        };
        assert_eq!(forest.predict_index(&x_with_rain(5.0)), 0);
    }

    #[test]
    fn test_boosted_per_class_scores() {
        let model = BoostedTrees {
            n_classes: 3,
            base_score: 0.5,
            trees: vec![
                stump(vec![0.2], vec![-0.4]),
                stump(vec![-0.1], vec![0.9]),
                stump(vec![0.0], vec![0.1]),
            ],
        };
        assert_eq!(model.predict_index(&x_with_rain(-1.0)), 0);
        assert_eq!(model.predict_index(&x_with_rain(1.0)), 1);
    }

    #[test]
    fn test_deserialize_tagged_model() {
        let json = r#"{
            "kind": "random_forest",
            "n_classes": 2,
            "trees": [{ "nodes": [
                { "feature": 6, "threshold": 0.0, "left": 1, "right": 2 },
                { "value": [1.0, 0.0] },
                { "value": [0.0, 1.0] }
            ]}]
        }"#;
        let model: ClassifierModel = serde_json::from_str(json).unwrap();
        assert!(model.validate(Path::new("rf_model.json")).is_ok());
        assert_eq!(model.predict_index(&x_with_rain(2.0)), 1);
    }

    #[test]
    fn test_validate_rejects_backward_child() {
        let tree = DecisionTree {
            nodes: vec![
                Node::Split { feature: 0, threshold: 0.0, left: 0, right: 1 },
                Node::Leaf { value: vec![1.0] },
            ],
        };
        let model = ClassifierModel::BoostedTrees(BoostedTrees {
            n_classes: 1,
            base_score: 0.0,
            trees: vec![tree],
        });
        assert!(model.validate(Path::new("xgb_model.json")).is_err());
    }

    #[test]
    fn test_validate_rejects_leaf_width() {
        let model = ClassifierModel::RandomForest(RandomForest {
            n_classes: 3,
            trees: vec![stump(vec![1.0, 0.0], vec![0.0, 1.0])],
        });
        let err = model.validate(Path::new("rf_model.json")).unwrap_err();
        assert!(err.to_string().contains("expected 3"));
    }
}
