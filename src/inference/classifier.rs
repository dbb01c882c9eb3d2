//! Classifier interface and the model representations it can be loaded from
//!
//! The serving pipeline only sees [`Classifier`]: a pure function from an
//! ordered feature vector to a raw label. Concrete models are deserialized
//! from the `model.json` artifact through [`ModelArtifact`].

use crate::error::{PredictorError, Result};
use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::sync::Arc;

/// A trained binary classifier.
///
/// Implementations must be read-only over their parameters so that a single
/// instance can serve any number of concurrent requests.
pub trait Classifier: Send + Sync + Debug {
    /// Short identifier of the model family
    fn kind(&self) -> &'static str;

    /// Input dimensionality the model was trained with
    fn n_features(&self) -> usize;

    /// Raw label for one sample. Callers guarantee `features.len() == n_features()`.
    fn classify(&self, features: ArrayView1<'_, f64>) -> f64;

    /// Human-readable description for logs and the CLI
    fn describe(&self) -> String {
        format!("{} ({} features)", self.kind(), self.n_features())
    }
}

/// Persisted model description
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    DecisionTree(DecisionTree),
    Logistic(LogisticModel),
}

impl ModelArtifact {
    /// Check internal consistency and hand back the model behind the
    /// [`Classifier`] interface.
    pub fn into_classifier(self) -> Result<Arc<dyn Classifier>> {
        match self {
            ModelArtifact::DecisionTree(tree) => {
                tree.validate()?;
                Ok(Arc::new(tree))
            }
            ModelArtifact::Logistic(model) => {
                model.validate()?;
                Ok(Arc::new(model))
            }
        }
    }
}

// ============================================================================
// Decision tree
// ============================================================================

/// Decision tree node
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TreeNode {
    /// Leaf node with prediction value
    Leaf {
        value: f64,
        #[serde(default)]
        n_samples: usize,
    },
    /// Internal node; samples with `x[feature_idx] <= threshold` go left
    Split {
        feature_idx: usize,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
}

/// A fitted decision tree classifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    n_features: usize,
    root: TreeNode,
}

impl DecisionTree {
    pub fn new(n_features: usize, root: TreeNode) -> Self {
        Self { n_features, root }
    }

    fn validate(&self) -> Result<()> {
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            if let TreeNode::Split { feature_idx, threshold, left, right } = node {
                if *feature_idx >= self.n_features {
                    return Err(PredictorError::artifact(
                        "model",
                        format!(
                            "split on feature {} but the tree has {} features",
                            feature_idx, self.n_features
                        ),
                    ));
                }
                if !threshold.is_finite() {
                    return Err(PredictorError::artifact(
                        "model",
                        format!("non-finite threshold on feature {}", feature_idx),
                    ));
                }
                stack.push(left.as_ref());
                stack.push(right.as_ref());
            }
        }
        Ok(())
    }

    /// Get tree depth
    pub fn depth(&self) -> usize {
        fn node_depth(node: &TreeNode) -> usize {
            match node {
                TreeNode::Leaf { .. } => 1,
                TreeNode::Split { left, right, .. } => 1 + node_depth(left).max(node_depth(right)),
            }
        }
        node_depth(&self.root)
    }

    /// Get number of leaves
    pub fn n_leaves(&self) -> usize {
        fn count_leaves(node: &TreeNode) -> usize {
            match node {
                TreeNode::Leaf { .. } => 1,
                TreeNode::Split { left, right, .. } => count_leaves(left) + count_leaves(right),
            }
        }
        count_leaves(&self.root)
    }
}

impl Classifier for DecisionTree {
    fn kind(&self) -> &'static str {
        "decision_tree"
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn classify(&self, features: ArrayView1<'_, f64>) -> f64 {
        let mut node = &self.root;
        loop {
            match node {
                TreeNode::Leaf { value, .. } => return *value,
                TreeNode::Split { feature_idx, threshold, left, right } => {
                    node = if features[*feature_idx] <= *threshold {
                        left.as_ref()
                    } else {
                        right.as_ref()
                    };
                }
            }
        }
    }

    fn describe(&self) -> String {
        format!(
            "decision_tree ({} features, depth {}, {} leaves)",
            self.n_features,
            self.depth(),
            self.n_leaves()
        )
    }
}

// ============================================================================
// Logistic regression
// ============================================================================

fn default_threshold() -> f64 {
    0.5
}

/// A fitted logistic regression classifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticModel {
    coefficients: Vec<f64>,
    intercept: f64,
    #[serde(default = "default_threshold")]
    threshold: f64,
}

impl LogisticModel {
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Self {
        Self {
            coefficients,
            intercept,
            threshold: default_threshold(),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.coefficients.is_empty() {
            return Err(PredictorError::artifact("model", "logistic model has no coefficients"));
        }
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(PredictorError::artifact(
                "model",
                format!("classification threshold {} outside [0, 1]", self.threshold),
            ));
        }
        Ok(())
    }

    /// Probability of the positive class
    pub fn predict_proba(&self, features: ArrayView1<'_, f64>) -> f64 {
        let z = ArrayView1::from(self.coefficients.as_slice()).dot(&features) + self.intercept;
        1.0 / (1.0 + (-z).exp())
    }
}

impl Classifier for LogisticModel {
    fn kind(&self) -> &'static str {
        "logistic"
    }

    fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    fn classify(&self, features: ArrayView1<'_, f64>) -> f64 {
        if self.predict_proba(features) >= self.threshold {
            1.0
        } else {
            0.0
        }
    }
}
