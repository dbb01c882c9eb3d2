//! Inference module
//!
//! - [`Classifier`]: the opaque decision procedure and its concrete models
//! - [`assemble`]: ordered feature vector construction
//! - [`PredictionEngine`]: the per-request pipeline

mod assembler;
mod classifier;
mod engine;

pub use assembler::{assemble, FeatureVector};
pub use classifier::{Classifier, DecisionTree, LogisticModel, ModelArtifact, TreeNode};
pub use engine::{predict, Prediction, PredictionEngine};
