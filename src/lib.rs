//! Startup Predictor - outcome classification service
//!
//! Serves a pre-trained binary classifier that predicts whether a startup
//! will be acquired or will close.
//!
//! # Modules
//!
//! ## Inference pipeline
//! - [`artifacts`] - Loading and validating the trained artifact bundle
//! - [`preprocessing`] - Categorical label encoding
//! - [`inference`] - Feature assembly, classifiers and the prediction engine
//! - [`schema`] - The input record
//!
//! ## Read paths
//! - [`metadata`] - Display tables for categorical codes
//! - [`docs`] - Generated API reference
//!
//! ## Services
//! - [`server`] - HTTP server
//! - [`cli`] - Command-line interface

pub mod error;

pub mod artifacts;
pub mod inference;
pub mod preprocessing;
pub mod schema;

pub mod docs;
pub mod metadata;

pub mod cli;
pub mod server;

pub use artifacts::{ArtifactBundle, ArtifactPaths};
pub use error::{PredictorError, Result};
pub use inference::{Prediction, PredictionEngine};
pub use schema::StartupRecord;
