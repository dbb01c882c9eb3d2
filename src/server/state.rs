//! Application state management

use std::sync::Arc;

use crate::artifacts::{ArtifactBundle, ArtifactPaths};
use crate::error::Result;
use crate::inference::PredictionEngine;

use super::ServerConfig;

/// Application state shared across handlers.
///
/// Holds a loaded bundle rather than an optional one: a router cannot be
/// built before the artifacts have loaded successfully.
pub struct AppState {
    pub config: ServerConfig,
    pub engine: PredictionEngine,
}

impl AppState {
    pub fn new(config: ServerConfig, bundle: Arc<ArtifactBundle>) -> Self {
        Self {
            config,
            engine: PredictionEngine::new(bundle),
        }
    }

    /// Load the artifact bundle named by the configuration
    pub fn load(config: ServerConfig) -> Result<Self> {
        let bundle = ArtifactBundle::load(&ArtifactPaths::from_dir(&config.artifacts_dir))?;
        Ok(Self::new(config, Arc::new(bundle)))
    }

    pub fn bundle(&self) -> &ArtifactBundle {
        self.engine.bundle()
    }
}
