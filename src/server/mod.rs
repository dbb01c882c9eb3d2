//! HTTP server
//!
//! Serves the prediction pipeline and its companion read-only endpoints:
//! - `POST /predict`
//! - `GET /categories`
//! - `GET /docs`
//! - `GET /health`

mod api;
mod error;
mod handlers;
mod state;

pub use api::create_router;
pub use error::ServerError;
pub use handlers::PredictResponse;
pub use state::AppState;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

pub const METADATA_FILE: &str = "label_mappings.json";

const DEFAULT_CORS_ORIGINS: [&str; 3] = [
    "http://localhost:3000",
    "http://localhost:8080",
    "http://localhost:4200",
];

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub artifacts_dir: PathBuf,
    pub metadata_path: PathBuf,
    pub docs_dir: PathBuf,
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let artifacts_dir = PathBuf::from(
            std::env::var("ARTIFACTS_DIR").unwrap_or_else(|_| "./artifacts".to_string()),
        );
        let metadata_path = std::env::var("METADATA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| artifacts_dir.join(METADATA_FILE));

        Self {
            host: std::env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("API_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            artifacts_dir,
            metadata_path,
            docs_dir: PathBuf::from(std::env::var("DOCS_DIR").unwrap_or_else(|_| "./docs".to_string())),
            cors_origins: std::env::var("CORS_ORIGINS")
                .ok()
                .map(|v| parse_origins(&v))
                .unwrap_or_else(|| DEFAULT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect()),
        }
    }
}

impl ServerConfig {
    /// Point the configuration at another artifacts directory. The metadata
    /// file follows unless it was set explicitly.
    pub fn with_artifacts_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        if self.metadata_path == self.artifacts_dir.join(METADATA_FILE) {
            self.metadata_path = dir.join(METADATA_FILE);
        }
        self.artifacts_dir = dir;
        self
    }
}

fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Start the server with the given configuration.
///
/// The artifact bundle is loaded before anything is bound; if it fails to
/// load the error is returned and no traffic is ever accepted.
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let start_time = chrono::Utc::now();
    info!(
        artifacts_dir = %config.artifacts_dir.display(),
        metadata = %config.metadata_path.display(),
        started_at = %start_time.to_rfc3339(),
        "Initializing server"
    );

    let state = Arc::new(AppState::load(config.clone())?);
    let summary = state.bundle().summary();
    info!(
        model = %summary.model,
        n_features = summary.n_features,
        encoders = ?summary.encoder_classes,
        "Prediction pipeline ready"
    );

    if !config.metadata_path.exists() {
        warn!(
            metadata = %config.metadata_path.display(),
            "Metadata file not found, /categories will fail until it exists"
        );
    }

    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(address = %addr, pid = std::process::id(), "Server listening and ready to accept connections");

    let shutdown_signal = async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for shutdown signal");
            return;
        }
        let uptime = chrono::Utc::now().signed_duration_since(start_time);
        info!(uptime_secs = uptime.num_seconds(), "Shutdown signal received, stopping server gracefully");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("Server shut down cleanly");
    Ok(())
}
