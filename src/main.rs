//! Startup Predictor - Main Entry Point

use clap::Parser;
use startup_predictor::cli::{run, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "startup_predictor=info,tower_http=info".into()),
        )
        .init();

    run(Cli::parse()).await
}
