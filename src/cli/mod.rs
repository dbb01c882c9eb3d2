//! Startup Predictor CLI Module
//!
//! Command-line interface for serving, validating artifacts and scoring
//! records offline.

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::artifacts::{ArtifactBundle, ArtifactPaths};
use crate::inference::{Prediction, PredictionEngine};
use crate::metadata::load_categories;
use crate::schema::StartupRecord;
use crate::server::{run_server, ServerConfig};

fn dim(s: &str) -> ColoredString    { s.truecolor(100, 100, 100) }
fn muted(s: &str) -> ColoredString  { s.truecolor(140, 140, 140) }
fn ok(s: &str) -> ColoredString     { s.truecolor(100, 210, 120) }

fn kv(key: &str, val: &str) -> String {
    format!("  {} {}", muted(key), val.white())
}

fn step_ok(msg: &str) {
    println!("  {} {}", ok("✓"), msg);
}

#[derive(Parser)]
#[command(name = "startup-predictor")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Predict startup outcomes (acquired vs closed) from trained artifacts")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve {
        /// Host to bind
        #[arg(long)]
        host: Option<String>,

        /// Port to bind
        #[arg(short, long)]
        port: Option<u16>,

        /// Directory holding label_encoders.json, feature_names.json and model.json
        #[arg(short, long)]
        artifacts_dir: Option<PathBuf>,

        /// Metadata file served by /categories
        #[arg(short, long)]
        metadata: Option<PathBuf>,

        /// Directory for the generated API documentation
        #[arg(long)]
        docs_dir: Option<PathBuf>,
    },

    /// Load and validate the artifact bundle
    Check {
        #[arg(short, long, default_value = "./artifacts")]
        artifacts_dir: PathBuf,
    },

    /// Score a single record stored as JSON
    Predict {
        #[arg(short, long, default_value = "./artifacts")]
        artifacts_dir: PathBuf,

        /// JSON file with one startup record
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Print the category display tables
    Categories {
        #[arg(short, long, default_value = "./artifacts/label_mappings.json")]
        metadata: PathBuf,
    },
}

/// Run the parsed command line
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::Serve { host, port, artifacts_dir, metadata, docs_dir }) => {
            let mut config = ServerConfig::default();
            if let Some(dir) = artifacts_dir {
                config = config.with_artifacts_dir(dir);
            }
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(metadata) = metadata {
                config.metadata_path = metadata;
            }
            if let Some(docs_dir) = docs_dir {
                config.docs_dir = docs_dir;
            }
            cmd_serve(config).await
        }
        Some(Commands::Check { artifacts_dir }) => cmd_check(&artifacts_dir),
        Some(Commands::Predict { artifacts_dir, input }) => cmd_predict(&artifacts_dir, &input),
        Some(Commands::Categories { metadata }) => cmd_categories(&metadata),
        None => cmd_serve(ServerConfig::default()).await,
    }
}

pub async fn cmd_serve(config: ServerConfig) -> anyhow::Result<()> {
    println!();
    println!("  {}", "Startup Predictor".white().bold());
    println!("  {}", dim(&format!("v{}", env!("CARGO_PKG_VERSION"))));
    println!();
    println!("{}", kv("Predict ", &format!("http://{}:{}/predict", config.host, config.port)));
    println!("{}", kv("Docs    ", &format!("http://{}:{}/docs", config.host, config.port)));
    println!("{}", kv("Health  ", &format!("http://{}:{}/health", config.host, config.port)));
    println!();
    println!("  {}", dim("ctrl+c to stop"));
    println!();

    run_server(config).await
}

pub fn cmd_check(artifacts_dir: &Path) -> anyhow::Result<()> {
    let bundle = ArtifactBundle::load(&ArtifactPaths::from_dir(artifacts_dir))
        .with_context(|| format!("artifacts in {} are not servable", artifacts_dir.display()))?;
    let summary = bundle.summary();

    println!();
    step_ok("Artifacts are consistent");
    println!("{}", kv("Model     ", &summary.model));
    println!("{}", kv("Features  ", &summary.n_features.to_string()));
    for (field, classes) in &summary.encoder_classes {
        println!("{}", kv("Encoder   ", &format!("{} ({} classes)", field, classes)));
    }
    println!();
    Ok(())
}

pub fn cmd_predict(artifacts_dir: &Path, input: &Path) -> anyhow::Result<()> {
    let bundle = ArtifactBundle::load(&ArtifactPaths::from_dir(artifacts_dir))?;
    let engine = PredictionEngine::new(Arc::new(bundle));

    let content = std::fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let record: StartupRecord = serde_json::from_str(&content)
        .with_context(|| format!("{} is not a valid startup record", input.display()))?;

    let prediction = engine.predict_record(&record)?;
    let label = match prediction {
        Prediction::Acquired => ok(prediction.label()),
        Prediction::Closed => prediction.label().truecolor(230, 120, 100),
    };
    println!("  {} {}", muted("Prediction"), label);
    Ok(())
}

pub fn cmd_categories(metadata: &Path) -> anyhow::Result<()> {
    let tables = load_categories(metadata)?;
    println!("{}", serde_json::to_string_pretty(&tables)?);
    Ok(())
}
