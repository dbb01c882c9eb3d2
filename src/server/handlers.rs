//! HTTP request handlers

use std::sync::Arc;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::docs::{ensure_documentation, DOCUMENT_NAME};
use crate::inference::Prediction;
use crate::metadata::{load_categories, CategoryTables};
use crate::schema::StartupRecord;

use super::error::{Result, ServerError};
use super::state::AppState;

// ============================================================================
// Inference
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct PredictResponse {
    pub prediction: Prediction,
}

/// Score one startup record
pub async fn predict(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<StartupRecord>, JsonRejection>,
) -> Result<Json<PredictResponse>> {
    let Json(record) = payload.map_err(|e| ServerError::InvalidBody(e.body_text()))?;

    let prediction = state.engine.predict_record(&record)?;
    info!(
        state_code = record.state_code,
        category_code = record.category_code,
        prediction = %prediction,
        "Prediction served"
    );

    Ok(Json(PredictResponse { prediction }))
}

// ============================================================================
// Metadata
// ============================================================================

/// Display tables for state, category and status codes.
///
/// These come from the metadata file, not from the encoders used by
/// `/predict`; the two are not reconciled.
pub async fn get_categories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CategoryTables>> {
    let tables = load_categories(&state.config.metadata_path)?;
    Ok(Json(tables))
}

// ============================================================================
// Documentation
// ============================================================================

pub async fn get_api_documentation(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse> {
    let path = ensure_documentation(&state.config.docs_dir)?;
    let bytes = tokio::fs::read(&path).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/markdown; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", DOCUMENT_NAME),
            ),
        ],
        bytes,
    ))
}

// ============================================================================
// System
// ============================================================================

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let summary = state.bundle().summary();
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "model": summary.model,
        "n_features": summary.n_features,
    }))
}
