//! API reference document served by `GET /docs`
//!
//! Rendered once as Markdown and cached on disk; regenerated only when the
//! cached file is missing.

use crate::error::{PredictorError, Result};
use std::path::{Path, PathBuf};
use tracing::info;

pub const DOCUMENT_NAME: &str = "API_Documentation.md";

const EXAMPLE_REQUEST: &str = r#"{
  "state_code": 0,
  "category_code": 8,
  "age_first_funding_year": 2.0,
  "age_last_funding_year": 6.0,
  "relationships": 3,
  "funding_rounds": 4,
  "funding_total_usd": 15000000,
  "milestones": 2,
  "is_CA": 1, "is_NY": 0, "is_MA": 0, "is_TX": 0, "is_otherstate": 0,
  "is_software": 1, "is_web": 1, "is_mobile": 0, "is_enterprise": 0,
  "is_advertising": 0, "is_gamesvideo": 0, "is_ecommerce": 1,
  "is_biotech": 0, "is_consulting": 0, "is_othercategory": 0,
  "has_VC": 1, "has_angel": 1, "has_roundA": 1, "has_roundB": 0,
  "has_roundC": 0, "has_roundD": 0,
  "avg_participants": 1.5,
  "is_top500": 1,
  "labels": 1
}"#;

/// Render the API reference
pub fn render_api_documentation() -> String {
    let generated = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
    format!(
        r#"# Startup Success Prediction API

Version {version}. Generated {generated}.

Predicts whether a startup is likely to be acquired or to close, using a
classifier trained offline on historical startup data.

## POST /predict

Request body: one startup record. `state_code` and `category_code` must be
codes known to the trained encoders. `labels` is accepted but does not
affect the prediction.

```json
{example}
```

Response `200`:

```json
{{"prediction": "Success (Acquired)"}}
```

The prediction is always one of `"Success (Acquired)"` or `"Failure (Closed)"`.

## GET /categories

Returns the display tables for state codes, categories and status labels:

```json
{{"state_codes": {{}}, "categories": {{}}, "status_labels": {{}}}}
```

These tables are maintained separately from the trained encoders.

## GET /health

Service status, version and loaded model summary.

## Errors

All errors have the body `{{"detail": "<message>"}}`.

| Status | Meaning |
|--------|---------|
| 400 | Unknown category for a categorical field |
| 422 | Request body is missing fields or has the wrong types |
| 500 | Artifact, schema, model or metadata failure on the server |

## Running

```bash
startup-predictor serve --artifacts-dir ./artifacts --port 8000
```
"#,
        version = env!("CARGO_PKG_VERSION"),
        generated = generated,
        example = EXAMPLE_REQUEST,
    )
}

/// Path of the cached document, generating it first if it does not exist
pub fn ensure_documentation(docs_dir: &Path) -> Result<PathBuf> {
    let path = docs_dir.join(DOCUMENT_NAME);
    if path.exists() {
        return Ok(path);
    }

    std::fs::create_dir_all(docs_dir)
        .map_err(|e| PredictorError::Documentation(format!("{}: {}", docs_dir.display(), e)))?;
    std::fs::write(&path, render_api_documentation())
        .map_err(|e| PredictorError::Documentation(format!("{}: {}", path.display(), e)))?;

    info!(path = %path.display(), "Generated API documentation");
    Ok(path)
}
