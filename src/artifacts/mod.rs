//! Trained artifact bundle
//!
//! Loads the offline training outputs exactly once at startup:
//! - `label_encoders.json`: known classes per categorical field
//! - `feature_names.json`: the feature order the model was trained on
//! - `model.json`: the classifier
//!
//! Loading validates the three against each other and against the input
//! schema. The resulting bundle is immutable and shared by reference across
//! all request handlers.

use crate::error::{PredictorError, Result};
use crate::inference::{Classifier, ModelArtifact};
use crate::preprocessing::CategoryEncoders;
use crate::schema::{field_kind, FieldKind, CATEGORICAL_FIELDS};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

pub const ENCODERS_FILE: &str = "label_encoders.json";
pub const FEATURE_NAMES_FILE: &str = "feature_names.json";
pub const MODEL_FILE: &str = "model.json";

/// Locations of the persisted artifacts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub encoders: PathBuf,
    pub feature_names: PathBuf,
    pub model: PathBuf,
}

impl ArtifactPaths {
    /// Default file names inside one artifacts directory
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            encoders: dir.join(ENCODERS_FILE),
            feature_names: dir.join(FEATURE_NAMES_FILE),
            model: dir.join(MODEL_FILE),
        }
    }
}

/// Loaded, validated training artifacts
#[derive(Debug, Clone)]
pub struct ArtifactBundle {
    encoders: CategoryEncoders,
    feature_order: Vec<String>,
    classifier: Arc<dyn Classifier>,
}

/// Serializable overview of a bundle
#[derive(Debug, Clone, Serialize)]
pub struct BundleSummary {
    pub model: String,
    pub n_features: usize,
    pub encoder_classes: BTreeMap<String, usize>,
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let artifact = path.display().to_string();
    let content = std::fs::read_to_string(path).map_err(|e| PredictorError::artifact(&artifact, e))?;
    serde_json::from_str(&content).map_err(|e| PredictorError::artifact(&artifact, e))
}

impl ArtifactBundle {
    /// Load and validate the bundle from disk. Any failure is fatal for the
    /// caller; there is no partial bundle.
    pub fn load(paths: &ArtifactPaths) -> Result<Self> {
        info!(
            encoders = %paths.encoders.display(),
            feature_names = %paths.feature_names.display(),
            model = %paths.model.display(),
            "Loading trained artifacts"
        );

        let class_table: BTreeMap<String, Vec<i64>> = read_json(&paths.encoders)?;
        let encoders = CategoryEncoders::from_class_table(class_table)?;
        let feature_order: Vec<String> = read_json(&paths.feature_names)?;
        let model: ModelArtifact = read_json(&paths.model)?;
        let classifier = model.into_classifier()?;

        let bundle = Self::from_parts(encoders, feature_order, classifier)?;
        info!(
            model = %bundle.classifier.describe(),
            n_features = bundle.feature_order.len(),
            "Artifacts loaded"
        );
        Ok(bundle)
    }

    /// Assemble a bundle from already-parsed parts, enforcing the
    /// cross-artifact invariants.
    pub fn from_parts(
        encoders: CategoryEncoders,
        feature_order: Vec<String>,
        classifier: Arc<dyn Classifier>,
    ) -> Result<Self> {
        if feature_order.is_empty() {
            return Err(PredictorError::artifact("feature_names", "feature order is empty"));
        }

        for field in CATEGORICAL_FIELDS {
            if !encoders.contains(field) {
                return Err(PredictorError::artifact(
                    "label_encoders",
                    format!("no encoder for categorical field '{}'", field),
                ));
            }
        }

        let mut seen = HashSet::with_capacity(feature_order.len());
        for name in &feature_order {
            if !seen.insert(name.as_str()) {
                return Err(PredictorError::artifact(
                    "feature_names",
                    format!("duplicate feature '{}'", name),
                ));
            }
            match field_kind(name) {
                Some(FieldKind::Categorical) | Some(FieldKind::Numeric) => {}
                Some(FieldKind::Unused) => {
                    return Err(PredictorError::artifact(
                        "feature_names",
                        format!("'{}' is accepted as input but is not a model feature", name),
                    ));
                }
                None => {
                    return Err(PredictorError::artifact(
                        "feature_names",
                        format!("feature '{}' is not a field of the input record", name),
                    ));
                }
            }
        }

        if classifier.n_features() != feature_order.len() {
            return Err(PredictorError::artifact(
                "model",
                format!(
                    "classifier expects {} features but feature order lists {}",
                    classifier.n_features(),
                    feature_order.len()
                ),
            ));
        }

        for field in encoders.fields() {
            debug!(field, classes = encoders.get(field).map_or(0, |e| e.n_classes()), "Encoder ready");
        }

        Ok(Self {
            encoders,
            feature_order,
            classifier,
        })
    }

    /// Training-time ordinal of a raw categorical value
    pub fn encode(&self, field: &str, value: i64) -> Result<usize> {
        self.encoders.encode(field, value)
    }

    pub fn encoders(&self) -> &CategoryEncoders {
        &self.encoders
    }

    pub fn feature_order(&self) -> &[String] {
        &self.feature_order
    }

    pub fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }

    pub fn summary(&self) -> BundleSummary {
        BundleSummary {
            model: self.classifier.describe(),
            n_features: self.feature_order.len(),
            encoder_classes: self
                .encoders
                .fields()
                .filter_map(|f| self.encoders.get(f).map(|e| (f.to_string(), e.n_classes())))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::LogisticModel;
    use std::fs;

    fn encoders() -> CategoryEncoders {
        let mut table = BTreeMap::new();
        table.insert("state_code".to_string(), vec![0, 1, 2]);
        table.insert("category_code".to_string(), vec![0, 8]);
        CategoryEncoders::from_class_table(table).unwrap()
    }

    fn order(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn logistic(n: usize) -> Arc<dyn Classifier> {
        Arc::new(LogisticModel::new(vec![0.1; n], 0.0))
    }

    #[test]
    fn test_from_parts_valid() {
        let bundle = ArtifactBundle::from_parts(
            encoders(),
            order(&["state_code", "category_code", "milestones"]),
            logistic(3),
        )
        .unwrap();
        assert_eq!(bundle.feature_order().len(), 3);
        assert_eq!(bundle.encode("category_code", 8).unwrap(), 1);
        let summary = bundle.summary();
        assert_eq!(summary.n_features, 3);
        assert_eq!(summary.encoder_classes["state_code"], 3);
    }

    #[test]
    fn test_dimension_mismatch_rejected() {
        let err = ArtifactBundle::from_parts(encoders(), order(&["state_code", "milestones"]), logistic(5))
            .unwrap_err();
        assert!(matches!(err, PredictorError::ArtifactLoad { .. }));
    }

    #[test]
    fn test_unknown_feature_rejected() {
        let err = ArtifactBundle::from_parts(encoders(), order(&["state_code", "team_size"]), logistic(2))
            .unwrap_err();
        assert!(err.to_string().contains("team_size"));
    }

    #[test]
    fn test_labels_feature_rejected() {
        let result = ArtifactBundle::from_parts(encoders(), order(&["milestones", "labels"]), logistic(2));
        assert!(result.is_err());
    }

    #[test]
    fn test_duplicate_feature_rejected() {
        let result = ArtifactBundle::from_parts(encoders(), order(&["milestones", "milestones"]), logistic(2));
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_encoder_rejected() {
        let mut table = BTreeMap::new();
        table.insert("state_code".to_string(), vec![0]);
        let partial = CategoryEncoders::from_class_table(table).unwrap();
        let result = ArtifactBundle::from_parts(partial, order(&["state_code"]), logistic(1));
        assert!(matches!(result, Err(PredictorError::ArtifactLoad { .. })));
    }

    #[test]
    fn test_load_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ArtifactPaths::from_dir(dir.path().join("nope"));
        let err = ArtifactBundle::load(&paths).unwrap_err();
        assert!(matches!(err, PredictorError::ArtifactLoad { .. }));
    }

    #[test]
    fn test_load_malformed_model() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(ENCODERS_FILE), r#"{"state_code":[0],"category_code":[0]}"#).unwrap();
        fs::write(dir.path().join(FEATURE_NAMES_FILE), r#"["state_code"]"#).unwrap();
        fs::write(dir.path().join(MODEL_FILE), "not json").unwrap();
        let err = ArtifactBundle::load(&ArtifactPaths::from_dir(dir.path())).unwrap_err();
        match err {
            PredictorError::ArtifactLoad { artifact, .. } => assert!(artifact.ends_with(MODEL_FILE)),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_load_valid_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(ENCODERS_FILE), r#"{"state_code":[0,1],"category_code":[8]}"#).unwrap();
        fs::write(dir.path().join(FEATURE_NAMES_FILE), r#"["category_code","state_code"]"#).unwrap();
        fs::write(
            dir.path().join(MODEL_FILE),
            r#"{"kind":"logistic","coefficients":[1.0,1.0],"intercept":-0.5}"#,
        )
        .unwrap();
        let bundle = ArtifactBundle::load(&ArtifactPaths::from_dir(dir.path())).unwrap();
        assert_eq!(bundle.classifier().kind(), "logistic");
        assert_eq!(bundle.feature_order(), &["category_code".to_string(), "state_code".to_string()]);
    }
}
