//! Prediction engine
//!
//! Runs the full per-request pipeline against a shared artifact bundle:
//! encode categoricals, assemble the feature vector, classify, and map the
//! raw label to a [`Prediction`].

use super::{assemble, Classifier, FeatureVector};
use crate::artifacts::ArtifactBundle;
use crate::error::{PredictorError, Result};
use crate::preprocessing::encode_record;
use crate::schema::StartupRecord;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Binary outcome of a prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Prediction {
    #[serde(rename = "Success (Acquired)")]
    Acquired,
    #[serde(rename = "Failure (Closed)")]
    Closed,
}

impl Prediction {
    /// Map a raw classifier label. Anything other than exactly 0 or 1 breaks
    /// the classifier contract.
    pub fn from_raw(raw: f64) -> Result<Self> {
        if raw == 1.0 {
            Ok(Prediction::Acquired)
        } else if raw == 0.0 {
            Ok(Prediction::Closed)
        } else {
            Err(PredictorError::ModelContractViolation(raw))
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Prediction::Acquired => "Success (Acquired)",
            Prediction::Closed => "Failure (Closed)",
        }
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify an assembled vector
pub fn predict(vector: &FeatureVector, classifier: &dyn Classifier) -> Result<Prediction> {
    if vector.len() != classifier.n_features() {
        return Err(PredictorError::SchemaMismatch(format!(
            "feature vector has {} values, classifier expects {}",
            vector.len(),
            classifier.n_features()
        )));
    }
    Prediction::from_raw(classifier.classify(vector.view()))
}

/// Stateless request pipeline over a shared bundle
#[derive(Debug, Clone)]
pub struct PredictionEngine {
    bundle: Arc<ArtifactBundle>,
}

impl PredictionEngine {
    pub fn new(bundle: Arc<ArtifactBundle>) -> Self {
        Self { bundle }
    }

    pub fn bundle(&self) -> &ArtifactBundle {
        &self.bundle
    }

    /// Score one record
    pub fn predict_record(&self, record: &StartupRecord) -> Result<Prediction> {
        // `labels` is carried for auditing only
        debug!(
            state_code = record.state_code,
            category_code = record.category_code,
            labels = record.labels,
            "Scoring record"
        );

        let encoded = encode_record(record, self.bundle.encoders())?;
        let vector = assemble(record, &encoded, self.bundle.feature_order())?;
        let prediction = predict(&vector, self.bundle.classifier())?;

        debug!(prediction = %prediction, "Record scored");
        Ok(prediction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::{DecisionTree, TreeNode};
    use crate::preprocessing::CategoryEncoders;
    use crate::schema::tests::sample_record;
    use ndarray::ArrayView1;
    use std::collections::BTreeMap;

    /// Classifier returning a fixed raw label
    #[derive(Debug)]
    struct Constant(f64, usize);

    impl Classifier for Constant {
        fn kind(&self) -> &'static str {
            "constant"
        }
        fn n_features(&self) -> usize {
            self.1
        }
        fn classify(&self, _features: ArrayView1<'_, f64>) -> f64 {
            self.0
        }
    }

    fn engine(classifier: Arc<dyn Classifier>, names: &[&str]) -> PredictionEngine {
        let mut table = BTreeMap::new();
        table.insert("state_code".to_string(), vec![0, 1, 2]);
        table.insert("category_code".to_string(), (0..=10).collect());
        let encoders = CategoryEncoders::from_class_table(table).unwrap();
        let order = names.iter().map(|s| s.to_string()).collect();
        PredictionEngine::new(Arc::new(ArtifactBundle::from_parts(encoders, order, classifier).unwrap()))
    }

    #[test]
    fn test_from_raw_mapping() {
        assert_eq!(Prediction::from_raw(1.0).unwrap(), Prediction::Acquired);
        assert_eq!(Prediction::from_raw(0.0).unwrap(), Prediction::Closed);
        for raw in [2.0, -1.0, 0.5, f64::NAN] {
            assert!(matches!(
                Prediction::from_raw(raw),
                Err(PredictorError::ModelContractViolation(_))
            ));
        }
    }

    #[test]
    fn test_prediction_serializes_as_literal() {
        assert_eq!(serde_json::to_value(Prediction::Acquired).unwrap(), "Success (Acquired)");
        assert_eq!(serde_json::to_value(Prediction::Closed).unwrap(), "Failure (Closed)");
        assert_eq!(Prediction::Closed.to_string(), "Failure (Closed)");
    }

    #[test]
    fn test_pipeline_with_tree() {
        // funding_rounds > 3 -> acquired
        let tree = DecisionTree::new(
            3,
            TreeNode::Split {
                feature_idx: 2,
                threshold: 3.0,
                left: Box::new(TreeNode::Leaf { value: 0.0, n_samples: 0 }),
                right: Box::new(TreeNode::Leaf { value: 1.0, n_samples: 0 }),
            },
        );
        let engine = engine(Arc::new(tree), &["state_code", "category_code", "funding_rounds"]);

        let mut record = sample_record();
        assert_eq!(engine.predict_record(&record).unwrap(), Prediction::Acquired);
        record.funding_rounds = 1;
        assert_eq!(engine.predict_record(&record).unwrap(), Prediction::Closed);
    }

    #[test]
    fn test_pipeline_is_repeatable() {
        let engine = engine(Arc::new(Constant(1.0, 2)), &["state_code", "milestones"]);
        let record = sample_record();
        let first = engine.predict_record(&record).unwrap();
        for _ in 0..50 {
            assert_eq!(engine.predict_record(&record).unwrap(), first);
        }
    }

    #[test]
    fn test_contract_violation_surfaces() {
        let engine = engine(Arc::new(Constant(7.0, 1)), &["milestones"]);
        let err = engine.predict_record(&sample_record()).unwrap_err();
        assert!(matches!(err, PredictorError::ModelContractViolation(v) if v == 7.0));
    }

    #[test]
    fn test_unknown_category_stops_before_classifier() {
        let engine = engine(Arc::new(Constant(f64::NAN, 1)), &["milestones"]);
        let mut record = sample_record();
        record.category_code = 999;
        // an unknown category must win over the broken classifier
        let err = engine.predict_record(&record).unwrap_err();
        assert!(err.is_client_error());
    }

    #[test]
    fn test_predict_checks_vector_length() {
        let classifier = Constant(1.0, 4);
        let mut encoded = crate::preprocessing::EncodedCategoricals::default();
        encoded.insert("state_code", 0);
        let vector = assemble(&sample_record(), &encoded, &["state_code".to_string()]).unwrap();
        assert!(matches!(
            predict(&vector, &classifier),
            Err(PredictorError::SchemaMismatch(_))
        ));
    }
}
