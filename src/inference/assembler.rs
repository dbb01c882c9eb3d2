//! Feature vector assembly

use crate::error::{PredictorError, Result};
use crate::preprocessing::EncodedCategoricals;
use crate::schema::StartupRecord;
use ndarray::{Array1, ArrayView1};

/// Ordered model input, aligned 1:1 with the bundle's feature order
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    values: Array1<f64>,
}

impl FeatureVector {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn view(&self) -> ArrayView1<'_, f64> {
        self.values.view()
    }

    pub fn get(&self, idx: usize) -> Option<f64> {
        self.values.get(idx).copied()
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.values.to_vec()
    }
}

/// Build the feature vector for one record.
///
/// `feature_order` is authoritative: element `i` is always the value named by
/// `feature_order[i]`, taken from the encoded categoricals or the record's
/// numeric fields. A name with neither source is a [`PredictorError::SchemaMismatch`].
pub fn assemble(
    record: &StartupRecord,
    encoded: &EncodedCategoricals,
    feature_order: &[String],
) -> Result<FeatureVector> {
    let values = feature_order
        .iter()
        .map(|name| {
            encoded
                .get(name)
                .map(|ordinal| ordinal as f64)
                .or_else(|| record.numeric(name))
                .ok_or_else(|| {
                    PredictorError::SchemaMismatch(format!(
                        "feature '{}' has no source field in the input record",
                        name
                    ))
                })
        })
        .collect::<Result<Vec<f64>>>()?;

    Ok(FeatureVector {
        values: Array1::from_vec(values),
    })
}
