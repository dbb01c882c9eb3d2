//! Categorical preprocessing
//!
//! Turns the raw categorical codes of a [`StartupRecord`] into the ordinals
//! the classifier was trained on.

mod encoder;

pub use encoder::{CategoryEncoders, LabelEncoder};

use crate::error::Result;
use crate::schema::{StartupRecord, CATEGORICAL_FIELDS};
use std::collections::BTreeMap;

/// Encoded categorical values for one record, keyed by field name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EncodedCategoricals {
    values: BTreeMap<&'static str, usize>,
}

impl EncodedCategoricals {
    pub fn get(&self, field: &str) -> Option<usize> {
        self.values.get(field).copied()
    }

    pub fn insert(&mut self, field: &'static str, ordinal: usize) {
        self.values.insert(field, ordinal);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Encode every categorical field of a record.
///
/// Fails on the first unknown value, so nothing partially encoded ever
/// reaches feature assembly.
pub fn encode_record(record: &StartupRecord, encoders: &CategoryEncoders) -> Result<EncodedCategoricals> {
    let mut encoded = EncodedCategoricals::default();
    for field in CATEGORICAL_FIELDS {
        // CATEGORICAL_FIELDS and StartupRecord::categorical are kept in step
        let Some(raw) = record.categorical(field) else {
            continue;
        };
        encoded.insert(field, encoders.encode(field, raw)?);
    }
    Ok(encoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PredictorError;
    use crate::schema::tests::sample_record;

    fn encoders() -> CategoryEncoders {
        let mut table = BTreeMap::new();
        table.insert("state_code".to_string(), vec![0, 1, 2]);
        table.insert("category_code".to_string(), (0..=10).collect());
        CategoryEncoders::from_class_table(table).unwrap()
    }

    #[test]
    fn test_encode_record() {
        let encoded = encode_record(&sample_record(), &encoders()).unwrap();
        assert_eq!(encoded.len(), 2);
        assert_eq!(encoded.get("state_code"), Some(0));
        assert_eq!(encoded.get("category_code"), Some(8));
    }

    #[test]
    fn test_encode_record_unknown_category() {
        let mut record = sample_record();
        record.category_code = 999;
        let err = encode_record(&record, &encoders()).unwrap_err();
        assert_eq!(err.to_string(), "Unknown category for category_code: 999");
        assert!(matches!(err, PredictorError::UnknownCategory { .. }));
    }

    #[test]
    fn test_encode_record_checks_state_first() {
        let mut record = sample_record();
        record.state_code = 42;
        record.category_code = 999;
        match encode_record(&record, &encoders()) {
            Err(PredictorError::UnknownCategory { field, value }) => {
                assert_eq!(field, "state_code");
                assert_eq!(value, 42);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
