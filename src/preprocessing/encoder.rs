//! Categorical label encoding
//!
//! Each encoder holds the known-class list recorded at training time. The
//! ordinal of a raw value is its position in that list, so encoding is a
//! pure lookup and is stable for the lifetime of the loaded artifacts.

use crate::error::{PredictorError, Result};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Ordinal encoder for one categorical field
#[derive(Debug, Clone, Serialize)]
pub struct LabelEncoder {
    classes: Vec<i64>,
    #[serde(skip)]
    index: HashMap<i64, usize>,
}

impl LabelEncoder {
    /// Build an encoder from its class list. Duplicate classes are rejected
    /// since they would make the ordinal of a value ambiguous.
    pub fn from_classes(field: &str, classes: Vec<i64>) -> Result<Self> {
        let mut index = HashMap::with_capacity(classes.len());
        for (ordinal, &class) in classes.iter().enumerate() {
            if index.insert(class, ordinal).is_some() {
                return Err(PredictorError::artifact(
                    "label_encoders",
                    format!("duplicate class {} in encoder for '{}'", class, field),
                ));
            }
        }
        Ok(Self { classes, index })
    }

    /// Ordinal for a raw value, if the value was seen during training
    pub fn transform(&self, value: i64) -> Option<usize> {
        self.index.get(&value).copied()
    }

    pub fn classes(&self) -> &[i64] {
        &self.classes
    }

    pub fn n_classes(&self) -> usize {
        self.classes.len()
    }
}

/// The full set of trained encoders, keyed by field name
#[derive(Debug, Clone, Default, Serialize)]
pub struct CategoryEncoders {
    encoders: BTreeMap<String, LabelEncoder>,
}

impl CategoryEncoders {
    /// Build from the persisted `{field: [classes]}` table
    pub fn from_class_table(table: BTreeMap<String, Vec<i64>>) -> Result<Self> {
        let encoders = table
            .into_iter()
            .map(|(field, classes)| {
                let encoder = LabelEncoder::from_classes(&field, classes)?;
                Ok((field, encoder))
            })
            .collect::<Result<BTreeMap<_, _>>>()?;
        Ok(Self { encoders })
    }

    pub fn get(&self, field: &str) -> Option<&LabelEncoder> {
        self.encoders.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.encoders.contains_key(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.encoders.keys().map(String::as_str)
    }

    /// Map a raw categorical value to its training-time ordinal.
    ///
    /// Unknown values fail with [`PredictorError::UnknownCategory`]; no
    /// default or nearest class is ever substituted.
    pub fn encode(&self, field: &str, value: i64) -> Result<usize> {
        let encoder = self.encoders.get(field).ok_or_else(|| {
            PredictorError::SchemaMismatch(format!("no encoder for categorical field '{}'", field))
        })?;
        encoder
            .transform(value)
            .ok_or_else(|| PredictorError::UnknownCategory {
                field: field.to_string(),
                value,
            })
    }
}
