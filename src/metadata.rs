//! Display-name tables for client-side discovery
//!
//! Read from `label_mappings.json` on every call. This file is produced
//! separately from the label encoders and nothing ties the two together:
//! a code listed here is not guaranteed to be one the encoders accept.

use crate::error::{PredictorError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

/// One code -> display value table
pub type MappingTable = BTreeMap<String, Value>;

/// On-disk layout of the metadata file
#[derive(Debug, Deserialize)]
struct LabelMappings {
    #[serde(default)]
    state_code: MappingTable,
    #[serde(default)]
    category_code: MappingTable,
    #[serde(default)]
    status: MappingTable,
}

/// Response shape of `GET /categories`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryTables {
    pub state_codes: MappingTable,
    pub categories: MappingTable,
    pub status_labels: MappingTable,
}

/// Read the three tables. A missing table is returned empty; an unreadable
/// or unparseable file is [`PredictorError::MetadataUnavailable`].
pub fn load_categories(path: &Path) -> Result<CategoryTables> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| PredictorError::MetadataUnavailable(format!("{}: {}", path.display(), e)))?;
    let mappings: LabelMappings = serde_json::from_str(&content)
        .map_err(|e| PredictorError::MetadataUnavailable(format!("{}: {}", path.display(), e)))?;

    Ok(CategoryTables {
        state_codes: mappings.state_code,
        categories: mappings.category_code,
        status_labels: mappings.status,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_load_all_tables() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("label_mappings.json");
        fs::write(
            &path,
            r#"{"state_code":{"0":"CA","1":"NY"},"category_code":{"8":"software"},"status":{"0":"closed","1":"acquired"}}"#,
        )
        .unwrap();

        let tables = load_categories(&path).unwrap();
        assert_eq!(tables.state_codes["1"], "NY");
        assert_eq!(tables.categories.len(), 1);
        assert_eq!(tables.status_labels["1"], "acquired");
    }

    #[test]
    fn test_missing_table_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("label_mappings.json");
        fs::write(&path, r#"{"state_code":{"0":"CA"},"category_code":{}}"#).unwrap();

        let tables = load_categories(&path).unwrap();
        assert_eq!(tables.state_codes.len(), 1);
        assert!(tables.categories.is_empty());
        assert!(tables.status_labels.is_empty());
    }

    #[test]
    fn test_unparseable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("label_mappings.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            load_categories(&path),
            Err(PredictorError::MetadataUnavailable(_))
        ));
    }

    #[test]
    fn test_non_object_table_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("label_mappings.json");
        fs::write(&path, r#"{"state_code":["CA","NY"]}"#).unwrap();
        assert!(load_categories(&path).is_err());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_categories(&dir.path().join("absent.json")).unwrap_err();
        assert!(err.to_string().starts_with("Error loading categories"));
    }

    #[test]
    fn test_reads_fresh_on_every_call() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("label_mappings.json");
        fs::write(&path, r#"{"status":{"0":"closed"}}"#).unwrap();
        assert_eq!(load_categories(&path).unwrap().status_labels.len(), 1);

        fs::write(&path, r#"{"status":{"0":"closed","1":"acquired"}}"#).unwrap();
        assert_eq!(load_categories(&path).unwrap().status_labels.len(), 2);
    }
}
