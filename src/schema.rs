//! Input record schema
//!
//! One prediction request: two categorical fields carried as raw integer
//! codes, plus the numeric features (counts, amounts and 0/1 indicator
//! flags). Field declaration order here is irrelevant to inference; the
//! feature order comes from the artifact bundle.

use serde::{Deserialize, Serialize};

/// Categorical fields that must be passed through a trained encoder.
pub const CATEGORICAL_FIELDS: [&str; 2] = ["state_code", "category_code"];

/// Numeric fields usable directly as features.
pub const NUMERIC_FIELDS: [&str; 29] = [
    "age_first_funding_year",
    "age_last_funding_year",
    "relationships",
    "funding_rounds",
    "funding_total_usd",
    "milestones",
    "is_CA",
    "is_NY",
    "is_MA",
    "is_TX",
    "is_otherstate",
    "is_software",
    "is_web",
    "is_mobile",
    "is_enterprise",
    "is_advertising",
    "is_gamesvideo",
    "is_ecommerce",
    "is_biotech",
    "is_consulting",
    "is_othercategory",
    "has_VC",
    "has_angel",
    "has_roundA",
    "has_roundB",
    "has_roundC",
    "has_roundD",
    "avg_participants",
    "is_top500",
];

/// Accepted on the wire but never used as a feature.
pub const UNUSED_FIELDS: [&str; 1] = ["labels"];

/// Kind of source a feature name resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Categorical,
    Numeric,
    Unused,
}

/// Classify a feature name against the input schema.
pub fn field_kind(name: &str) -> Option<FieldKind> {
    if CATEGORICAL_FIELDS.contains(&name) {
        Some(FieldKind::Categorical)
    } else if NUMERIC_FIELDS.contains(&name) {
        Some(FieldKind::Numeric)
    } else if UNUSED_FIELDS.contains(&name) {
        Some(FieldKind::Unused)
    } else {
        None
    }
}

/// A single startup to score
#[allow(non_snake_case)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartupRecord {
    pub state_code: i64,
    pub category_code: i64,
    pub age_first_funding_year: f64,
    pub age_last_funding_year: f64,
    pub relationships: i64,
    pub funding_rounds: i64,
    pub funding_total_usd: i64,
    pub milestones: i64,
    pub is_CA: i64,
    pub is_NY: i64,
    pub is_MA: i64,
    pub is_TX: i64,
    pub is_otherstate: i64,
    pub is_software: i64,
    pub is_web: i64,
    pub is_mobile: i64,
    pub is_enterprise: i64,
    pub is_advertising: i64,
    pub is_gamesvideo: i64,
    pub is_ecommerce: i64,
    pub is_biotech: i64,
    pub is_consulting: i64,
    pub is_othercategory: i64,
    pub has_VC: i64,
    pub has_angel: i64,
    pub has_roundA: i64,
    pub has_roundB: i64,
    pub has_roundC: i64,
    pub has_roundD: i64,
    pub avg_participants: f64,
    pub is_top500: i64,
    pub labels: i64,
}

impl StartupRecord {
    /// Raw value of a categorical field, before encoding
    pub fn categorical(&self, name: &str) -> Option<i64> {
        match name {
            "state_code" => Some(self.state_code),
            "category_code" => Some(self.category_code),
            _ => None,
        }
    }

    /// Value of a numeric feature. `labels` is deliberately not resolvable.
    pub fn numeric(&self, name: &str) -> Option<f64> {
        let value = match name {
            "age_first_funding_year" => self.age_first_funding_year,
            "age_last_funding_year" => self.age_last_funding_year,
            "relationships" => self.relationships as f64,
            "funding_rounds" => self.funding_rounds as f64,
            "funding_total_usd" => self.funding_total_usd as f64,
            "milestones" => self.milestones as f64,
            "is_CA" => self.is_CA as f64,
            "is_NY" => self.is_NY as f64,
            "is_MA" => self.is_MA as f64,
            "is_TX" => self.is_TX as f64,
            "is_otherstate" => self.is_otherstate as f64,
            "is_software" => self.is_software as f64,
            "is_web" => self.is_web as f64,
            "is_mobile" => self.is_mobile as f64,
            "is_enterprise" => self.is_enterprise as f64,
            "is_advertising" => self.is_advertising as f64,
            "is_gamesvideo" => self.is_gamesvideo as f64,
            "is_ecommerce" => self.is_ecommerce as f64,
            "is_biotech" => self.is_biotech as f64,
            "is_consulting" => self.is_consulting as f64,
            "is_othercategory" => self.is_othercategory as f64,
            "has_VC" => self.has_VC as f64,
            "has_angel" => self.has_angel as f64,
            "has_roundA" => self.has_roundA as f64,
            "has_roundB" => self.has_roundB as f64,
            "has_roundC" => self.has_roundC as f64,
            "has_roundD" => self.has_roundD as f64,
            "avg_participants" => self.avg_participants,
            "is_top500" => self.is_top500 as f64,
            _ => return None,
        };
        Some(value)
    }
}
