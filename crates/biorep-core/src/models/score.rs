use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Semantic score keys, as used in templates and throughout the pipeline.
pub mod key {
    pub const CAD: &str = "CAD_score";
    pub const CKD: &str = "CKD_score";
    pub const HF: &str = "HF_score";
    pub const ONKORISK: &str = "Onkorisk_score";
    pub const BIOAGE: &str = "BioAge_value";
    pub const LIFESPEED: &str = "LifeSpeed_value";
}

/// Biomarker scores for one request, each formatted to three decimals.
///
/// Absent keys mean "unknown", never zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreSet(BTreeMap<String, String>);

impl ScoreSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `key`, formatted with [`format_score`].
    pub fn insert(&mut self, key: impl Into<String>, value: f64) {
        self.0.insert(key.into(), format_score(value));
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Numeric value of a score, accepting a decimal comma.
    pub fn value(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(parse_decimal)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, f64)> for ScoreSet {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        let mut set = ScoreSet::new();
        for (key, value) in iter {
            set.insert(key, value);
        }
        set
    }
}

pub fn format_score(value: f64) -> String {
    format!("{value:.3}")
}

/// Parse a number written with either a decimal point or a decimal comma.
pub fn parse_decimal(text: &str) -> Option<f64> {
    text.trim().replace(',', ".").parse::<f64>().ok()
}
