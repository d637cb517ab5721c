use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Which column of the patient store a search value is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchMode {
    PatientId,
    SampleId,
    /// Matches either the given or the family name.
    Name,
}

impl SearchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchMode::PatientId => "patient-id",
            SearchMode::SampleId => "sample-id",
            SearchMode::Name => "name",
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accept both CLI spellings and the labels used on the search form.
        match s.trim().to_lowercase().as_str() {
            "patient-id" | "patient id" | "patient_id" => Ok(SearchMode::PatientId),
            "sample-id" | "sample id" | "sample_id" => Ok(SearchMode::SampleId),
            "name" => Ok(SearchMode::Name),
            _ => Err(CoreError::UnknownSearchMode(s.to_string())),
        }
    }
}

/// A validated search request: mode plus a trimmed, non-empty value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientQuery {
    mode: SearchMode,
    value: String,
}

impl PatientQuery {
    pub fn new(mode: SearchMode, raw: &str) -> Result<Self, CoreError> {
        let value = raw.trim();
        if value.is_empty() {
            return Err(CoreError::EmptySearchValue);
        }
        Ok(Self {
            mode,
            value: value.to_string(),
        })
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}
