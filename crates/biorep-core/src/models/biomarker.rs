use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::models::score::key;

/// Risk models with a reference population and a distribution figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BiomarkerModel {
    #[serde(rename = "CKD")]
    Ckd,
    #[serde(rename = "CAD")]
    Cad,
    #[serde(rename = "HF")]
    Hf,
    #[serde(rename = "Oncorisk")]
    Oncorisk,
}

impl BiomarkerModel {
    pub const ALL: [BiomarkerModel; 4] = [
        BiomarkerModel::Ckd,
        BiomarkerModel::Cad,
        BiomarkerModel::Hf,
        BiomarkerModel::Oncorisk,
    ];

    /// Short name used in figure file names and legends.
    pub fn name(&self) -> &'static str {
        match self {
            BiomarkerModel::Ckd => "CKD",
            BiomarkerModel::Cad => "CAD",
            BiomarkerModel::Hf => "HF",
            BiomarkerModel::Oncorisk => "Oncorisk",
        }
    }

    /// The [`ScoreSet`](crate::models::score::ScoreSet) key holding the patient's value.
    pub fn score_key(&self) -> &'static str {
        match self {
            BiomarkerModel::Ckd => key::CKD,
            BiomarkerModel::Cad => key::CAD,
            BiomarkerModel::Hf => key::HF,
            BiomarkerModel::Oncorisk => key::ONKORISK,
        }
    }
}

impl fmt::Display for BiomarkerModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BiomarkerModel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BiomarkerModel::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::UnknownModel(s.to_string()))
    }
}
