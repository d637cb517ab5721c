use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::score::key;

/// Wording inserted into report prose for a thresholded score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NarrativeTag {
    /// Score below the normal-range upper bound.
    #[serde(rename = "keine")]
    NonePresent,
    /// Score at or above the bound, or no usable bound.
    #[serde(rename = "eine")]
    SomePresent,
}

impl NarrativeTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            NarrativeTag::NonePresent => "keine",
            NarrativeTag::SomePresent => "eine",
        }
    }
}

/// Template key that receives the narrative for a score key.
pub fn sentence_key(score_key: &str) -> Option<&'static str> {
    match score_key {
        key::CKD => Some("ckd_sentence"),
        key::CAD => Some("cad_sentence"),
        key::HF => Some("hf_sentence"),
        key::ONKORISK => Some("onco_sentence"),
        _ => None,
    }
}

/// Narrative tag per score key. Keys with no known score have no entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThresholdOutcome(BTreeMap<String, NarrativeTag>);

impl ThresholdOutcome {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, score_key: impl Into<String>, tag: NarrativeTag) {
        self.0.insert(score_key.into(), tag);
    }

    pub fn get(&self, score_key: &str) -> Option<NarrativeTag> {
        self.0.get(score_key).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `(sentence_key, wording)` pairs ready for the render context.
    pub fn sentences(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.0
            .iter()
            .filter_map(|(score_key, tag)| sentence_key(score_key).map(|k| (k, tag.as_str())))
    }
}
