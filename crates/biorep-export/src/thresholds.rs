//! Normal-range lookup and narrative classification.

use docx_rs::{Docx, Table};

use biorep_core::models::narrative::{NarrativeTag, ThresholdOutcome};
use biorep_core::models::score::{ScoreSet, key, parse_decimal};

use crate::docx::{cell_at, cell_text, row_texts, tables};

/// Header cell that marks the threshold table.
pub const RANGE_HEADER: &str = "Normalbereich";

/// Column holding the normal-range bound.
pub const RANGE_COLUMN: usize = 3;

/// Table row per score key, below the header row.
pub const THRESHOLD_ROWS: [(usize, &str); 4] = [
    (1, key::CKD),
    (2, key::CAD),
    (3, key::HF),
    (4, key::ONKORISK),
];

/// Parse a normal-range cell such as `<0,500`. Unparsable text yields `None`.
pub fn parse_threshold(text: &str) -> Option<f64> {
    let stripped = text.trim().trim_start_matches('<').trim();
    parse_decimal(stripped).filter(|v| v.is_finite())
}

/// `keine` below the bound, `eine` at or above it or when there is no bound.
pub fn classify(value: f64, threshold: Option<f64>) -> NarrativeTag {
    match threshold {
        Some(bound) if value < bound => NarrativeTag::NonePresent,
        _ => NarrativeTag::SomePresent,
    }
}

/// First body table whose header row has a `Normalbereich` cell.
pub fn find_threshold_table(docx: &Docx) -> Option<&Table> {
    tables(docx).find(|t| row_texts(t, 0).iter().any(|c| c.trim() == RANGE_HEADER))
}

/// Classify every known score against the template's threshold table.
///
/// A template without the table yields an empty outcome. Scores the patient
/// does not have produce no entry.
pub fn evaluate_thresholds(scores: &ScoreSet, template: &Docx) -> ThresholdOutcome {
    let mut outcome = ThresholdOutcome::new();
    let Some(table) = find_threshold_table(template) else {
        tracing::warn!("template has no {RANGE_HEADER} table, narratives left unset");
        return outcome;
    };

    for (row, score_key) in THRESHOLD_ROWS {
        let Some(value) = scores.value(score_key) else {
            tracing::debug!(score = score_key, "no score, narrative skipped");
            continue;
        };
        let threshold = cell_at(table, row, RANGE_COLUMN)
            .map(cell_text)
            .and_then(|text| parse_threshold(&text));
        if threshold.is_none() {
            tracing::warn!(score = score_key, row, "no usable threshold");
        }
        outcome.insert(score_key, classify(value, threshold));
    }
    outcome
}
