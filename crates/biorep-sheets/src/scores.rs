use std::collections::HashMap;
use std::path::Path;

use biorep_core::models::score::{ScoreSet, key};

use crate::error::SheetError;
use crate::grid::{Cell, Grid, read_first_sheet};

/// Row holding the column labels.
pub const HEADER_ROW: usize = 2;

/// Column searched for the "final score" marker.
pub const LABEL_COLUMN: usize = 1;

const FINAL_SCORE_MARKER: &str = "final score";

/// Spreadsheet column label → semantic score key.
///
/// Tied to the current classification export; revisit when its column
/// labels change.
pub const LABEL_MAP: [(&str, &str); 6] = [
    ("CAD238ML1k.mdl", key::CAD),
    ("CKD273ML1hybrid", key::CKD),
    ("HF2_ML1new.mdl", key::HF),
    ("oncoRisk normo", key::ONKORISK),
    ("BioAge", key::BIOAGE),
    ("LifeSpeed", key::LIFESPEED),
];

/// Load the patient's scores from the classification workbook.
pub fn load_scores(workbook: &Path) -> Result<ScoreSet, SheetError> {
    let grid = read_first_sheet(workbook)?;
    let scores = extract_scores(&grid)?;
    tracing::info!(path = %workbook.display(), count = scores.len(), "scores loaded");
    Ok(scores)
}

/// Extract the final-score row from a grid and re-key it into a [`ScoreSet`].
///
/// Labels missing from the sheet, and empty cells, are omitted rather than
/// treated as zero.
pub fn extract_scores(grid: &Grid) -> Result<ScoreSet, SheetError> {
    let headers = grid
        .get(HEADER_ROW)
        .ok_or(SheetError::MissingHeaderRow { row: HEADER_ROW })?;

    let final_row = grid
        .iter()
        .find(|row| {
            row.get(LABEL_COLUMN)
                .is_some_and(|c| c.as_text().to_lowercase().contains(FINAL_SCORE_MARKER))
        })
        .ok_or(SheetError::MissingFinalScoreRow)?;

    let mut by_label: HashMap<String, &Cell> = HashMap::new();
    for (header, cell) in headers.iter().zip(final_row.iter()) {
        if header.is_empty() {
            continue;
        }
        by_label.insert(header.as_text().trim().to_string(), cell);
    }

    let mut scores = ScoreSet::new();
    for (label, score_key) in LABEL_MAP {
        let Some(cell) = by_label.get(label) else {
            tracing::debug!(label, "score column absent");
            continue;
        };
        if cell.is_empty() {
            continue;
        }
        let value = cell.as_number().ok_or_else(|| SheetError::NonNumeric {
            label: label.to_string(),
            value: cell.as_text(),
        })?;
        scores.insert(score_key, value);
    }

    Ok(scores)
}
