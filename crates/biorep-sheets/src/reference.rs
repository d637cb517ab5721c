use std::path::Path;

use biorep_core::models::population::ReferencePopulation;

use crate::error::SheetError;
use crate::grid::{Grid, read_first_sheet};

pub const GROUP_COLUMN: &str = "group";
pub const SCORE_COLUMN: &str = "score";

/// Read a reference population workbook (`group`, `score` columns in row 0).
pub fn read_reference(path: &Path) -> Result<ReferencePopulation, SheetError> {
    let grid = read_first_sheet(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    reference_from_grid(&grid, &name)
}

/// Split rows into healthy (group 0) and unhealthy (group 1) scores.
///
/// Rows with another group value or a non-numeric score are dropped.
pub fn reference_from_grid(grid: &Grid, source_name: &str) -> Result<ReferencePopulation, SheetError> {
    let header = grid.first().map(Vec::as_slice).unwrap_or_default();
    let column = |name: &str| header.iter().position(|c| c.as_text().trim() == name);

    let (group_col, score_col) = match (column(GROUP_COLUMN), column(SCORE_COLUMN)) {
        (Some(g), Some(s)) => (g, s),
        (g, s) => {
            let mut missing = Vec::new();
            if g.is_none() {
                missing.push(GROUP_COLUMN.to_string());
            }
            if s.is_none() {
                missing.push(SCORE_COLUMN.to_string());
            }
            return Err(SheetError::MissingColumns {
                source_name: source_name.to_string(),
                missing,
            });
        }
    };

    let mut population = ReferencePopulation::default();
    for row in grid.iter().skip(1) {
        let group = row.get(group_col).and_then(|c| c.as_number());
        let Some(score) = row.get(score_col).and_then(|c| c.as_number()) else {
            continue;
        };
        if !score.is_finite() {
            continue;
        }
        match group {
            Some(g) if g == 0.0 => population.healthy.push(score),
            Some(g) if g == 1.0 => population.unhealthy.push(score),
            _ => {}
        }
    }

    tracing::debug!(
        source = source_name,
        healthy = population.healthy.len(),
        unhealthy = population.unhealthy.len(),
        "reference population read"
    );
    Ok(population)
}
