use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};

use biorep_core::models::score::parse_decimal;

use crate::error::SheetError;

/// A single spreadsheet cell, reduced to what the pipeline needs.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Number(f64),
    Text(String),
}

impl Cell {
    /// Numeric value, accepting numeric text with a decimal comma.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            Cell::Text(t) => parse_decimal(t),
            Cell::Empty => None,
        }
    }

    pub fn as_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Number(n) => n.to_string(),
            Cell::Text(t) => t.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(t) => t.trim().is_empty(),
            Cell::Number(_) => false,
        }
    }
}

impl From<&Data> for Cell {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty => Cell::Empty,
            Data::Int(i) => Cell::Number(*i as f64),
            Data::Float(f) => Cell::Number(*f),
            Data::String(s) => Cell::Text(s.clone()),
            other => Cell::Text(other.to_string()),
        }
    }
}

/// Rows of cells with absolute sheet coordinates (row 0 is the first sheet row).
pub type Grid = Vec<Vec<Cell>>;

/// Read the first worksheet of an `.xlsx`/`.xls`/`.ods` workbook.
pub fn read_first_sheet(path: &Path) -> Result<Grid, SheetError> {
    let shown = path.display().to_string();
    let mut workbook = open_workbook_auto(path).map_err(|e| SheetError::Open {
        path: shown.clone(),
        reason: e.to_string(),
    })?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| SheetError::NoWorksheet {
            path: shown.clone(),
        })?
        .map_err(|e| SheetError::Read {
            path: shown.clone(),
            reason: e.to_string(),
        })?;

    // Ranges start at the first used cell; pad back to absolute positions so
    // fixed row/column indices mean the same thing regardless of blank margins.
    let (row_offset, col_offset) = range
        .start()
        .map(|(r, c)| (r as usize, c as usize))
        .unwrap_or((0, 0));

    let mut grid: Grid = vec![Vec::new(); row_offset];
    for row in range.rows() {
        let mut cells = vec![Cell::Empty; col_offset];
        cells.extend(row.iter().map(Cell::from));
        grid.push(cells);
    }

    tracing::debug!(path = %shown, rows = grid.len(), "worksheet read");
    Ok(grid)
}
