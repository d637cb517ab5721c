//! biorep-sheets
//!
//! Spreadsheet inputs: the per-patient classification workbook and the
//! per-model reference population workbooks.

pub mod error;
pub mod grid;
pub mod reference;
pub mod scores;

pub use reference::read_reference;
pub use scores::{extract_scores, load_scores};
