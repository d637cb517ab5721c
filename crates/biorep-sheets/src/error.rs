use thiserror::Error;

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("failed to open workbook {path}: {reason}")]
    Open { path: String, reason: String },

    #[error("workbook {path} has no worksheet")]
    NoWorksheet { path: String },

    #[error("failed to read worksheet in {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("header row {row} is missing")]
    MissingHeaderRow { row: usize },

    #[error("no 'final score' row found")]
    MissingFinalScoreRow,

    #[error("{source_name} must contain {} columns", .missing.join(", "))]
    MissingColumns {
        source_name: String,
        missing: Vec<String>,
    },

    #[error("value for '{label}' is not numeric: {value}")]
    NonNumeric { label: String, value: String },
}
