use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("search value must not be empty")]
    EmptySearchValue,

    #[error("unknown search mode: {0}")]
    UnknownSearchMode(String),

    #[error("unknown language: {0}")]
    UnknownLanguage(String),

    #[error("unknown report kind: {0}")]
    UnknownReportKind(String),

    #[error("unknown biomarker model: {0}")]
    UnknownModel(String),
}
