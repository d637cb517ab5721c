use thiserror::Error;

use biorep_sheets::error::SheetError;

#[derive(Debug, Error)]
pub enum FigureError {
    #[error("reference data error: {0}")]
    Reference(#[from] SheetError),

    #[error("reference population for {model} is empty")]
    EmptyReference { model: String },

    #[error("plot rendering failed: {0}")]
    Render(String),

    #[error("image error: {0}")]
    Image(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
