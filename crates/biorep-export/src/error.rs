use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("template rendering failed: {0}")]
    TemplateRender(String),

    #[error("template not found: {}", .0.display())]
    TemplateNotFound(PathBuf),

    #[error("template parse error: {0}")]
    TemplateParse(String),

    #[error("DOCX generation failed: {0}")]
    Docx(String),

    #[error("figure error: {0}")]
    Figure(#[from] biorep_figures::error::FigureError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<tera::Error> for ExportError {
    fn from(e: tera::Error) -> Self {
        ExportError::TemplateRender(e.to_string())
    }
}

/// Failures of the DOCX to PDF conversion step.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("no document converter found on this system")]
    NoConverter,

    #[error("{converter} could not be started: {source}")]
    Spawn {
        converter: String,
        source: std::io::Error,
    },

    #[error("{converter} exited with {status}: {stderr}")]
    Failed {
        converter: String,
        status: String,
        stderr: String,
    },

    #[error("{converter} finished but {} was not written", .expected.display())]
    MissingOutput { converter: String, expected: PathBuf },

    #[error("conversion worker stopped: {0}")]
    Worker(String),
}
