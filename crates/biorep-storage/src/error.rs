use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("no patient found with {mode} '{value}'")]
    NotFound { mode: String, value: String },

    #[error("patient store not found: {path}")]
    StoreMissing { path: String },

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}
