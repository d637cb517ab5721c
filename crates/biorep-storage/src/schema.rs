use std::path::Path;

use rusqlite::{Connection, OpenFlags};

use crate::error::StorageError;

const PATIENTS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS patients (
    id INTEGER PRIMARY KEY,
    patient_id TEXT,
    sample_id TEXT,
    analysis_id TEXT,
    first_name TEXT,
    last_name TEXT,
    dob TEXT,
    gender TEXT,
    address TEXT,
    diagnosis TEXT,
    sample_date TEXT
);";

/// Open an existing patient store read-write. Never creates the file or its
/// tables.
pub fn open_store(path: &Path) -> Result<Connection, StorageError> {
    if !path.exists() {
        return Err(StorageError::StoreMissing {
            path: path.display().to_string(),
        });
    }
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;
    tracing::debug!(path = %path.display(), "patient store opened");
    Ok(conn)
}

/// Open or create a writable store at `path` and ensure the schema exists.
pub fn create_store(path: &Path) -> Result<Connection, StorageError> {
    let conn = Connection::open(path)?;
    bootstrap_schema(&conn)?;
    tracing::info!(path = %path.display(), "patient store ready");
    Ok(conn)
}

/// Open an in-memory store with the patients table (for testing and demos).
pub fn open_memory_store() -> Result<Connection, StorageError> {
    let conn = Connection::open_in_memory()?;
    bootstrap_schema(&conn)?;
    Ok(conn)
}

/// Create the patients table if it does not exist yet.
pub fn bootstrap_schema(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(PATIENTS_TABLE)?;
    Ok(())
}
