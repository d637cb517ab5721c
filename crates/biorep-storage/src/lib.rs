//! biorep-storage
//!
//! Patient store access. Thin wrapper around a single SQLite table.

pub mod error;
pub mod patients;
pub mod schema;

pub use patients::{find_patient, insert_patient};
pub use schema::{bootstrap_schema, create_store, open_memory_store, open_store};
