//! biorep-core
//!
//! Pure domain types, file naming conventions, and report context assembly.
//! No I/O; this is the shared vocabulary of the report pipeline.

pub mod context;
pub mod error;
pub mod models;
pub mod paths;
