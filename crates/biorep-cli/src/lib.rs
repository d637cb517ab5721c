//! biorep-cli library root.
//!
//! Configuration and the report pipeline live here so that integration tests
//! and the seed example can drive them without going through argument parsing.

pub mod config;
pub mod pipeline;
