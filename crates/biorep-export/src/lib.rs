//! biorep-export
//!
//! DOCX template filling and PDF conversion for patient reports.

pub mod convert;
pub mod docx;
pub mod error;
pub mod layout;
pub mod render;
pub mod staging;
pub mod tags;
pub mod template;
pub mod thresholds;

pub use convert::{Converter, ConverterSettings, detect_converter, spawn_conversion};
pub use render::render_document;
pub use staging::stage_figures;
pub use template::load_template;
pub use thresholds::evaluate_thresholds;
