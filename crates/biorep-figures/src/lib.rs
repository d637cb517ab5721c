//! biorep-figures
//!
//! Reference-population distribution plots and caption overlays.

pub mod error;
pub mod fonts;
pub mod generate;
pub mod kde;
pub mod overlay;
pub mod plot;
pub mod settings;
pub mod stats;

pub use generate::{
    SkipReason, StagedFigures, generate_all, generate_from_populations, load_populations,
};
pub use settings::FigureSettings;
