pub mod biomarker;
pub mod language;
pub mod narrative;
pub mod patient;
pub mod population;
pub mod report;
pub mod score;
pub mod search;
