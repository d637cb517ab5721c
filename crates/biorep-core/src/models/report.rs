use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The two documents the generator can produce for a patient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    /// Main report: patient fields, scores, narratives, and figures.
    Report,
    /// Annex: patient fields and figures only.
    Annex,
}

impl ReportKind {
    /// File name of the German base template for this kind.
    pub fn template_base(&self) -> &'static str {
        match self {
            ReportKind::Report => "template_MOS.docx",
            ReportKind::Annex => "template_annex.docx",
        }
    }

    /// Placeholder prefix for numbered figures (`fig7`, `annex_fig7`, ...).
    pub fn figure_prefix(&self) -> &'static str {
        match self {
            ReportKind::Report => "fig",
            ReportKind::Annex => "annex_fig",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReportKind::Report => "Report",
            ReportKind::Annex => "Annex",
        }
    }

    pub fn includes_scores(&self) -> bool {
        matches!(self, ReportKind::Report)
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ReportKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "report" => Ok(ReportKind::Report),
            "annex" => Ok(ReportKind::Annex),
            _ => Err(CoreError::UnknownReportKind(s.to_string())),
        }
    }
}
