//! Render context assembly.
//!
//! Merges patient fields, scores, narratives, and staged figures into the
//! single key/value mapping a template is rendered against.

use std::collections::BTreeMap;
use std::path::PathBuf;

use jiff::civil::Date;
use serde::Serialize;

use crate::models::narrative::ThresholdOutcome;
use crate::models::patient::PatientRecord;
use crate::models::score::ScoreSet;

/// An image bound to a template placeholder.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FigureInsert {
    /// File actually inserted (may be a temporary overlay copy).
    pub path: PathBuf,
    /// Physical width on the page, in millimetres.
    pub width_mm: f64,
}

/// Everything a template is rendered against. Built fresh per report.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RenderContext {
    pub values: BTreeMap<String, String>,
    pub figures: BTreeMap<String, FigureInsert>,
}

impl RenderContext {
    /// Context seeded with the patient fields and a `report_date` of `today`.
    pub fn for_patient(patient: &PatientRecord, today: Date) -> Self {
        let mut values = BTreeMap::new();
        let mut put = |k: &str, v: &str| {
            values.insert(k.to_string(), v.to_string());
        };

        put("anrede", patient.salutation());
        put("vorname", &patient.given_name);
        put("name", &patient.family_name);
        put("dob", &patient.date_of_birth);
        put("geschlecht", &patient.gender);
        put("patient_id", &patient.patient_id);
        put("sample_id", &patient.sample_id);
        put("analysis_id", &patient.analysis_id);
        put("sample_date", &patient.sample_date);
        put("address", &patient.address);
        put("diagnosis", &patient.diagnosis);
        put("report_date", &today.strftime("%d.%m.%Y").to_string());
        put("patient_sample", &patient.patient_sample());

        Self {
            values,
            figures: BTreeMap::new(),
        }
    }

    pub fn merge_scores(&mut self, scores: &ScoreSet) {
        for (key, value) in scores.iter() {
            self.values.insert(key.to_string(), value.to_string());
        }
    }

    pub fn merge_outcome(&mut self, outcome: &ThresholdOutcome) {
        for (key, wording) in outcome.sentences() {
            self.values.insert(key.to_string(), wording.to_string());
        }
    }

    pub fn insert_figure(&mut self, placeholder: impl Into<String>, figure: FigureInsert) {
        self.figures.insert(placeholder.into(), figure);
    }

    /// Whether a placeholder has any binding, text or image.
    pub fn binds(&self, placeholder: &str) -> bool {
        self.values.contains_key(placeholder) || self.figures.contains_key(placeholder)
    }
}
