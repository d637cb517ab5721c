use serde::{Deserialize, Serialize};

/// One row of the patient store. Built by a lookup and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub given_name: String,
    pub family_name: String,
    pub date_of_birth: String,
    /// Free-text gender marker as entered in the store (e.g. "weiblich").
    pub gender: String,
    pub patient_id: String,
    pub sample_id: String,
    pub analysis_id: String,
    pub sample_date: String,
    pub address: String,
    pub diagnosis: String,
}

const FEMALE_MARKERS: [&str; 3] = ["weiblich", "female", "f"];

impl PatientRecord {
    pub fn is_female(&self) -> bool {
        let marker = self.gender.trim().to_lowercase();
        FEMALE_MARKERS.contains(&marker.as_str())
    }

    /// German salutation used in the report letter head.
    pub fn salutation(&self) -> &'static str {
        if self.is_female() { "Frau" } else { "Herr" }
    }

    /// Combined `<patient_id>-<sample_id>` reference printed on every page.
    pub fn patient_sample(&self) -> String {
        format!("{}-{}", self.patient_id, self.sample_id)
    }
}
