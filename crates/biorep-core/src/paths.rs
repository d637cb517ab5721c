//! File naming conventions.
//!
//! Pure string/path functions with no filesystem access. These define where the
//! pipeline reads inputs from and what it names its outputs, so that figure
//! staging and template insertion agree on names.

use std::path::{Path, PathBuf};

use crate::models::language::Language;
use crate::models::patient::PatientRecord;
use crate::models::report::ReportKind;

/// Classification workbook expected in the working directory.
pub const SCORES_WORKBOOK: &str = "Mustertabelle_Klassifikation_alles.xlsx";

/// `<Model>_distribution_plot_weighted_<Lang>[_noExtreme<lo>]_<Slot>.png`
///
/// `trimmed_lower_pct` is set when the reference groups were percentile
/// trimmed; `slot` is the figure number the template refers to.
pub fn distribution_figure(
    model: &str,
    language: Language,
    trimmed_lower_pct: Option<u32>,
    slot: Option<u32>,
) -> String {
    let mut stem = format!("{model}_distribution_plot_weighted_{}", language.code());
    if let Some(pct) = trimmed_lower_pct {
        stem.push_str(&format!("_noExtreme{pct}"));
    }
    if let Some(slot) = slot {
        stem.push_str(&format!("_{slot}"));
    }
    format!("{stem}.png")
}

/// Figure slot encoded as the trailing `_<digits>` of a `.png` file name.
pub fn figure_slot(file_name: &str) -> Option<u32> {
    let stem = file_name.strip_suffix(".png")?;
    let (_, digits) = stem.rsplit_once('_')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Template file name for a language: `EN` looks for a `_EN` variant first.
pub fn localized_template(base: &str, language: Language) -> Option<String> {
    match language {
        Language::De => None,
        Language::En => Some(match base.strip_suffix(".docx") {
            Some(stem) => format!("{stem}_EN.docx"),
            None => format!("{base}_EN"),
        }),
    }
}

/// `<family>_<given>_<Kind>[_<Lang>].docx` inside `working_dir`.
pub fn rendered_document(
    working_dir: &Path,
    patient: &PatientRecord,
    kind: ReportKind,
    language: Option<Language>,
) -> PathBuf {
    let mut name = format!(
        "{}_{}_{}",
        patient.family_name,
        patient.given_name,
        kind.label()
    );
    if let Some(lang) = language {
        name.push('_');
        name.push_str(lang.code());
    }
    name.push_str(".docx");
    working_dir.join(name)
}

/// The portable-document copy written next to a rendered document.
pub fn portable_copy(document: &Path) -> PathBuf {
    document.with_extension("pdf")
}
