//! Report generation for one patient and working directory.

use std::path::{Path, PathBuf};

use eyre::WrapErr;
use jiff::civil::Date;

use biorep_core::context::RenderContext;
use biorep_core::models::language::Language;
use biorep_core::models::patient::PatientRecord;
use biorep_core::models::report::ReportKind;
use biorep_core::models::score::ScoreSet;
use biorep_core::models::search::PatientQuery;
use biorep_core::paths;
use biorep_export::error::ConvertError;
use biorep_export::render::RenderSummary;
use biorep_export::{
    evaluate_thresholds, load_template, detect_converter, render_document, spawn_conversion,
    stage_figures,
};
use biorep_figures::{StagedFigures, generate_all};
use biorep_sheets::load_scores;
use biorep_storage::{find_patient, open_store};

use crate::config::ReportConfig;

#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub query: PatientQuery,
    pub working_dir: PathBuf,
    pub language: Language,
    pub kind: ReportKind,
}

#[derive(Debug)]
pub struct GeneratedDocument {
    pub patient: PatientRecord,
    pub document: PathBuf,
    pub template: PathBuf,
    /// `None` when distribution figures were not attempted or failed.
    pub distribution: Option<StagedFigures>,
    pub narratives: usize,
    pub summary: RenderSummary,
}

pub fn lookup(config: &ReportConfig, query: &PatientQuery) -> eyre::Result<PatientRecord> {
    let conn = open_store(&config.database_path)?;
    let patient = find_patient(&conn, query)?;
    Ok(patient)
}

/// Produce the DOCX for `request`. Conversion is a separate step.
pub fn generate(
    config: &ReportConfig,
    request: &GenerateRequest,
    today: Date,
) -> eyre::Result<GeneratedDocument> {
    let working_dir = &request.working_dir;
    if !working_dir.is_dir() {
        eyre::bail!("working directory {} does not exist", working_dir.display());
    }

    let patient = lookup(config, &request.query)?;
    tracing::info!(
        patient = %patient.patient_sample(),
        kind = %request.kind,
        language = %request.language,
        "generating document"
    );

    let (template_path, template) =
        load_template(&config.templates_dir, request.kind, request.language)?;

    let mut ctx = RenderContext::for_patient(&patient, today);
    let workbook = working_dir.join(&config.scores_workbook);

    let mut narratives = 0;
    let scores = if request.kind.includes_scores() {
        let scores = load_scores(&workbook)
            .wrap_err_with(|| format!("reading scores from {}", workbook.display()))?;
        // Only the German base report carries the Normalbereich table.
        let (_, base) = load_template(&config.templates_dir, ReportKind::Report, Language::De)
            .wrap_err("loading the base report for its threshold table")?;
        let outcome = evaluate_thresholds(&scores, &base);
        ctx.merge_scores(&scores);
        ctx.merge_outcome(&outcome);
        narratives = outcome.len();
        Some(scores)
    } else {
        match load_scores(&workbook) {
            Ok(scores) => Some(scores),
            Err(e) => {
                tracing::warn!(error = %e, "no scores for annex figures");
                None
            }
        }
    };

    let distribution = scores
        .as_ref()
        .and_then(|s| stage_distribution(config, s, working_dir, request.language));

    stage_figures(&mut ctx, working_dir, request.kind, &config.layout)?;

    let document =
        paths::rendered_document(working_dir, &patient, request.kind, Some(request.language));
    let summary = render_document(template, &ctx, &document)?;

    Ok(GeneratedDocument {
        patient,
        document,
        template: template_path,
        distribution,
        narratives,
        summary,
    })
}

/// Write the per-model distribution figures into the working directory.
/// Failures only cost the figures.
fn stage_distribution(
    config: &ReportConfig,
    scores: &ScoreSet,
    working_dir: &Path,
    language: Language,
) -> Option<StagedFigures> {
    if !config.data_dir.is_dir() {
        tracing::warn!(
            data_dir = %config.data_dir.display(),
            "data folder not found, skipping distribution figures"
        );
        return None;
    }
    let mut rng = rand::thread_rng();
    match generate_all(
        scores,
        &config.data_dir,
        working_dir,
        &[language],
        &config.figures,
        &mut rng,
    ) {
        Ok(staged) => {
            for (model, reason) in &staged.skipped {
                tracing::info!(%model, ?reason, "distribution figure skipped");
            }
            Some(staged)
        }
        Err(e) => {
            tracing::warn!(error = %e, "could not generate distribution figures");
            None
        }
    }
}

/// Convert `document` to PDF next to it with the first available converter.
pub async fn convert_document(
    config: &ReportConfig,
    document: &Path,
) -> Result<PathBuf, ConvertError> {
    let converter = detect_converter(&config.converter)?;
    let out_dir = document
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let rx = spawn_conversion(converter, document.to_path_buf(), out_dir);
    rx.await
        .map_err(|e| ConvertError::Worker(e.to_string()))?
}
