use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use rand::Rng;

use biorep_core::models::biomarker::BiomarkerModel;
use biorep_core::models::language::Language;
use biorep_core::models::population::ReferencePopulation;
use biorep_core::models::score::ScoreSet;
use biorep_core::paths;
use biorep_sheets::read_reference;

use crate::error::FigureError;
use crate::fonts;
use crate::plot::{DistributionInput, PlotLabels, compute_curves, render_png};
use crate::settings::FigureSettings;

/// Why a model produced no figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No reference workbook configured for the model.
    NoDataFile,
    /// The patient has no score for the model.
    NoPatientScore,
}

/// Outcome of a figure staging run.
#[derive(Debug, Default)]
pub struct StagedFigures {
    /// Written PNGs keyed `<Model>_<Lang>`.
    pub written: BTreeMap<String, PathBuf>,
    pub skipped: Vec<(BiomarkerModel, SkipReason)>,
}

/// Read the reference population of every model with a configured data file.
///
/// A workbook lacking its required columns is an error.
pub fn load_populations(
    data_dir: &Path,
    settings: &FigureSettings,
) -> Result<BTreeMap<BiomarkerModel, ReferencePopulation>, FigureError> {
    let mut populations = BTreeMap::new();
    for (model, file) in &settings.data_files {
        let population = read_reference(&data_dir.join(file))?;
        tracing::debug!(
            %model,
            healthy = population.healthy.len(),
            unhealthy = population.unhealthy.len(),
            "reference population read"
        );
        populations.insert(*model, population);
    }
    Ok(populations)
}

/// Generate one distribution figure per model and language into `dest_dir`.
///
/// Models without a configured data file, or without a patient score, are
/// skipped.
pub fn generate_all<R: Rng + ?Sized>(
    scores: &ScoreSet,
    data_dir: &Path,
    dest_dir: &Path,
    languages: &[Language],
    settings: &FigureSettings,
    rng: &mut R,
) -> Result<StagedFigures, FigureError> {
    let populations = load_populations(data_dir, settings)?;
    generate_from_populations(scores, &populations, dest_dir, languages, settings, rng)
}

/// [`generate_all`] over reference populations that are already in memory.
pub fn generate_from_populations<R: Rng + ?Sized>(
    scores: &ScoreSet,
    populations: &BTreeMap<BiomarkerModel, ReferencePopulation>,
    dest_dir: &Path,
    languages: &[Language],
    settings: &FigureSettings,
    rng: &mut R,
) -> Result<StagedFigures, FigureError> {
    std::fs::create_dir_all(dest_dir)?;
    fonts::ensure_font(settings.font_path.as_deref());
    let mut staged = StagedFigures::default();

    for model in BiomarkerModel::ALL {
        let Some(population) = populations.get(&model) else {
            staged.skipped.push((model, SkipReason::NoDataFile));
            continue;
        };

        let Some(patient_score) = scores.value(model.score_key()) else {
            tracing::info!(%model, "no patient score, figure skipped");
            staged.skipped.push((model, SkipReason::NoPatientScore));
            continue;
        };

        let band = settings.trims_outliers(model).then_some(settings.band);
        let input = DistributionInput {
            model,
            population,
            patient_score,
            prevalence: settings.prevalence_for(model),
            band,
            bandwidth: settings.bandwidth,
            axis_step: settings.axis_step,
        };
        let slot = settings.numbering.get(&model).copied();

        for &language in languages {
            let curves = compute_curves(&input, rng)?;
            let name = paths::distribution_figure(
                model.name(),
                language,
                curves.trimmed_lower_pct,
                slot,
            );
            let path = dest_dir.join(name);
            render_png(&curves, &PlotLabels::new(language, model), &path)?;

            tracing::info!(%model, %language, path = %path.display(), "distribution figure written");
            staged
                .written
                .insert(format!("{}_{}", model.name(), language.code()), path);
        }
    }

    Ok(staged)
}
