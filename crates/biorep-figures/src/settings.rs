use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use biorep_core::models::biomarker::BiomarkerModel;

/// Relative weights applied to the healthy and unhealthy density curves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prevalence {
    pub healthy: f64,
    pub unhealthy: f64,
}

impl Default for Prevalence {
    fn default() -> Self {
        Self {
            healthy: 0.88,
            unhealthy: 0.12,
        }
    }
}

/// Inner percentile band kept when trimming outliers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PercentileBand {
    pub lower: u32,
    pub upper: u32,
}

impl Default for PercentileBand {
    fn default() -> Self {
        Self { lower: 4, upper: 96 }
    }
}

/// Everything that shapes the distribution figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FigureSettings {
    /// Reference population workbook per model, relative to the data directory.
    pub data_files: BTreeMap<BiomarkerModel, String>,
    /// Figure slot per model; becomes the `_<N>` file name suffix.
    pub numbering: BTreeMap<BiomarkerModel, u32>,
    /// Per-model prevalence; models not listed use [`Prevalence::default`].
    pub prevalence: BTreeMap<BiomarkerModel, Prevalence>,
    /// Models whose groups are trimmed to `band` before estimation.
    pub outlier_models: Vec<BiomarkerModel>,
    pub band: PercentileBand,
    /// Scalar KDE bandwidth factor.
    pub bandwidth: f64,
    /// Axis bounds are rounded outward to a multiple of this step.
    pub axis_step: f64,
    /// TrueType font for figure text; common system fonts are tried when unset.
    pub font_path: Option<PathBuf>,
}

impl Default for FigureSettings {
    fn default() -> Self {
        let data_files = [
            (BiomarkerModel::Ckd, "CKD_273.xlsx"),
            (BiomarkerModel::Cad, "CAD_238.xlsx"),
            (BiomarkerModel::Hf, "HF2.xlsx"),
            (BiomarkerModel::Oncorisk, "Oncorisk_norm.xlsx"),
        ]
        .into_iter()
        .map(|(m, f)| (m, f.to_string()))
        .collect();

        let numbering = [
            (BiomarkerModel::Ckd, 7),
            (BiomarkerModel::Cad, 8),
            (BiomarkerModel::Hf, 9),
            (BiomarkerModel::Oncorisk, 10),
        ]
        .into_iter()
        .collect();

        let prevalence = BiomarkerModel::ALL
            .into_iter()
            .map(|m| (m, Prevalence::default()))
            .collect();

        Self {
            data_files,
            numbering,
            prevalence,
            outlier_models: vec![
                BiomarkerModel::Cad,
                BiomarkerModel::Hf,
                BiomarkerModel::Oncorisk,
            ],
            band: PercentileBand::default(),
            bandwidth: 0.5,
            axis_step: 0.5,
            font_path: None,
        }
    }
}

impl FigureSettings {
    pub fn prevalence_for(&self, model: BiomarkerModel) -> Prevalence {
        self.prevalence.get(&model).copied().unwrap_or_default()
    }

    pub fn trims_outliers(&self, model: BiomarkerModel) -> bool {
        self.outlier_models.contains(&model)
    }
}
