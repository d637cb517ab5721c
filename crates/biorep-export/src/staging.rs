//! Binding working-directory figures to template placeholders.

use std::path::{Path, PathBuf};

use biorep_core::context::{FigureInsert, RenderContext};
use biorep_core::models::report::ReportKind;
use biorep_core::paths;
use biorep_figures::overlay::{Caption, overlay_caption};

use crate::error::ExportError;
use crate::layout::FigureLayout;

/// A numbered figure found in the working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberedFigure {
    pub slot: u32,
    pub path: PathBuf,
}

/// PNG files named `..._<N>.png`, sorted by file name.
pub fn discover_figures(dir: &Path) -> Result<Vec<NumberedFigure>, ExportError> {
    let mut found = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if let Some(slot) = paths::figure_slot(name) {
            found.push(NumberedFigure {
                slot,
                path: entry.path(),
            });
        }
    }
    found.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));
    Ok(found)
}

/// Caption drawn over a slot's figure, if that slot carries one.
pub fn caption_for(slot: u32) -> Option<Caption> {
    match slot {
        2 => Some(Caption {
            text: "IHR PROTEOMPROFIL".to_string(),
            x: 100,
            y: 20,
            size_px: 18,
        }),
        3..=6 => Some(Caption {
            text: "Ihr persönliches Biomarker-Profil".to_string(),
            x: 50,
            y: 18,
            size_px: 20,
        }),
        _ => None,
    }
}

/// Bind every numbered figure in `dir` to `<prefix><N>` in the context.
///
/// Captioned slots get an overlaid temporary copy; if the overlay fails the
/// original image is used. When two files share a slot the later file name
/// wins. Returns the number of bound placeholders.
pub fn stage_figures(
    ctx: &mut RenderContext,
    dir: &Path,
    kind: ReportKind,
    layout: &FigureLayout,
) -> Result<usize, ExportError> {
    let figures = discover_figures(dir)?;
    for figure in &figures {
        let path = match caption_for(figure.slot) {
            Some(caption) => match overlay_caption(&figure.path, &caption) {
                Ok(copy) => copy,
                Err(e) => {
                    tracing::warn!(
                        figure = %figure.path.display(),
                        error = %e,
                        "caption overlay failed, using original"
                    );
                    figure.path.clone()
                }
            },
            None => figure.path.clone(),
        };
        let placeholder = format!("{}{}", kind.figure_prefix(), figure.slot);
        tracing::debug!(%placeholder, path = %path.display(), "figure staged");
        ctx.insert_figure(
            placeholder,
            FigureInsert {
                path,
                width_mm: layout.width_for(figure.slot),
            },
        );
    }
    Ok(ctx.figures.len())
}
