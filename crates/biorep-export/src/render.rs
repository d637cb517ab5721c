use std::io::Cursor;
use std::path::Path;
use std::sync::LazyLock;

use docx_rs::{Docx, Paragraph, Pic, Run};
use regex::Regex;
use tera::{Context, Tera};

use biorep_core::context::{FigureInsert, RenderContext};

use crate::docx::{
    clear_run_text, for_each_paragraph_mut, paragraph_text, run_text, runs_mut, set_run_text,
};
use crate::error::ExportError;
use crate::tags::{has_tags, referenced_variables, tag_groups};

/// EMU per millimetre (OOXML drawing unit).
const EMU_PER_MM: f64 = 36_000.0;

static LONE_PLACEHOLDER: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^\s*\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}\s*$").ok());

/// Name of the variable when the text is nothing but `{{ name }}`.
pub fn lone_placeholder(text: &str) -> Option<&str> {
    let re = LONE_PLACEHOLDER.as_ref()?;
    re.captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// What happened to the paragraphs of a rendered document.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RenderSummary {
    /// Paragraphs whose tags were substituted.
    pub rendered: usize,
    pub figures: usize,
    /// Lone placeholders with no binding, emptied.
    pub cleared: usize,
    /// Unbound variables rendered as empty text.
    pub unbound: usize,
    /// Tag groups that failed to render and kept their text.
    pub kept: usize,
}

/// Fill `template` with `ctx` in place.
///
/// Unbound variables render as empty text. Runs are rewritten only where
/// they hold a tag, so formatting between tags survives.
pub fn fill_template(template: &mut Docx, ctx: &RenderContext) -> Result<RenderSummary, ExportError> {
    let base = Context::from_serialize(&ctx.values)?;
    let mut summary = RenderSummary::default();

    for_each_paragraph_mut(template, &mut |paragraph| {
        let text = paragraph_text(paragraph);
        if !has_tags(&text) {
            return;
        }

        if let Some(name) = lone_placeholder(&text) {
            if let Some(figure) = ctx.figures.get(name) {
                match picture_run(figure) {
                    Ok(run) => {
                        put_picture(paragraph, run);
                        summary.figures += 1;
                    }
                    Err(e) => {
                        tracing::warn!(placeholder = name, error = %e, "figure not inserted");
                        clear_text(paragraph);
                        summary.cleared += 1;
                    }
                }
                return;
            }
            if !ctx.values.contains_key(name) {
                tracing::debug!(placeholder = name, "unbound placeholder cleared");
                clear_text(paragraph);
                summary.cleared += 1;
                return;
            }
        }

        let mut local = base.clone();
        for name in referenced_variables(&text) {
            if !ctx.values.contains_key(name) {
                tracing::debug!(placeholder = name, "unbound variable rendered empty");
                local.insert(name, "");
                summary.unbound += 1;
            }
        }

        let mut runs = runs_mut(paragraph);
        let texts: Vec<String> = runs.iter().map(|r| run_text(r)).collect();
        let mut changed = false;
        for group in tag_groups(&texts) {
            let source = texts[group.clone()].concat();
            match Tera::one_off(&source, &local, false) {
                Ok(rendered) => {
                    set_run_text(&mut *runs[group.start], &rendered);
                    for run in runs[group.start + 1..group.end].iter_mut() {
                        clear_run_text(run);
                    }
                    changed = true;
                }
                Err(e) => {
                    tracing::warn!(template = %source, error = %e, "tags left unrendered");
                    summary.kept += 1;
                }
            }
        }
        if changed {
            summary.rendered += 1;
        }
    });

    Ok(summary)
}

/// Fill `template` and write it to `output`.
pub fn render_document(
    mut template: Docx,
    ctx: &RenderContext,
    output: &Path,
) -> Result<RenderSummary, ExportError> {
    let summary = fill_template(&mut template, ctx)?;

    let mut buf = Cursor::new(Vec::new());
    template
        .build()
        .pack(&mut buf)
        .map_err(|e| ExportError::Docx(e.to_string()))?;

    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(output, buf.into_inner())?;

    tracing::info!(
        path = %output.display(),
        rendered = summary.rendered,
        figures = summary.figures,
        "document written"
    );
    Ok(summary)
}

fn picture_run(figure: &FigureInsert) -> Result<Run, ExportError> {
    let bytes = std::fs::read(&figure.path)?;
    let (w_px, h_px) = image::image_dimensions(&figure.path)
        .map_err(|e| ExportError::Docx(format!("{}: {e}", figure.path.display())))?;
    if w_px == 0 {
        return Err(ExportError::Docx(format!(
            "{}: zero-width image",
            figure.path.display()
        )));
    }
    let height_mm = figure.width_mm * f64::from(h_px) / f64::from(w_px);
    let pic = Pic::new(&bytes).size(
        (figure.width_mm * EMU_PER_MM).round() as u32,
        (height_mm * EMU_PER_MM).round() as u32,
    );
    Ok(Run::new().add_image(pic))
}

/// Put the picture into the first run and empty the others.
fn put_picture(paragraph: &mut Paragraph, picture: Run) {
    let mut runs = runs_mut(paragraph);
    let Some((first, rest)) = runs.split_first_mut() else {
        return;
    };
    first.children = picture.children;
    for run in rest {
        clear_run_text(run);
    }
}

fn clear_text(paragraph: &mut Paragraph) {
    for run in runs_mut(paragraph) {
        clear_run_text(run);
    }
}
