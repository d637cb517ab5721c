//! Template loading.

use std::path::{Path, PathBuf};

use docx_rs::Docx;

use biorep_core::models::language::Language;
use biorep_core::models::report::ReportKind;
use biorep_core::paths;

use crate::error::ExportError;

/// Resolve the template file for a report kind and language.
///
/// English reports use the `_EN` variant when it exists and otherwise fall
/// back to the base template.
pub fn template_path(
    templates_dir: &Path,
    kind: ReportKind,
    language: Language,
) -> Result<PathBuf, ExportError> {
    let base = templates_dir.join(kind.template_base());
    if let Some(localized) = paths::localized_template(kind.template_base(), language) {
        let candidate = templates_dir.join(localized);
        if candidate.is_file() {
            return Ok(candidate);
        }
        tracing::info!(
            missing = %candidate.display(),
            fallback = %base.display(),
            "no localized template, using base"
        );
    }
    if base.is_file() {
        Ok(base)
    } else {
        Err(ExportError::TemplateNotFound(base))
    }
}

/// Read and parse a DOCX template. Every call parses the file again, so a
/// document rendered from it never shares state with another.
pub fn read_template(path: &Path) -> Result<Docx, ExportError> {
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ExportError::TemplateNotFound(path.to_path_buf()),
        _ => ExportError::Io(e),
    })?;
    docx_rs::read_docx(&bytes)
        .map_err(|e| ExportError::TemplateParse(format!("{}: {e}", path.display())))
}

/// [`template_path`] followed by [`read_template`].
pub fn load_template(
    templates_dir: &Path,
    kind: ReportKind,
    language: Language,
) -> Result<(PathBuf, Docx), ExportError> {
    let path = template_path(templates_dir, kind, language)?;
    let docx = read_template(&path)?;
    tracing::debug!(template = %path.display(), "template loaded");
    Ok((path, docx))
}
