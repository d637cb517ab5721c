//! DOCX to PDF conversion through an installed office suite.
//!
//! A [`Converter`] is chosen once by [`detect_converter`], which only searches
//! `PATH`. The conversion itself runs on a blocking worker and reports back
//! through a oneshot channel.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;

use crate::error::ConvertError;

pub trait Converter: Send + Sync {
    fn name(&self) -> &str;

    /// Convert `docx` to PDF inside `out_dir` and return the PDF path.
    fn convert(&self, docx: &Path, out_dir: &Path) -> Result<PathBuf, ConvertError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConverterKind {
    Word,
    OnlyOffice,
    LibreOffice,
}

impl ConverterKind {
    /// Executable names searched for on `PATH`.
    pub fn executables(&self) -> &'static [&'static str] {
        match self {
            ConverterKind::Word => &["powershell"],
            ConverterKind::OnlyOffice => &["desktopeditors", "onlyoffice-desktopeditors"],
            ConverterKind::LibreOffice => &["libreoffice", "soffice"],
        }
    }

    pub fn supported_here(&self) -> bool {
        match self {
            ConverterKind::Word => cfg!(windows),
            _ => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterSettings {
    /// Converters tried in this order.
    pub order: Vec<ConverterKind>,
    /// Explicit executable per converter, used instead of a `PATH` search.
    pub executables: BTreeMap<ConverterKind, PathBuf>,
}

impl Default for ConverterSettings {
    fn default() -> Self {
        Self {
            order: vec![
                ConverterKind::Word,
                ConverterKind::OnlyOffice,
                ConverterKind::LibreOffice,
            ],
            executables: BTreeMap::new(),
        }
    }
}

/// Microsoft Word driven over COM from PowerShell.
#[derive(Debug, Clone)]
pub struct WordConverter {
    pub powershell: PathBuf,
}

/// ONLYOFFICE desktop editors in `--convert` mode.
#[derive(Debug, Clone)]
pub struct OnlyOfficeConverter {
    pub executable: PathBuf,
}

/// LibreOffice in headless mode.
#[derive(Debug, Clone)]
pub struct LibreOfficeConverter {
    pub executable: PathBuf,
}

/// Where a converter leaves the PDF for `docx`.
pub fn expected_output(docx: &Path, out_dir: &Path) -> PathBuf {
    let mut name = docx.file_stem().unwrap_or_default().to_os_string();
    name.push(".pdf");
    out_dir.join(name)
}

fn run(name: &str, cmd: &mut Command, expected: PathBuf) -> Result<PathBuf, ConvertError> {
    tracing::debug!(converter = name, command = ?cmd, "starting conversion");
    let output = cmd.output().map_err(|source| ConvertError::Spawn {
        converter: name.to_string(),
        source,
    })?;
    if !output.status.success() {
        return Err(ConvertError::Failed {
            converter: name.to_string(),
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    if !expected.is_file() {
        return Err(ConvertError::MissingOutput {
            converter: name.to_string(),
            expected,
        });
    }
    Ok(expected)
}

impl Converter for WordConverter {
    fn name(&self) -> &str {
        "Microsoft Word"
    }

    fn convert(&self, docx: &Path, out_dir: &Path) -> Result<PathBuf, ConvertError> {
        let expected = expected_output(docx, out_dir);
        // wdFormatPDF = 17
        let script = format!(
            "$w = New-Object -ComObject Word.Application; $w.Visible = $false; \
             try {{ $d = $w.Documents.Open('{}', $false, $true); \
             $d.SaveAs([ref] '{}', [ref] 17); $d.Close($false) }} \
             finally {{ $w.Quit() }}",
            ps_quote(docx),
            ps_quote(&expected),
        );
        let mut cmd = Command::new(&self.powershell);
        cmd.args(["-NoProfile", "-NonInteractive", "-Command", &script]);
        run(self.name(), &mut cmd, expected)
    }
}

fn ps_quote(path: &Path) -> String {
    path.display().to_string().replace('\'', "''")
}

impl Converter for OnlyOfficeConverter {
    fn name(&self) -> &str {
        "ONLYOFFICE"
    }

    fn convert(&self, docx: &Path, out_dir: &Path) -> Result<PathBuf, ConvertError> {
        let mut cmd = Command::new(&self.executable);
        cmd.arg("--convert").arg(docx).arg("--output").arg(out_dir);
        run(self.name(), &mut cmd, expected_output(docx, out_dir))
    }
}

impl Converter for LibreOfficeConverter {
    fn name(&self) -> &str {
        "LibreOffice"
    }

    fn convert(&self, docx: &Path, out_dir: &Path) -> Result<PathBuf, ConvertError> {
        let mut cmd = Command::new(&self.executable);
        cmd.args(["--headless", "--convert-to", "pdf", "--outdir"])
            .arg(out_dir)
            .arg(docx);
        run(self.name(), &mut cmd, expected_output(docx, out_dir))
    }
}

/// First file named one of `names` in the directories of `path_var`.
pub fn find_executable(names: &[&str], path_var: Option<&std::ffi::OsStr>) -> Option<PathBuf> {
    let path_var = path_var?;
    for dir in std::env::split_paths(path_var) {
        for name in names {
            let candidate = dir.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
            if cfg!(windows) {
                let exe = candidate.with_extension("exe");
                if exe.is_file() {
                    return Some(exe);
                }
            }
        }
    }
    None
}

fn build(kind: ConverterKind, executable: PathBuf) -> Arc<dyn Converter> {
    match kind {
        ConverterKind::Word => Arc::new(WordConverter {
            powershell: executable,
        }),
        ConverterKind::OnlyOffice => Arc::new(OnlyOfficeConverter { executable }),
        ConverterKind::LibreOffice => Arc::new(LibreOfficeConverter { executable }),
    }
}

/// [`detect_converter_in`] against this process's `PATH`.
pub fn detect_converter(settings: &ConverterSettings) -> Result<Arc<dyn Converter>, ConvertError> {
    let path_var = std::env::var_os("PATH");
    detect_converter_in(settings, path_var.as_deref())
}

/// Pick the first available converter in `settings.order`. Nothing is run.
pub fn detect_converter_in(
    settings: &ConverterSettings,
    path_var: Option<&std::ffi::OsStr>,
) -> Result<Arc<dyn Converter>, ConvertError> {
    for &kind in &settings.order {
        if !kind.supported_here() {
            continue;
        }
        let executable = match settings.executables.get(&kind) {
            Some(explicit) if explicit.is_file() => Some(explicit.clone()),
            Some(explicit) => {
                tracing::warn!(?kind, path = %explicit.display(), "configured converter missing");
                None
            }
            None => find_executable(kind.executables(), path_var),
        };
        if let Some(executable) = executable {
            let converter = build(kind, executable);
            tracing::info!(converter = converter.name(), "document converter selected");
            return Ok(converter);
        }
    }
    Err(ConvertError::NoConverter)
}

/// Run `converter` on a blocking worker and deliver the outcome on the
/// returned channel. The DOCX is left in place whatever the result.
pub fn spawn_conversion(
    converter: Arc<dyn Converter>,
    docx: PathBuf,
    out_dir: PathBuf,
) -> oneshot::Receiver<Result<PathBuf, ConvertError>> {
    let (tx, rx) = oneshot::channel();
    tokio::task::spawn_blocking(move || {
        let result = converter.convert(&docx, &out_dir);
        match &result {
            Ok(pdf) => tracing::info!(converter = converter.name(), pdf = %pdf.display(), "conversion finished"),
            Err(e) => tracing::warn!(converter = converter.name(), error = %e, "conversion failed"),
        }
        let _ = tx.send(result);
    });
    rx
}
