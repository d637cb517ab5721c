use std::path::{Path, PathBuf};
use std::sync::Arc;

use biorep_export::convert::{
    Converter, ConverterKind, ConverterSettings, expected_output, detect_converter_in,
    spawn_conversion,
};
use biorep_export::error::ConvertError;

struct WritesPdf;

impl Converter for WritesPdf {
    fn name(&self) -> &str {
        "fake"
    }

    fn convert(&self, docx: &Path, out_dir: &Path) -> Result<PathBuf, ConvertError> {
        let pdf = expected_output(docx, out_dir);
        std::fs::write(&pdf, b"%PDF-1.7").map_err(|e| ConvertError::Worker(e.to_string()))?;
        Ok(pdf)
    }
}

struct AlwaysFails;

impl Converter for AlwaysFails {
    fn name(&self) -> &str {
        "broken"
    }

    fn convert(&self, _docx: &Path, out_dir: &Path) -> Result<PathBuf, ConvertError> {
        Err(ConvertError::MissingOutput {
            converter: self.name().to_string(),
            expected: out_dir.join("x.pdf"),
        })
    }
}

#[tokio::test]
async fn conversion_result_arrives_on_channel() {
    let dir = tempfile::tempdir().unwrap();
    let docx = dir.path().join("Muster_Anna_Report_DE.docx");
    std::fs::write(&docx, b"PK").unwrap();

    let rx = spawn_conversion(Arc::new(WritesPdf), docx.clone(), dir.path().to_path_buf());
    let pdf = rx.await.unwrap().unwrap();

    assert_eq!(pdf, dir.path().join("Muster_Anna_Report_DE.pdf"));
    assert!(pdf.exists());
    assert!(docx.exists());
}

#[tokio::test]
async fn failed_conversion_keeps_the_document() {
    let dir = tempfile::tempdir().unwrap();
    let docx = dir.path().join("report.docx");
    std::fs::write(&docx, b"PK").unwrap();

    let rx = spawn_conversion(Arc::new(AlwaysFails), docx.clone(), dir.path().to_path_buf());
    let result = rx.await.unwrap();

    assert!(matches!(result, Err(ConvertError::MissingOutput { .. })));
    assert!(docx.exists());
}

#[test]
fn detection_follows_configured_order() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("soffice"), b"").unwrap();
    std::fs::write(dir.path().join("desktopeditors"), b"").unwrap();
    let path_var = dir.path().as_os_str();

    let settings = ConverterSettings {
        order: vec![ConverterKind::LibreOffice, ConverterKind::OnlyOffice],
        ..ConverterSettings::default()
    };
    let chosen = detect_converter_in(&settings, Some(path_var)).unwrap();
    assert_eq!(chosen.name(), "LibreOffice");

    let chosen = detect_converter_in(&ConverterSettings::default(), Some(path_var)).unwrap();
    if cfg!(not(windows)) {
        assert_eq!(chosen.name(), "ONLYOFFICE");
    }
}

#[test]
fn detection_without_candidates_fails() {
    let dir = tempfile::tempdir().unwrap();
    let err = detect_converter_in(&ConverterSettings::default(), Some(dir.path().as_os_str()));
    assert!(matches!(err, Err(ConvertError::NoConverter)));
    assert!(matches!(
        detect_converter_in(&ConverterSettings::default(), None),
        Err(ConvertError::NoConverter)
    ));
}

#[test]
fn explicit_executable_skips_path_search() {
    let dir = tempfile::tempdir().unwrap();
    let exe = dir.path().join("my-office");
    std::fs::write(&exe, b"").unwrap();

    let mut settings = ConverterSettings {
        order: vec![ConverterKind::OnlyOffice],
        ..ConverterSettings::default()
    };
    settings.executables.insert(ConverterKind::OnlyOffice, exe);

    let chosen = detect_converter_in(&settings, None).unwrap();
    assert_eq!(chosen.name(), "ONLYOFFICE");
}

#[test]
fn pdf_lands_next_to_stem_in_out_dir() {
    assert_eq!(
        expected_output(Path::new("/w/Muster_Anna_Annex.docx"), Path::new("/out")),
        PathBuf::from("/out/Muster_Anna_Annex.pdf")
    );
}
