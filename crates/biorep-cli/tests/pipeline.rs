use std::io::Cursor;
use std::path::Path;

use docx_rs::{DocumentChild, Docx, Paragraph, Run, Table, TableCell, TableRow};
use rust_xlsxwriter::Workbook;

use biorep_cli::config::ReportConfig;
use biorep_cli::pipeline::{GenerateRequest, generate, lookup};
use biorep_core::models::biomarker::BiomarkerModel;
use biorep_core::models::language::Language;
use biorep_core::models::patient::PatientRecord;
use biorep_core::models::report::ReportKind;
use biorep_core::models::search::{PatientQuery, SearchMode};
use biorep_export::docx::paragraph_text;
use biorep_figures::FigureSettings;
use biorep_storage::{create_store, insert_patient};

struct Fixture {
    _dir: tempfile::TempDir,
    config: ReportConfig,
    workdir: std::path::PathBuf,
}

fn write_template(path: &Path, lines: &[&str]) {
    let mut docx = Docx::new();
    for line in lines {
        docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*line)));
    }
    let mut buf = Cursor::new(Vec::new());
    docx.build().pack(&mut buf).unwrap();
    std::fs::write(path, buf.into_inner()).unwrap();
}

fn text_cell(text: &str) -> TableCell {
    TableCell::new().add_paragraph(Paragraph::new().add_run(Run::new().add_text(text)))
}

/// German base report: one placeholder paragraph and the normal-range table.
fn write_base_report(path: &Path) {
    let rows = [
        ["Modell", "Score", "Einheit", "Normalbereich"],
        ["CKD", "{{ CKD_score }}", "", "<0,500"],
        ["CAD", "{{ CAD_score }}", "", "<0,300"],
        ["HF", "{{ HF_score }}", "", "<0,200"],
        ["Onkorisk", "{{ Onkorisk_score }}", "", "<0,100"],
    ];
    let table = Table::new(
        rows.iter()
            .map(|row| TableRow::new(row.iter().map(|c| text_cell(c)).collect()))
            .collect(),
    );
    let docx = Docx::new()
        .add_paragraph(Paragraph::new().add_run(Run::new().add_text("CKD: {{ ckd_sentence }}")))
        .add_table(table);
    let mut buf = Cursor::new(Vec::new());
    docx.build().pack(&mut buf).unwrap();
    std::fs::write(path, buf.into_inner()).unwrap();
}

/// Classification export with CKD below and CAD above its normal range.
fn write_scores(path: &Path) {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, label) in [(1, "Sample"), (2, "CKD273ML1hybrid"), (3, "CAD238ML1k.mdl")] {
        sheet.write_string(2, col, label).unwrap();
    }
    sheet.write_string(3, 1, "final score").unwrap();
    sheet.write_number(3, 2, 0.4127).unwrap();
    sheet.write_number(3, 3, 0.9).unwrap();
    workbook.save(path).unwrap();
}

fn write_ckd_reference(path: &Path) {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "group").unwrap();
    sheet.write_string(0, 1, "score").unwrap();
    for i in 0..30u32 {
        sheet.write_number(i + 1, 0, 0.0).unwrap();
        sheet.write_number(i + 1, 1, -1.0 + f64::from(i) * 0.03).unwrap();
    }
    for i in 0..20u32 {
        sheet.write_number(i + 31, 0, 1.0).unwrap();
        sheet.write_number(i + 31, 1, 0.1 + f64::from(i) * 0.05).unwrap();
    }
    workbook.save(path).unwrap();
}

fn body_texts(path: &Path) -> Vec<String> {
    let bytes = std::fs::read(path).unwrap();
    let docx = docx_rs::read_docx(&bytes).unwrap();
    docx.document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(p) => Some(paragraph_text(p)),
            _ => None,
        })
        .collect()
}

fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    let db = root.join("patients.db");
    let conn = create_store(&db).unwrap();
    insert_patient(
        &conn,
        &PatientRecord {
            given_name: "Anna".to_string(),
            family_name: "Muster".to_string(),
            date_of_birth: "12.03.1961".to_string(),
            gender: "weiblich".to_string(),
            patient_id: "P1001".to_string(),
            sample_id: "S2001".to_string(),
            analysis_id: "A3001".to_string(),
            sample_date: "02.09.2026".to_string(),
            address: "Lindenweg 4".to_string(),
            diagnosis: String::new(),
        },
    )
    .unwrap();
    drop(conn);

    let templates = root.join("templates");
    std::fs::create_dir_all(&templates).unwrap();
    write_template(
        &templates.join("template_annex.docx"),
        &["{{ anrede }} {{ name }}", "{{ annex_fig1 }}", "{{ annex_fig3 }}"],
    );
    write_template(&templates.join("template_MOS.docx"), &["{{ CKD_score }}"]);

    let workdir = root.join("work");
    std::fs::create_dir_all(&workdir).unwrap();

    let mut config = ReportConfig::default();
    config.database_path = db;
    config.templates_dir = templates;
    config.data_dir = root.join("no-data-here");

    Fixture {
        _dir: dir,
        config,
        workdir,
    }
}

fn request(fx: &Fixture, kind: ReportKind, language: Language) -> GenerateRequest {
    GenerateRequest {
        query: PatientQuery::new(SearchMode::SampleId, "S2001").unwrap(),
        working_dir: fx.workdir.clone(),
        language,
        kind,
    }
}

#[test]
fn annex_is_rendered_without_scores_or_data() {
    let fx = fixture();
    let generated = generate(
        &fx.config,
        &request(&fx, ReportKind::Annex, Language::De),
        jiff::civil::date(2026, 10, 18),
    )
    .unwrap();

    assert_eq!(generated.document, fx.workdir.join("Muster_Anna_Annex_DE.docx"));
    assert!(generated.document.exists());
    assert!(generated.distribution.is_none());
    assert_eq!(generated.narratives, 0);
    assert_eq!(generated.summary.rendered, 1);
    assert_eq!(generated.summary.cleared, 2);
}

#[test]
fn english_annex_falls_back_to_base_template() {
    let fx = fixture();
    let generated = generate(
        &fx.config,
        &request(&fx, ReportKind::Annex, Language::En),
        jiff::civil::date(2026, 10, 18),
    )
    .unwrap();

    assert_eq!(generated.template, fx.config.templates_dir.join("template_annex.docx"));
    assert_eq!(generated.document, fx.workdir.join("Muster_Anna_Annex_EN.docx"));
}

#[test]
fn english_report_takes_thresholds_from_the_german_base() {
    let mut fx = fixture();
    let templates = &fx.config.templates_dir;
    write_base_report(&templates.join("template_MOS.docx"));
    write_template(
        &templates.join("template_MOS_EN.docx"),
        &[
            "CKD {{ CKD_score }}: {{ ckd_sentence }} finding",
            "CAD {{ CAD_score }}: {{ cad_sentence }} finding",
            "HF: [{{ hf_sentence }}]",
            "{{ fig7 }}",
        ],
    );
    write_scores(&fx.workdir.join(&fx.config.scores_workbook));

    let data = fx._dir.path().join("data");
    std::fs::create_dir_all(&data).unwrap();
    write_ckd_reference(&data.join("CKD_273.xlsx"));
    fx.config.data_dir = data;
    fx.config.figures = FigureSettings {
        data_files: [(BiomarkerModel::Ckd, "CKD_273.xlsx".to_string())].into(),
        ..FigureSettings::default()
    };

    let generated = generate(
        &fx.config,
        &request(&fx, ReportKind::Report, Language::En),
        jiff::civil::date(2026, 10, 18),
    )
    .unwrap();

    assert_eq!(generated.template, fx.config.templates_dir.join("template_MOS_EN.docx"));
    assert_eq!(generated.document, fx.workdir.join("Muster_Anna_Report_EN.docx"));
    assert_eq!(generated.narratives, 2);

    let staged = generated.distribution.unwrap();
    let figure = &staged.written["CKD_EN"];
    assert_eq!(figure, &fx.workdir.join("CKD_distribution_plot_weighted_EN_7.png"));
    assert!(figure.is_file());
    assert_eq!(generated.summary.figures, 1);

    let texts = body_texts(&generated.document);
    assert_eq!(texts[0], "CKD 0.413: keine finding");
    assert_eq!(texts[1], "CAD 0.900: eine finding");
    assert_eq!(texts[2], "HF: []");
}

#[test]
fn report_requires_the_scores_workbook() {
    let fx = fixture();
    let err = generate(
        &fx.config,
        &request(&fx, ReportKind::Report, Language::De),
        jiff::civil::date(2026, 10, 18),
    )
    .unwrap_err();
    assert!(format!("{err:#}").contains("reading scores"));
    assert!(!fx.workdir.join("Muster_Anna_Report_DE.docx").exists());
}

#[test]
fn unknown_patient_aborts() {
    let fx = fixture();
    let mut req = request(&fx, ReportKind::Annex, Language::De);
    req.query = PatientQuery::new(SearchMode::Name, "Nobody").unwrap();
    let err = generate(&fx.config, &req, jiff::civil::date(2026, 10, 18)).unwrap_err();
    assert!(err.to_string().contains("no patient found"));
}

#[test]
fn missing_working_directory_aborts() {
    let fx = fixture();
    let mut req = request(&fx, ReportKind::Annex, Language::De);
    req.working_dir = fx.workdir.join("absent");
    assert!(generate(&fx.config, &req, jiff::civil::date(2026, 10, 18)).is_err());
}

#[test]
fn lookup_resolves_by_patient_id() {
    let fx = fixture();
    let query = PatientQuery::new(SearchMode::PatientId, "P1001").unwrap();
    let patient = lookup(&fx.config, &query).unwrap();
    assert_eq!(patient.given_name, "Anna");
}
