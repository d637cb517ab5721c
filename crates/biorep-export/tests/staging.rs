use std::path::Path;

use image::{Rgb, RgbImage};

use biorep_core::context::RenderContext;
use biorep_core::models::report::ReportKind;
use biorep_export::layout::FigureLayout;
use biorep_export::staging::{caption_for, discover_figures, stage_figures};

fn write_png(path: &Path) {
    RgbImage::from_pixel(300, 200, Rgb([0, 60, 120])).save(path).unwrap();
}

fn seeded_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_png(&dir.path().join("profile_2.png"));
    write_png(&dir.path().join("CKD_distribution_plot_weighted_DE_7.png"));
    write_png(&dir.path().join("overview_1.png"));
    write_png(&dir.path().join("logo.png"));
    std::fs::write(dir.path().join("notes_3.txt"), "x").unwrap();
    dir
}

#[test]
fn only_numbered_pngs_are_discovered_in_name_order() {
    let dir = seeded_dir();
    let found = discover_figures(dir.path()).unwrap();
    let slots: Vec<u32> = found.iter().map(|f| f.slot).collect();
    assert_eq!(slots, vec![7, 1, 2]);
}

#[test]
fn figures_bind_to_kind_prefix_with_layout_widths() {
    let dir = seeded_dir();
    let mut ctx = RenderContext::default();

    let bound = stage_figures(&mut ctx, dir.path(), ReportKind::Report, &FigureLayout::default())
        .unwrap();

    assert_eq!(bound, 3);
    assert_eq!(ctx.figures["fig1"].width_mm, 150.0);
    assert_eq!(ctx.figures["fig2"].width_mm, 83.0);
    assert_eq!(ctx.figures["fig7"].width_mm, 80.0);
    assert_eq!(
        ctx.figures["fig1"].path,
        dir.path().join("overview_1.png"),
        "uncaptioned slots use the file itself"
    );
    // Captioned or not, the source files stay as they were.
    assert!(ctx.figures["fig2"].path.exists());
    assert!(dir.path().join("profile_2.png").exists());
}

#[test]
fn annex_uses_its_own_prefix() {
    let dir = seeded_dir();
    let mut ctx = RenderContext::default();
    stage_figures(&mut ctx, dir.path(), ReportKind::Annex, &FigureLayout::default()).unwrap();
    assert!(ctx.figures.contains_key("annex_fig7"));
    assert!(!ctx.figures.contains_key("fig7"));
}

#[test]
fn captions_cover_slots_two_to_six() {
    assert_eq!(caption_for(2).map(|c| c.text), Some("IHR PROTEOMPROFIL".to_string()));
    let c = caption_for(5).unwrap();
    assert_eq!((c.x, c.y, c.size_px), (50, 18, 20));
    assert!(caption_for(1).is_none());
    assert!(caption_for(7).is_none());
}

#[test]
fn layout_rules_override_and_default() {
    let mut layout = FigureLayout::default();
    assert_eq!(layout.width_for(4), 90.0);
    assert_eq!(layout.width_for(12), 80.0);
    layout.widths_mm.insert(4, 60.0);
    assert_eq!(layout.width_for(4), 60.0);
}
