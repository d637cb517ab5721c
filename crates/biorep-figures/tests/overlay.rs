use biorep_figures::error::FigureError;
use biorep_figures::overlay::{Caption, overlay_caption};
use image::{GenericImageView, Rgb, RgbImage, Rgba, RgbaImage};

#[test]
fn overlay_never_touches_the_source() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("profile_2.png");
    RgbImage::from_pixel(320, 120, Rgb([20, 40, 90])).save(&source).unwrap();
    let before = std::fs::read(&source).unwrap();

    let caption = Caption {
        text: "IHR PROTEOMPROFIL".to_string(),
        x: 100,
        y: 20,
        size_px: 18,
    };

    match overlay_caption(&source, &caption) {
        Ok(copy) => {
            assert_ne!(copy, source);
            assert!(copy.exists());
            let (w, h) = image::image_dimensions(&copy).unwrap();
            assert_eq!((w, h), (320, 120));
        }
        // Hosts without any usable font cannot draw the caption.
        Err(FigureError::Render(_)) => {}
        Err(other) => panic!("unexpected overlay error: {other}"),
    }

    assert_eq!(std::fs::read(&source).unwrap(), before);
}

#[test]
fn transparent_background_survives_the_caption() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("timeline_4.png");
    RgbaImage::from_pixel(200, 80, Rgba([255, 255, 255, 0]))
        .save(&source)
        .unwrap();

    let caption = Caption {
        text: "ZEITVERLAUF".to_string(),
        x: 60,
        y: 30,
        size_px: 16,
    };

    match overlay_caption(&source, &caption) {
        Ok(copy) => {
            let out = image::open(&copy).unwrap();
            assert!(out.color().has_alpha());
            assert_eq!(out.get_pixel(0, 0), Rgba([255, 255, 255, 0]));
            assert_eq!(out.get_pixel(199, 79)[3], 0);
        }
        Err(FigureError::Render(_)) => {}
        Err(other) => panic!("unexpected overlay error: {other}"),
    }
}

#[test]
fn unreadable_source_is_an_image_error() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("missing_3.png");
    let caption = Caption {
        text: "x".to_string(),
        x: 0,
        y: 0,
        size_px: 10,
    };
    assert!(matches!(
        overlay_caption(&source, &caption),
        Err(FigureError::Image(_))
    ));
}
