//! Caption overlays drawn onto copies of existing figures.

use std::path::{Path, PathBuf};

use image::{ImageFormat, Rgba};
use plotters::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::FigureError;
use crate::fonts::{self, FONT};

/// White caption text at a pixel position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Caption {
    pub text: String,
    pub x: i32,
    pub y: i32,
    pub size_px: u32,
}

/// Draw `caption` onto a copy of `source` and return the copy's path.
///
/// The copy is a kept temporary file; `source` is never modified. The
/// source's alpha channel survives: the caption is composited over it and
/// untouched pixels keep their original RGBA value.
pub fn overlay_caption(source: &Path, caption: &Caption) -> Result<PathBuf, FigureError> {
    fonts::ensure_font(None);
    let mut img = image::open(source)
        .map_err(|e| FigureError::Image(format!("{}: {e}", source.display())))?
        .to_rgba8();
    let (width, height) = img.dimensions();

    // Text is drawn white on black, so each scratch pixel's brightness is the
    // glyph coverage at that point.
    let mut coverage = vec![0u8; width as usize * height as usize * 3];
    {
        let root =
            BitMapBackend::with_buffer(&mut coverage, (width, height)).into_drawing_area();
        let style = (FONT, caption.size_px).into_font().color(&WHITE);
        root.draw_text(&caption.text, &style, (caption.x, caption.y))
            .map_err(|e| FigureError::Render(e.to_string()))?;
        root.present()
            .map_err(|e| FigureError::Render(e.to_string()))?;
    }

    for (pixel, covered) in img.pixels_mut().zip(coverage.chunks_exact(3)) {
        let cov = covered.iter().copied().max().unwrap_or(0);
        if cov > 0 {
            *pixel = composite_white(*pixel, cov);
        }
    }

    let tmp = tempfile::Builder::new()
        .prefix("biorep-overlay-")
        .suffix(".png")
        .tempfile()?;
    let (_, path) = tmp.keep().map_err(|e| FigureError::Io(e.error))?;

    img.save_with_format(&path, ImageFormat::Png)
        .map_err(|e| FigureError::Image(format!("{}: {e}", path.display())))?;

    tracing::debug!(source = %source.display(), overlay = %path.display(), "caption overlaid");
    Ok(path)
}

/// White at `coverage` opacity over `under` (source-over).
fn composite_white(under: Rgba<u8>, coverage: u8) -> Rgba<u8> {
    let cov = f32::from(coverage) / 255.0;
    let under_a = f32::from(under[3]) / 255.0;
    let out_a = cov + under_a * (1.0 - cov);
    let channel = |c: u8| {
        let v = (cov + f32::from(c) / 255.0 * under_a * (1.0 - cov)) / out_a;
        (v * 255.0).round().clamp(0.0, 255.0) as u8
    };
    Rgba([
        channel(under[0]),
        channel(under[1]),
        channel(under[2]),
        (out_a * 255.0).round() as u8,
    ])
}
