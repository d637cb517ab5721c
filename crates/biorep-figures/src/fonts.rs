//! Font registration for figure text.
//!
//! Text is rasterised from a TrueType file registered once per process under
//! the [`FONT`] family name.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use plotters::style::{FontStyle, register_font};

/// Family name every figure uses for text.
pub const FONT: &str = "sans-serif";

const SYSTEM_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

static REGISTERED: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Register the figure font, trying `preferred` before common system fonts.
///
/// Only the first call has an effect. Returns the registered file, or `None`
/// when no candidate could be loaded; text drawing then fails and callers
/// fall back to text-free output.
pub fn ensure_font(preferred: Option<&Path>) -> Option<&'static Path> {
    REGISTERED
        .get_or_init(|| {
            let candidates = preferred
                .map(Path::to_path_buf)
                .into_iter()
                .chain(SYSTEM_CANDIDATES.iter().map(PathBuf::from));

            for path in candidates {
                let Ok(bytes) = std::fs::read(&path) else {
                    continue;
                };
                // The font registry keeps a 'static reference for the process lifetime.
                let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
                match register_font(FONT, FontStyle::Normal, bytes) {
                    Ok(()) => {
                        tracing::debug!(path = %path.display(), "figure font registered");
                        return Some(path);
                    }
                    Err(_) => {
                        tracing::warn!(path = %path.display(), "not a usable TrueType font");
                    }
                }
            }

            tracing::warn!("no figure font found; figures will be drawn without text");
            None
        })
        .as_deref()
}
