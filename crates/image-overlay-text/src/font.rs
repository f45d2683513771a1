//! The rasterizer seam between layout and fonts.

use std::path::PathBuf;

use image_overlay_core::{Layer, Shade};
use thiserror::Error;

/// Errors raised while loading a font resource.
#[derive(Debug, Error)]
pub enum FontError {
    /// The font file could not be read.
    #[error("font file {path:?} is unavailable")]
    Unavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The bytes do not parse as a font face.
    #[error("font data is not a parseable font face")]
    Invalid(#[from] ab_glyph::InvalidFont),
}

/// Draws single lines of text onto transparent layers.
///
/// The layout engine owns line breaking and vertical placement;
/// implementations only rasterize one line at a time. `Send + Sync` keeps
/// rasterizers shareable across threads.
pub trait TextRasterizer: Send + Sync {
    /// Draw `line` starting at the layer's left edge with its top at
    /// `top`, glyphs nominally `font_px` tall, filled with `shade`.
    fn draw_line(&self, layer: &mut Layer, line: &str, top: u32, font_px: u32, shade: Shade);
}
