//! Text layer assembly.

use image_overlay_core::{Layer, Shade};
use log::debug;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::font::TextRasterizer;
use crate::wrap::layout_text;

/// Rasterize `text` onto a fresh transparent layer `width` pixels wide.
///
/// [`layout_text`] fixes the glyph size and line breaks; each line is
/// drawn left-aligned with its top at `line_index * font_px`.
#[cfg_attr(feature = "tracing", instrument(level = "debug", skip(font)))]
pub fn render_text(text: &str, width: u32, shade: Shade, font: &dyn TextRasterizer) -> Layer {
    let layout = layout_text(text, width);
    debug!(
        "text layer {}x{}: {} line(s) at {} px",
        layout.width,
        layout.height,
        layout.lines.len(),
        layout.font_px
    );

    let mut layer = Layer::transparent(layout.width, layout.height);
    for (i, line) in layout.lines.iter().enumerate() {
        font.draw_line(&mut layer, line, i as u32 * layout.font_px, layout.font_px, shade);
    }
    layer
}
