//! Outline font rasterization via `ab_glyph`.

use std::path::Path;

use ab_glyph::{point, Font, FontArc, GlyphId, PxScale, ScaleFont};
use image_overlay_core::{Layer, Shade};

use crate::font::{FontError, TextRasterizer};

/// A TrueType/OpenType face loaded into memory.
///
/// Cloning is cheap; the face data is reference-counted.
#[derive(Clone, Debug)]
pub struct TtfFont {
    font: FontArc,
}

impl TtfFont {
    /// Load a face from a font file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FontError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| FontError::Unavailable {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(bytes)
    }

    /// Parse a face from raw font bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, FontError> {
        Ok(Self {
            font: FontArc::try_from_vec(bytes)?,
        })
    }
}

impl TextRasterizer for TtfFont {
    fn draw_line(&self, layer: &mut Layer, line: &str, top: u32, font_px: u32, shade: Shade) {
        let scale = PxScale::from(font_px as f32);
        let scaled = self.font.as_scaled(scale);
        let rgb = shade.rgb();
        let baseline = top as f32 + scaled.ascent();

        let mut caret = 0.0f32;
        let mut last: Option<GlyphId> = None;
        for ch in line.chars() {
            let id = scaled.glyph_id(ch);
            if let Some(prev) = last {
                caret += scaled.kern(prev, id);
            }
            let glyph = id.with_scale_and_position(scale, point(caret, baseline));
            caret += scaled.h_advance(id);
            last = Some(id);

            // whitespace and empty glyphs have no outline
            let Some(outline) = self.font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outline.px_bounds();
            outline.draw(|dx, dy, coverage| {
                let px = bounds.min.x + dx as f32;
                let py = bounds.min.y + dy as f32;
                if px < 0.0 || py < 0.0 {
                    return;
                }
                let ink = (coverage.clamp(0.0, 1.0) * 255.0).round() as u8;
                layer.put_ink(px as u32, py as u32, rgb, ink);
            });
        }
    }
}
