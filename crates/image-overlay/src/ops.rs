//! Ready-made overlay operations on `image`-crate buffers.

use image_overlay_core::{composite, sample_shade, Anchor, Layer, OverlayConfig};
use image_overlay_text::{render_text, TextRasterizer};
use log::info;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::canvas::Canvas;
use crate::error::OverlayError;

/// Fraction of the background width covered by the scalebar rectangle.
const SCALEBAR_WIDTH_FRAC: f64 = 0.3;
/// Fraction of the background height covered by the scalebar rectangle.
const SCALEBAR_HEIGHT_FRAC: f64 = 0.05;
/// Half-glyph estimate used to center the scalebar label, in pixels.
const SCALEBAR_LABEL_HALF_GLYPH: i64 = 25;
// TODO: derive the label from a measured pixel scale once the rover
// pipeline reports one; the bar claims 100 cm regardless of range.
const SCALEBAR_LABEL: &str = "100 cm";

/// Draw `text` over `image` at `anchor`, black or white by local contrast.
///
/// The text canvas spans `relative_text_size` of the image width and
/// wraps by the fixed heuristic in [`image_overlay_text::layout_text`].
/// Glyphs blend by coverage; everything else keeps the background pixel.
pub fn overlay_text<C: Canvas>(
    image: &mut C,
    text: &str,
    anchor: Anchor,
    font: &dyn TextRasterizer,
) -> Result<(), OverlayError> {
    overlay_text_with(image, text, anchor, font, &OverlayConfig::default())
}

/// [`overlay_text`] with explicit tuning.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(image, anchor, font, cfg), fields(anchor = %anchor))
)]
pub fn overlay_text_with<C: Canvas>(
    image: &mut C,
    text: &str,
    anchor: Anchor,
    font: &dyn TextRasterizer,
    cfg: &OverlayConfig,
) -> Result<(), OverlayError> {
    let view = image.raster();
    let (bg_w, bg_h) = (view.width, view.height);
    let origin = anchor.resolve(bg_w, bg_h, cfg.margin);
    let shade = sample_shade(&view, origin, cfg);

    let canvas_width = (cfg.relative_text_size * f64::from(bg_w)) as u32;
    let layer = render_text(text, canvas_width, shade, font);

    info!(
        "text overlay at ({}, {}): {shade:?} ink on {bg_w}x{bg_h}",
        origin.0, origin.1
    );
    composite(image.raster_mut(), &layer.as_view(), origin, true)?;
    Ok(())
}

/// Fill an opaque `dims = [width, height]` rectangle over `image` at
/// `anchor`, black or white by local contrast.
pub fn overlay_rectangle<C: Canvas>(
    image: &mut C,
    dims: [u32; 2],
    anchor: Anchor,
) -> Result<(), OverlayError> {
    overlay_rectangle_with(image, dims, anchor, &OverlayConfig::default())
}

/// [`overlay_rectangle`] with explicit tuning.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(image, anchor, cfg), fields(anchor = %anchor))
)]
pub fn overlay_rectangle_with<C: Canvas>(
    image: &mut C,
    dims: [u32; 2],
    anchor: Anchor,
    cfg: &OverlayConfig,
) -> Result<(), OverlayError> {
    let view = image.raster();
    let origin = anchor.resolve(view.width, view.height, cfg.margin);
    let shade = sample_shade(&view, origin, cfg);

    let layer = Layer::solid(dims[0], dims[1], shade.rgb());
    info!(
        "rectangle {}x{} at ({}, {}): {shade:?}",
        dims[0], dims[1], origin.0, origin.1
    );
    composite(image.raster_mut(), &layer.as_view(), origin, false)?;
    Ok(())
}

/// Draw a scalebar at `anchor`: a solid bar 30% x 5% of the image with a
/// centered label underneath.
///
/// The bar and the label sample their shades independently at their own
/// origins, the label against the already-composited bar.
pub fn overlay_scalebar<C: Canvas>(
    image: &mut C,
    anchor: Anchor,
    font: &dyn TextRasterizer,
) -> Result<(), OverlayError> {
    overlay_scalebar_with(image, anchor, font, &OverlayConfig::default())
}

/// [`overlay_scalebar`] with explicit tuning.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(image, anchor, font, cfg), fields(anchor = %anchor))
)]
pub fn overlay_scalebar_with<C: Canvas>(
    image: &mut C,
    anchor: Anchor,
    font: &dyn TextRasterizer,
    cfg: &OverlayConfig,
) -> Result<(), OverlayError> {
    let view = image.raster();
    let (bg_w, bg_h) = (view.width, view.height);
    let origin = anchor.resolve(bg_w, bg_h, cfg.margin);

    let bar_w = (SCALEBAR_WIDTH_FRAC * f64::from(bg_w)) as u32;
    let bar_h = (SCALEBAR_HEIGHT_FRAC * f64::from(bg_h)) as u32;
    overlay_rectangle_with(image, [bar_w, bar_h], Anchor::At(origin.0, origin.1), cfg)?;

    let label_chars = SCALEBAR_LABEL.chars().count() as i64;
    let label_x =
        origin.0 + (0.5 * f64::from(bar_w)) as i64 - label_chars * SCALEBAR_LABEL_HALF_GLYPH;
    let label_y = origin.1 + (1.25 * f64::from(bar_h)) as i64;
    overlay_text_with(image, SCALEBAR_LABEL, Anchor::At(label_x, label_y), font, cfg)
}
