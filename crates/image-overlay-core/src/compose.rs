//! Validate-then-paste compositing.

use log::trace;
use thiserror::Error;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::raster::{RasterMut, RasterView};

/// Errors raised before any pixel of the background changes.
#[derive(Debug, Error)]
pub enum ComposeError {
    /// The overlay must be strictly smaller than the background in both
    /// dimensions.
    #[error(
        "{overlay_width}x{overlay_height} overlay does not fit strictly inside a {width}x{height} background"
    )]
    OverlayTooLarge {
        overlay_width: u32,
        overlay_height: u32,
        width: u32,
        height: u32,
    },
    /// The paste origin lies outside the background.
    #[error("paste origin ({x}, {y}) is outside the {width}x{height} background")]
    OutOfBounds { x: i64, y: i64, width: u32, height: u32 },
}

/// Paste `layer` onto `bg` with its top-left corner at `at`.
///
/// Validation runs first and leaves the background untouched on failure:
/// the layer must be strictly smaller than the background in both
/// dimensions, and `at` must lie inside `[0, width] x [0, height]`. Content
/// overhanging the right or bottom edge is clipped.
///
/// With `alpha` set, an RGBA layer is blended per pixel by its alpha
/// channel (a layer without alpha pastes opaquely). Without it, channels
/// are copied, the layer's alpha band included; a layer without one writes
/// opaque alpha into an RGBA background.
#[cfg_attr(
    feature = "tracing",
    instrument(
        level = "debug",
        skip(bg, layer),
        fields(layer_width = layer.width, layer_height = layer.height)
    )
)]
pub fn composite(
    bg: RasterMut<'_>,
    layer: &RasterView<'_>,
    at: (i64, i64),
    alpha: bool,
) -> Result<(), ComposeError> {
    if layer.width >= bg.width || layer.height >= bg.height {
        return Err(ComposeError::OverlayTooLarge {
            overlay_width: layer.width,
            overlay_height: layer.height,
            width: bg.width,
            height: bg.height,
        });
    }
    let (x, y) = at;
    if x < 0 || y < 0 || x > i64::from(bg.width) || y > i64::from(bg.height) {
        return Err(ComposeError::OutOfBounds {
            x,
            y,
            width: bg.width,
            height: bg.height,
        });
    }

    // clip the paste rectangle to the canvas
    let copy_w = i64::from(layer.width).min(i64::from(bg.width) - x) as usize;
    let copy_h = i64::from(layer.height).min(i64::from(bg.height) - y) as usize;
    if copy_w == 0 || copy_h == 0 {
        return Ok(());
    }
    trace!(
        "pasting {copy_w}x{copy_h} of a {}x{} layer at ({x}, {y}), alpha={alpha}",
        layer.width,
        layer.height
    );

    let bc = bg.format.channels();
    let lc = layer.format.channels();
    let layer_has_alpha = layer.format.has_alpha();
    let (x, y) = (x as usize, y as usize);

    for row in 0..copy_h {
        let l_row = row * layer.width as usize * lc;
        let b_row = ((y + row) * bg.width as usize + x) * bc;
        for col in 0..copy_w {
            let li = l_row + col * lc;
            let bi = b_row + col * bc;

            let fg_a = if layer_has_alpha { layer.data[li + 3] } else { 255 };
            let mask = if alpha { fg_a } else { 255 };
            if mask == 0 {
                continue;
            }
            for ch in 0..3 {
                bg.data[bi + ch] = lerp(bg.data[bi + ch], layer.data[li + ch], mask);
            }
            if bc == 4 {
                bg.data[bi + 3] = lerp(bg.data[bi + 3], fg_a, mask);
            }
        }
    }
    Ok(())
}

/// Blend `fg` over `bg` by `mask`, rounding to nearest.
#[inline]
fn lerp(bg: u8, fg: u8, mask: u8) -> u8 {
    let m = u32::from(mask);
    let mixed = u32::from(bg) * (255 - m) + u32::from(fg) * m;
    ((mixed + 128) / 255) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::{Layer, PixelFormat};

    fn rgb_canvas(width: u32, height: u32, fill: u8) -> Vec<u8> {
        vec![fill; (width * height * 3) as usize]
    }

    fn rgba_canvas(width: u32, height: u32, px: [u8; 4]) -> Vec<u8> {
        px.repeat((width * height) as usize)
    }

    #[test]
    fn opaque_paste_copies_channels_in_place() {
        let mut buf = rgb_canvas(4, 4, 10);
        let layer = Layer::solid(2, 1, [200, 201, 202]);
        let bg = RasterMut::from_slice(4, 4, PixelFormat::Rgb, &mut buf).unwrap();
        composite(bg, &layer.as_view(), (1, 2), false).unwrap();

        let pasted = (2 * 4 + 1) * 3;
        let mut expected = rgb_canvas(4, 4, 10);
        expected[pasted..pasted + 6].copy_from_slice(&[200, 201, 202, 200, 201, 202]);
        assert_eq!(buf, expected);
    }

    #[test]
    fn oversized_layer_is_rejected_before_any_write() {
        let mut buf = rgb_canvas(4, 4, 10);
        let layer = Layer::solid(4, 1, [1, 2, 3]);
        let bg = RasterMut::from_slice(4, 4, PixelFormat::Rgb, &mut buf).unwrap();
        let err = composite(bg, &layer.as_view(), (0, 0), false).unwrap_err();
        assert!(matches!(err, ComposeError::OverlayTooLarge { .. }));
        assert_eq!(buf, rgb_canvas(4, 4, 10));
    }

    #[test]
    fn size_check_wins_over_the_bounds_check() {
        let mut buf = rgb_canvas(4, 4, 10);
        let layer = Layer::solid(4, 4, [1, 2, 3]);
        let bg = RasterMut::from_slice(4, 4, PixelFormat::Rgb, &mut buf).unwrap();
        let err = composite(bg, &layer.as_view(), (9, 9), false).unwrap_err();
        assert!(matches!(err, ComposeError::OverlayTooLarge { .. }));
    }

    #[test]
    fn origin_outside_the_background_is_rejected() {
        let mut buf = rgb_canvas(4, 4, 10);
        let layer = Layer::solid(1, 1, [1, 2, 3]);
        for at in [(5, 0), (0, 5), (-1, 0), (0, -1)] {
            let bg = RasterMut::from_slice(4, 4, PixelFormat::Rgb, &mut buf).unwrap();
            let err = composite(bg, &layer.as_view(), at, false).unwrap_err();
            assert!(matches!(err, ComposeError::OutOfBounds { .. }), "at {at:?}");
        }
        assert_eq!(buf, rgb_canvas(4, 4, 10));
    }

    #[test]
    fn origin_on_the_far_edge_pastes_nothing() {
        let mut buf = rgb_canvas(4, 4, 10);
        let layer = Layer::solid(2, 2, [1, 2, 3]);
        let bg = RasterMut::from_slice(4, 4, PixelFormat::Rgb, &mut buf).unwrap();
        composite(bg, &layer.as_view(), (4, 4), false).unwrap();
        assert_eq!(buf, rgb_canvas(4, 4, 10));
    }

    #[test]
    fn overhang_clips_at_the_edges() {
        let mut buf = rgb_canvas(4, 4, 0);
        let layer = Layer::solid(3, 3, [255, 255, 255]);
        let bg = RasterMut::from_slice(4, 4, PixelFormat::Rgb, &mut buf).unwrap();
        composite(bg, &layer.as_view(), (2, 2), false).unwrap();

        // only the 2x2 in-bounds corner changed
        for y in 0..4usize {
            for x in 0..4usize {
                let i = (y * 4 + x) * 3;
                let expected = if x >= 2 && y >= 2 { 255 } else { 0 };
                assert_eq!(buf[i], expected, "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn alpha_blend_lerps_toward_the_ink() {
        let mut buf = rgba_canvas(3, 3, [100, 100, 100, 50]);
        let mut layer = Layer::transparent(1, 1);
        layer.put_ink(0, 0, [255, 255, 255], 128);

        let bg = RasterMut::from_slice(3, 3, PixelFormat::Rgba, &mut buf).unwrap();
        composite(bg, &layer.as_view(), (1, 1), true).unwrap();

        let i = (3 + 1) * 4;
        assert_eq!(&buf[i..i + 4], &[178, 178, 178, 89]);
        assert_eq!(&buf[..4], &[100, 100, 100, 50]);
    }

    #[test]
    fn transparent_layer_pixels_leave_the_background_alone() {
        let mut buf = rgba_canvas(3, 3, [7, 8, 9, 200]);
        let layer = Layer::transparent(2, 2);
        let bg = RasterMut::from_slice(3, 3, PixelFormat::Rgba, &mut buf).unwrap();
        composite(bg, &layer.as_view(), (0, 0), true).unwrap();
        assert_eq!(buf, rgba_canvas(3, 3, [7, 8, 9, 200]));
    }

    #[test]
    fn opaque_paste_onto_rgba_sets_full_alpha() {
        let mut buf = rgba_canvas(3, 3, [5, 5, 5, 7]);
        let layer = Layer::solid(1, 1, [1, 2, 3]);
        let bg = RasterMut::from_slice(3, 3, PixelFormat::Rgba, &mut buf).unwrap();
        composite(bg, &layer.as_view(), (0, 0), false).unwrap();
        assert_eq!(&buf[..4], &[1, 2, 3, 255]);
    }

    #[test]
    fn opaque_paste_copies_the_layer_alpha_band() {
        let mut buf = rgba_canvas(3, 3, [5, 5, 5, 200]);
        let mut layer = Layer::transparent(1, 1);
        layer.put_ink(0, 0, [9, 9, 9], 37);
        let bg = RasterMut::from_slice(3, 3, PixelFormat::Rgba, &mut buf).unwrap();
        composite(bg, &layer.as_view(), (0, 0), false).unwrap();
        assert_eq!(&buf[..4], &[9, 9, 9, 37]);
    }

    #[test]
    fn alpha_flag_with_an_rgb_layer_pastes_opaquely() {
        let mut buf = rgba_canvas(3, 3, [5, 5, 5, 7]);
        let layer = Layer::solid(1, 1, [1, 2, 3]);
        let bg = RasterMut::from_slice(3, 3, PixelFormat::Rgba, &mut buf).unwrap();
        composite(bg, &layer.as_view(), (0, 0), true).unwrap();
        assert_eq!(&buf[..4], &[1, 2, 3, 255]);
    }
}
