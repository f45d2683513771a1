//! Contrast sampling: pick black or white ink from local luminance.

use log::debug;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::config::OverlayConfig;
use crate::raster::RasterView;

/// Ink color chosen to stand out against the sampled background.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shade {
    Black,
    White,
}

impl Shade {
    /// Solid fill color.
    #[inline]
    pub const fn rgb(self) -> [u8; 3] {
        match self {
            Shade::Black => [0, 0, 0],
            Shade::White => [255, 255, 255],
        }
    }

    /// Fill color with opaque alpha.
    #[inline]
    pub const fn rgba(self) -> [u8; 4] {
        let [r, g, b] = self.rgb();
        [r, g, b, 255]
    }
}

/// Decide the overlay shade for an element whose top-left corner lands at
/// `origin`.
///
/// Mean luminance is taken over the window extending `cfg.sample_extent`
/// pixels right and down from `origin`, clipped per axis to the image.
/// Bright windows (mean at or above `cfg.shade_threshold`) get
/// [`Shade::Black`], dark windows [`Shade::White`]. An empty window counts
/// as dark, so an element pushed fully past the edge comes out white.
#[cfg_attr(
    feature = "tracing",
    instrument(
        level = "debug",
        skip(view, cfg),
        fields(width = view.width, height = view.height)
    )
)]
pub fn sample_shade(view: &RasterView<'_>, origin: (i64, i64), cfg: &OverlayConfig) -> Shade {
    let w = i64::from(view.width);
    let h = i64::from(view.height);
    let extent = i64::from(cfg.sample_extent);

    let x0 = origin.0.clamp(0, w);
    let y0 = origin.1.clamp(0, h);
    let x1 = origin.0.saturating_add(extent).clamp(0, w);
    let y1 = origin.1.saturating_add(extent).clamp(0, h);

    let mut sum: u64 = 0;
    for y in y0..y1 {
        for x in x0..x1 {
            sum += u64::from(view.luma(x as u32, y as u32));
        }
    }

    let count = ((x1 - x0) * (y1 - y0)) as u64;
    let mean = if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    };
    let shade = if mean >= cfg.shade_threshold {
        Shade::Black
    } else {
        Shade::White
    };
    debug!(
        "sampled {count} px from ({}, {}): mean luminance {mean:.1}, {shade:?} ink",
        origin.0, origin.1
    );
    shade
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::PixelFormat;

    fn uniform(width: u32, height: u32, value: u8) -> Vec<u8> {
        vec![value; (width * height * 3) as usize]
    }

    #[test]
    fn bright_region_gets_black_ink() {
        let data = uniform(10, 10, 200);
        let view = RasterView::from_slice(10, 10, PixelFormat::Rgb, &data).unwrap();
        assert_eq!(sample_shade(&view, (0, 0), &OverlayConfig::default()), Shade::Black);
    }

    #[test]
    fn dark_region_gets_white_ink() {
        let data = uniform(10, 10, 40);
        let view = RasterView::from_slice(10, 10, PixelFormat::Rgb, &data).unwrap();
        assert_eq!(sample_shade(&view, (0, 0), &OverlayConfig::default()), Shade::White);
    }

    #[test]
    fn threshold_is_inclusive_on_the_bright_side() {
        let at = uniform(4, 4, 150);
        let view = RasterView::from_slice(4, 4, PixelFormat::Rgb, &at).unwrap();
        assert_eq!(sample_shade(&view, (0, 0), &OverlayConfig::default()), Shade::Black);

        let below = uniform(4, 4, 149);
        let view = RasterView::from_slice(4, 4, PixelFormat::Rgb, &below).unwrap();
        assert_eq!(sample_shade(&view, (0, 0), &OverlayConfig::default()), Shade::White);
    }

    #[test]
    fn window_is_local_to_the_origin() {
        // dark left half, bright right half
        let mut data = uniform(4, 1, 10);
        data[6..].fill(240);
        let view = RasterView::from_slice(4, 1, PixelFormat::Rgb, &data).unwrap();
        let cfg = OverlayConfig {
            sample_extent: 2,
            ..OverlayConfig::default()
        };
        assert_eq!(sample_shade(&view, (0, 0), &cfg), Shade::White);
        assert_eq!(sample_shade(&view, (2, 0), &cfg), Shade::Black);
    }

    #[test]
    fn empty_window_counts_as_dark() {
        let data = uniform(10, 10, 255);
        let view = RasterView::from_slice(10, 10, PixelFormat::Rgb, &data).unwrap();
        let cfg = OverlayConfig::default();
        // origin on the far edge or beyond it samples nothing
        assert_eq!(sample_shade(&view, (10, 0), &cfg), Shade::White);
        assert_eq!(sample_shade(&view, (0, 10), &cfg), Shade::White);
        assert_eq!(sample_shade(&view, (50, 50), &cfg), Shade::White);
    }

    #[test]
    fn negative_origin_clips_to_the_top_left() {
        let data = uniform(10, 10, 255);
        let view = RasterView::from_slice(10, 10, PixelFormat::Rgb, &data).unwrap();
        let cfg = OverlayConfig::default();
        // window still reaches the image
        assert_eq!(sample_shade(&view, (-2, -2), &cfg), Shade::Black);
        // window ends before the image starts
        let cfg = OverlayConfig {
            sample_extent: 5,
            ..cfg
        };
        assert_eq!(sample_shade(&view, (-100, 0), &cfg), Shade::White);
    }
}
