//! Adapters between `image`-crate buffers and the core raster views.

use image::{RgbImage, RgbaImage};
use image_overlay_core::{PixelFormat, RasterMut, RasterView};

/// Pixel containers the overlay operations can draw on.
///
/// Implementations hand out raster views over their interleaved buffer;
/// geometry travels with the view, so there is nothing else to implement.
pub trait Canvas {
    /// Borrow the pixels for reading.
    fn raster(&self) -> RasterView<'_>;
    /// Borrow the pixels for writing.
    fn raster_mut(&mut self) -> RasterMut<'_>;
}

impl Canvas for RgbImage {
    fn raster(&self) -> RasterView<'_> {
        RasterView {
            width: self.width(),
            height: self.height(),
            format: PixelFormat::Rgb,
            data: self.as_raw(),
        }
    }

    fn raster_mut(&mut self) -> RasterMut<'_> {
        let (width, height) = self.dimensions();
        RasterMut {
            width,
            height,
            format: PixelFormat::Rgb,
            data: &mut **self,
        }
    }
}

impl Canvas for RgbaImage {
    fn raster(&self) -> RasterView<'_> {
        RasterView {
            width: self.width(),
            height: self.height(),
            format: PixelFormat::Rgba,
            data: self.as_raw(),
        }
    }

    fn raster_mut(&mut self) -> RasterMut<'_> {
        let (width, height) = self.dimensions();
        RasterMut {
            width,
            height,
            format: PixelFormat::Rgba,
            data: &mut **self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgba_views_report_geometry_and_format() {
        let img = RgbaImage::new(3, 2);
        let view = img.raster();
        assert_eq!((view.width, view.height), (3, 2));
        assert_eq!(view.format, PixelFormat::Rgba);
        assert_eq!(view.data.len(), 24);
    }

    #[test]
    fn rgb_views_report_geometry_and_format() {
        let img = RgbImage::new(3, 2);
        let view = img.raster();
        assert_eq!(view.format, PixelFormat::Rgb);
        assert_eq!(view.data.len(), 18);
    }

    #[test]
    fn mutations_through_the_view_reach_the_buffer() {
        let mut img = RgbImage::new(2, 2);
        let raster = img.raster_mut();
        raster.data[0] = 77;
        assert_eq!(img.get_pixel(0, 0).0, [77, 0, 0]);
    }
}
