//! Raster buffer views and owned overlay layers.
//!
//! Everything here works on interleaved 8-bit buffers so callers can bring
//! any pixel container. The `image-overlay` facade adapts `image`-crate
//! buffers onto these types.

use thiserror::Error;

/// Interleaved 8-bit pixel layouts the compositor understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelFormat {
    Rgb,
    Rgba,
}

impl PixelFormat {
    /// Channels per pixel.
    #[inline]
    pub const fn channels(self) -> usize {
        match self {
            PixelFormat::Rgb => 3,
            PixelFormat::Rgba => 4,
        }
    }

    /// Whether the layout carries an alpha channel.
    #[inline]
    pub const fn has_alpha(self) -> bool {
        matches!(self, PixelFormat::Rgba)
    }
}

/// Buffer/geometry mismatch when wrapping a raw pixel buffer.
#[derive(Debug, Error)]
pub enum RasterError {
    #[error(
        "buffer of {got} bytes does not hold a {width}x{height} {format:?} image (expected {expected})"
    )]
    BufferMismatch {
        width: u32,
        height: u32,
        format: PixelFormat,
        expected: usize,
        got: usize,
    },
}

/// Immutable view over an interleaved pixel buffer.
#[derive(Clone, Copy, Debug)]
pub struct RasterView<'a> {
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    pub data: &'a [u8], // row-major, len = w*h*channels
}

impl<'a> RasterView<'a> {
    /// Wrap a raw buffer, validating its length against the geometry.
    pub fn from_slice(
        width: u32,
        height: u32,
        format: PixelFormat,
        data: &'a [u8],
    ) -> Result<Self, RasterError> {
        let expected = expected_len(width, height, format);
        if data.len() != expected {
            return Err(RasterError::BufferMismatch {
                width,
                height,
                format,
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            format,
            data,
        })
    }

    /// Luminance of the pixel at `(x, y)`, 16-bit fixed-point ITU-R 601
    /// weights. Coordinates must be in bounds.
    #[inline]
    pub fn luma(&self, x: u32, y: u32) -> u8 {
        let i = (y as usize * self.width as usize + x as usize) * self.format.channels();
        let r = self.data[i] as u32;
        let g = self.data[i + 1] as u32;
        let b = self.data[i + 2] as u32;
        ((r * 19595 + g * 38470 + b * 7471) >> 16) as u8
    }
}

/// Mutable view over an interleaved pixel buffer.
#[derive(Debug)]
pub struct RasterMut<'a> {
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    pub data: &'a mut [u8], // row-major, len = w*h*channels
}

impl<'a> RasterMut<'a> {
    /// Wrap a raw mutable buffer, validating its length against the geometry.
    pub fn from_slice(
        width: u32,
        height: u32,
        format: PixelFormat,
        data: &'a mut [u8],
    ) -> Result<Self, RasterError> {
        let expected = expected_len(width, height, format);
        if data.len() != expected {
            return Err(RasterError::BufferMismatch {
                width,
                height,
                format,
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            format,
            data,
        })
    }

    /// Reborrow as an immutable view.
    #[inline]
    pub fn as_view(&self) -> RasterView<'_> {
        RasterView {
            width: self.width,
            height: self.height,
            format: self.format,
            data: self.data,
        }
    }
}

#[inline]
fn expected_len(width: u32, height: u32, format: PixelFormat) -> usize {
    width as usize * height as usize * format.channels()
}

/// Owned raster produced by the text and shape renderers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layer {
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    pub data: Vec<u8>, // row-major, len = w*h*channels
}

impl Layer {
    /// Fully transparent RGBA canvas. Text rasterizers put glyph ink on
    /// this; untouched pixels stay invisible after an alpha paste.
    pub fn transparent(width: u32, height: u32) -> Self {
        let data = vec![0u8; expected_len(width, height, PixelFormat::Rgba)];
        Self {
            width,
            height,
            format: PixelFormat::Rgba,
            data,
        }
    }

    /// Uniform opaque RGB fill.
    pub fn solid(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        let data = rgb.repeat(width as usize * height as usize);
        Self {
            width,
            height,
            format: PixelFormat::Rgb,
            data,
        }
    }

    /// Borrow as an immutable view.
    #[inline]
    pub fn as_view(&self) -> RasterView<'_> {
        RasterView {
            width: self.width,
            height: self.height,
            format: self.format,
            data: &self.data,
        }
    }

    /// Write ink at `(x, y)`: the color channels are set and alpha (when
    /// the layer has it) keeps the larger of the existing and new coverage.
    /// Out-of-canvas writes and zero coverage are dropped.
    #[inline]
    pub fn put_ink(&mut self, x: u32, y: u32, rgb: [u8; 3], coverage: u8) {
        if coverage == 0 || x >= self.width || y >= self.height {
            return;
        }
        let c = self.format.channels();
        let i = (y as usize * self.width as usize + x as usize) * c;
        self.data[i] = rgb[0];
        self.data[i + 1] = rgb[1];
        self.data[i + 2] = rgb[2];
        if self.format.has_alpha() {
            self.data[i + 3] = self.data[i + 3].max(coverage);
        }
    }
}
