//! Contrast-aware text, rectangle, and scalebar overlays for images.
//!
//! Given a background photo, every operation resolves a corner anchor,
//! samples the local luminance to pick black or white ink, renders its
//! layer, and pastes it in place:
//!
//! - [`overlay_text`]: word-wrapped annotation text,
//! - [`overlay_rectangle`]: an opaque solid rectangle,
//! - [`overlay_scalebar`]: a bar sized to the frame with a distance label.
//!
//! Each has a `_with` variant taking an [`OverlayConfig`].
//!
//! ## Quickstart
//!
//! ```no_run
//! use image_overlay::{overlay_text, Anchor, PixelFont};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut img = image::open("photo.png")?.to_rgba8();
//! overlay_text(&mut img, "site 7, borehole B", Anchor::BottomRight, &PixelFont)?;
//! img.save("annotated.png")?;
//! # Ok(())
//! # }
//! ```
//!
//! Fonts are injected: bring a TTF/OTF face via [`TtfFont`] or use the
//! built-in [`PixelFont`] bitmap face. There is no system font discovery.
//!
//! API map:
//! - [`core`](image_overlay_core): raster views, anchors, sampler, compositor;
//! - [`text`](image_overlay_text): wrap heuristic and font rasterizers;
//! - this crate: the [`Canvas`] adapter over `image` buffers plus the
//!   ready-made operations (behind the default `image` feature).

pub use image_overlay_core as core;
pub use image_overlay_text as text;

pub use image_overlay_core::{
    composite, sample_shade, Anchor, ComposeError, InvalidAnchorError, Layer, OverlayConfig,
    PixelFormat, RasterError, RasterMut, RasterView, Shade,
};
pub use image_overlay_text::{
    layout_text, render_text, FontError, PixelFont, TextLayout, TextRasterizer, TtfFont,
};

#[cfg(feature = "tracing")]
pub use image_overlay_core::init_tracing;
pub use image_overlay_core::init_with_level;

mod error;
pub use error::OverlayError;

#[cfg(feature = "image")]
mod canvas;
#[cfg(feature = "image")]
mod ops;

#[cfg(feature = "image")]
pub use canvas::Canvas;
#[cfg(feature = "image")]
pub use ops::{
    overlay_rectangle, overlay_rectangle_with, overlay_scalebar, overlay_scalebar_with,
    overlay_text, overlay_text_with,
};
