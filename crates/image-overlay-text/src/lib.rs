//! Text layout and rasterization for image overlays.
//!
//! [`layout_text`] wraps a string for a fixed canvas width; [`render_text`]
//! turns the layout into a transparent [`Layer`](image_overlay_core::Layer)
//! through an injected [`TextRasterizer`]. Two rasterizers ship here:
//! [`TtfFont`] rasterizes TrueType/OpenType outlines via `ab_glyph`, and
//! [`PixelFont`] is a dependency-free 5x7 bitmap face for environments
//! without font files.

mod font;
mod pixel_font;
mod render;
mod ttf;
mod wrap;

pub use font::{FontError, TextRasterizer};
pub use pixel_font::PixelFont;
pub use render::render_text;
pub use ttf::TtfFont;
pub use wrap::{layout_text, TextLayout};
