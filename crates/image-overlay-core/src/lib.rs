//! Core building blocks for contrast-aware image overlays.
//!
//! This crate is deliberately container-agnostic: rasters are borrowed
//! interleaved 8-bit buffers and nothing here depends on an image codec.
//! The pieces compose in a fixed order:
//!
//! 1. [`Anchor::resolve`] turns a symbolic corner into pixel coordinates,
//! 2. [`sample_shade`] picks black or white ink from the local luminance,
//! 3. a [`Layer`] is rendered somewhere (text, rectangle),
//! 4. [`composite`] validates and pastes it onto the background in place.
//!
//! The `image-overlay` facade adapts `image`-crate buffers onto these
//! types and wires the pieces into ready-made operations.

mod anchor;
mod compose;
mod config;
mod logger;
mod raster;
mod shade;

pub use anchor::{Anchor, InvalidAnchorError};
pub use compose::{composite, ComposeError};
pub use config::OverlayConfig;
pub use raster::{Layer, PixelFormat, RasterError, RasterMut, RasterView};
pub use shade::{sample_shade, Shade};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;
pub use logger::init_with_level;
