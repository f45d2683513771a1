use thiserror::Error;

use image_overlay_core::{ComposeError, InvalidAnchorError};
use image_overlay_text::FontError;

/// One error type for the whole overlay surface.
///
/// The operations themselves only raise [`ComposeError`]; anchor parsing
/// and font loading happen at the caller's boundary and convert in via
/// `From`, so a `Result<_, OverlayError>` covers the full workflow.
#[derive(Debug, Error)]
pub enum OverlayError {
    #[error(transparent)]
    Anchor(#[from] InvalidAnchorError),

    #[error(transparent)]
    Compose(#[from] ComposeError),

    #[error(transparent)]
    Font(#[from] FontError),
}
