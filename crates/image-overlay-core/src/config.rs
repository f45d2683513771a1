use serde::{Deserialize, Serialize};

/// Tuning knobs shared by every overlay operation.
///
/// The defaults match the field setup the overlays were tuned on: a 75 px
/// corner inset, a luminance cutoff of 150, a text canvas at 30% of the
/// frame width, and a 500 px contrast sampling window.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Corner anchor inset from the frame edges, in pixels.
    pub margin: u32,
    /// Mean-luminance cutoff for the contrast sampler. Regions at or above
    /// it count as bright and get black ink; darker regions get white.
    pub shade_threshold: f64,
    /// Text canvas width as a fraction of the background width.
    ///
    /// Fractions between 0.3 and 0.5 read well on rover footage; larger
    /// values crowd the frame.
    pub relative_text_size: f64,
    /// Contrast sampling window size, in pixels right and down from the
    /// anchor point.
    pub sample_extent: u32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            margin: 75,
            shade_threshold: 150.0,
            relative_text_size: 0.3,
            sample_extent: 500,
        }
    }
}
