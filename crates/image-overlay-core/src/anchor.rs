//! Overlay placement: symbolic corners and explicit coordinates.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Raised when an anchor string is neither a corner name nor an `x,y` pair.
#[derive(Debug, Error)]
#[error("unknown anchor {input:?} (expected tl, tr, bl, br, a spelled-out corner, or x,y)")]
pub struct InvalidAnchorError {
    pub input: String,
}

/// Target position for an overlay's top-left pixel.
///
/// Corner anchors resolve against the background geometry: `margin` pixels
/// in from the top and left edges, with the right-hand column at 70% of the
/// width and the bottom row at 90% of the height, both pulled back by the
/// margin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    /// Explicit coordinates, passed through unresolved.
    At(i64, i64),
}

impl Anchor {
    /// Resolve to pixel coordinates for a `width x height` background.
    ///
    /// Fractional corner positions truncate toward zero. No bounds checking
    /// happens here; the compositor rejects unusable coordinates.
    pub fn resolve(self, width: u32, height: u32, margin: u32) -> (i64, i64) {
        let m = i64::from(margin);
        let w = f64::from(width);
        let h = f64::from(height);
        let fm = f64::from(margin);
        match self {
            Anchor::TopLeft => (m, m),
            Anchor::TopRight => ((0.7 * w - fm) as i64, m),
            Anchor::BottomLeft => (m, (0.9 * h - fm) as i64),
            Anchor::BottomRight => ((0.7 * w - fm) as i64, (0.9 * h - fm) as i64),
            Anchor::At(x, y) => (x, y),
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anchor::TopLeft => f.write_str("tl"),
            Anchor::TopRight => f.write_str("tr"),
            Anchor::BottomLeft => f.write_str("bl"),
            Anchor::BottomRight => f.write_str("br"),
            Anchor::At(x, y) => write!(f, "{x},{y}"),
        }
    }
}

impl FromStr for Anchor {
    type Err = InvalidAnchorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        match t {
            "tl" | "top-left" => Ok(Anchor::TopLeft),
            "tr" | "top-right" => Ok(Anchor::TopRight),
            "bl" | "bottom-left" => Ok(Anchor::BottomLeft),
            "br" | "bottom-right" => Ok(Anchor::BottomRight),
            _ => {
                let pair = t.split_once(',').and_then(|(x, y)| {
                    let x = x.trim().parse().ok()?;
                    let y = y.trim().parse().ok()?;
                    Some(Anchor::At(x, y))
                });
                pair.ok_or_else(|| InvalidAnchorError { input: s.to_owned() })
            }
        }
    }
}
