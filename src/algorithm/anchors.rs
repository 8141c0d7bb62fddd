//! Per-subject bouquet anchor points
//!
//! Each known source image identifies where its bouquet grows from (a vase
//! mouth, a basket rim) as a fraction of the fitted image bounds. Unknown
//! subjects fall back to a default fraction.

use serde::{Deserialize, Serialize};

/// Identity of the source image, used only to look up its anchor
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Subject {
    /// Tall vase; anchor at the mouth
    Vase,
    /// Jug with a spout on the left; anchor slightly left of center
    Jug,
    /// Wide basket; anchor at the rim
    Basket,
    /// Teapot; anchor at the lid opening
    Teapot,
    /// Shallow bowl; anchor low on the image
    Bowl,
    /// Any other image; uses the default anchor
    #[default]
    Other,
}

/// Fractional position inside the fitted image bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    /// Horizontal fraction, 0 is the left edge
    pub x: f64,
    /// Vertical fraction, 0 is the top edge
    pub y: f64,
}

/// Anchor used for subjects without a table entry
pub const DEFAULT_ANCHOR: Anchor = Anchor { x: 0.5, y: 0.22 };

const ANCHORS: [(Subject, Anchor); 5] = [
    (Subject::Vase, Anchor { x: 0.5, y: 0.16 }),
    (Subject::Jug, Anchor { x: 0.44, y: 0.12 }),
    (Subject::Basket, Anchor { x: 0.5, y: 0.34 }),
    (Subject::Teapot, Anchor { x: 0.42, y: 0.2 }),
    (Subject::Bowl, Anchor { x: 0.5, y: 0.38 }),
];

impl Subject {
    /// Anchor fraction for this subject
    pub fn anchor(self) -> Anchor {
        ANCHORS
            .iter()
            .find(|(subject, _)| *subject == self)
            .map_or(DEFAULT_ANCHOR, |(_, anchor)| *anchor)
    }
}
