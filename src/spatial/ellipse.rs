//! Ellipse guides describing the two placement rings

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

/// Smallest radius a ring may shrink to
pub const MIN_RADIUS: f64 = 1.0;

/// Axis-aligned ellipse used as a placement ring
///
/// Guides are informational once an arrangement exists; they may be drawn as an
/// overlay but nothing reads them back for placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArrangementGuide {
    /// Horizontal center
    pub center_x: f64,
    /// Vertical center
    pub center_y: f64,
    /// Horizontal semi-axis
    pub radius_x: f64,
    /// Vertical semi-axis
    pub radius_y: f64,
}

impl ArrangementGuide {
    /// Build a guide, flooring both radii to `MIN_RADIUS`
    pub fn new(center_x: f64, center_y: f64, radius_x: f64, radius_y: f64) -> Self {
        Self {
            center_x,
            center_y,
            radius_x: floor_radius(radius_x),
            radius_y: floor_radius(radius_y),
        }
    }

    /// Point on the ellipse at `angle` (radians, screen coordinates with y down)
    pub fn point_at(&self, angle: f64) -> (f64, f64) {
        (
            self.radius_x.mul_add(angle.cos(), self.center_x),
            self.radius_y.mul_add(angle.sin(), self.center_y),
        )
    }

    /// Enclosed area
    pub fn area(&self) -> f64 {
        PI * self.radius_x * self.radius_y
    }

    /// Scale both radii about the same center
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(
            self.center_x,
            self.center_y,
            self.radius_x * factor,
            self.radius_y * factor,
        )
    }

    /// Move the center vertically (negative is up on screen)
    pub fn shifted_y(&self, dy: f64) -> Self {
        Self {
            center_y: self.center_y + dy,
            ..*self
        }
    }
}

fn floor_radius(radius: f64) -> f64 {
    if radius.is_finite() {
        radius.max(MIN_RADIUS)
    } else {
        MIN_RADIUS
    }
}
