//! Spatial placement of decorative sprites
//!
//! This module contains:
//! - Ellipse guides for the two placement rings
//! - The seeded bouquet arrangement sampler
//! - Sprite sets and rotated alpha compositing

/// Seeded two-ring sprite arrangement
pub mod arrangement;
/// Ellipse guide geometry
pub mod ellipse;
/// Sprite sets and compositing
pub mod sprites;

pub use arrangement::{Arrangement, ArrangementGenerator, ArrangementParams, ArrangementPoint};
pub use ellipse::ArrangementGuide;
pub use sprites::SpriteSet;
