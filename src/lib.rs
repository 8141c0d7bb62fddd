//! Seeded bouquet compositing and palette-dithered pixel mosaics
//!
//! A source image is fitted into a fixed canvas, optionally decorated with a
//! procedurally arranged bouquet of sprites, reduced to a small palette through
//! brightness, contrast and error-diffusion dithering, and finally exposed as a
//! shuffled, budget-capped sequence of drawable cells for progressive rendering.
//! Every stochastic decision derives from a single integer seed.

#![forbid(unsafe_code)]

/// Mosaic composition, draw order and layer budgets
pub mod algorithm;
/// Palette handling and quantization
pub mod color;
/// Input/output operations and error handling
pub mod io;
/// Seeded randomness and interpolation utilities
pub mod math;
/// Preset bundles and their seeded derivation
pub mod presets;
/// Fit, tone adjustment and dithering
pub mod processing;
/// Sprite arrangement and compositing
pub mod spatial;

pub use io::error::{MosaicError, Result};
