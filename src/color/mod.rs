//! Palette handling and color quantization

/// Fixed palette with nearest-entry lookup
pub mod palette;

pub use palette::{Palette, Rgb};
