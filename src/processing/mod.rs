//! Image transform pipeline: fit, tone adjustment and error-diffusion dithering

/// Floyd-Steinberg error diffusion
pub mod dither;
/// Aspect-preserving fit and resampling
pub mod fit;
/// Brightness, contrast and the fixed tone pipeline
pub mod tone;

pub use dither::{DitherReport, dither};
pub use fit::{FitPlacement, Fitted, fit};
pub use tone::{TonePipeline, adjust_brightness, adjust_contrast};
