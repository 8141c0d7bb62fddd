//! Brightness and contrast transforms, and the fixed tone pipeline

use image::RgbaImage;

use crate::color::Palette;
use crate::processing::dither::{DitherReport, dither_with_report};

/// Largest accepted contrast factor magnitude
///
/// The contrast formula is singular at 259; inputs are clamped well before it.
pub const CONTRAST_LIMIT: f32 = 255.0;

/// Largest brightness offset that can still change a channel
pub const BRIGHTNESS_LIMIT: i32 = 255;

/// Add `offset` to each color channel, clamped to `[0, 255]`; alpha is untouched
///
/// `offset` is clamped to `[-BRIGHTNESS_LIMIT, BRIGHTNESS_LIMIT]` first.
pub fn adjust_brightness(raster: &mut RgbaImage, offset: i32) {
    let offset = offset.clamp(-BRIGHTNESS_LIMIT, BRIGHTNESS_LIMIT);
    if offset == 0 {
        return;
    }
    for pixel in raster.pixels_mut() {
        for channel in pixel.0.iter_mut().take(3) {
            *channel = (i32::from(*channel) + offset).clamp(0, 255) as u8;
        }
    }
}

/// Multiplier applied around mid-gray for a contrast `factor`
///
/// `factor` is clamped to `[-CONTRAST_LIMIT, CONTRAST_LIMIT]`.
pub fn contrast_multiplier(factor: f32) -> f32 {
    let factor = if factor.is_nan() {
        0.0
    } else {
        factor.clamp(-CONTRAST_LIMIT, CONTRAST_LIMIT)
    };
    259.0 * (factor + 255.0) / (255.0 * (259.0 - factor))
}

/// Stretch color channels around 128 by the contrast `factor`
pub fn adjust_contrast(raster: &mut RgbaImage, factor: f32) {
    let multiplier = contrast_multiplier(factor);
    for pixel in raster.pixels_mut() {
        for channel in pixel.0.iter_mut().take(3) {
            let stretched = multiplier.mul_add(f32::from(*channel) - 128.0, 128.0);
            *channel = stretched.round().clamp(0.0, 255.0) as u8;
        }
    }
}

/// Brightness, then contrast, then dithering
///
/// The order is fixed: contrast works on the brightened continuous tones and
/// dithering must see the final tone-adjusted values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TonePipeline {
    /// Offset added to every color channel
    pub brightness: i32,
    /// Contrast factor in roughly `[-255, 255]`
    pub contrast: f32,
}

impl TonePipeline {
    /// Run all three stages in place against `palette`
    pub fn apply(&self, raster: &mut RgbaImage, palette: &Palette) -> DitherReport {
        adjust_brightness(raster, self.brightness);
        adjust_contrast(raster, self.contrast);
        dither_with_report(raster, palette)
    }
}
