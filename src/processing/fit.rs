//! Aspect-preserving fit of a source raster into a target canvas region

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use crate::color::Rgb;
use crate::math::interpolation::clamp01;

/// Resampling filter for every resize in the pipeline
pub const RESAMPLE_FILTER: FilterType = FilterType::Triangle;

/// Where a fitted image landed inside its target region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FitPlacement {
    /// Left edge of the fitted image inside the target
    pub offset_x: u32,
    /// Top edge of the fitted image inside the target
    pub offset_y: u32,
    /// Fitted width in pixels (at least 1)
    pub width: u32,
    /// Fitted height in pixels (at least 1)
    pub height: u32,
}

impl FitPlacement {
    /// Map a fractional position inside the fitted bounds to target coordinates
    pub fn point_at(&self, fraction_x: f64, fraction_y: f64) -> (f64, f64) {
        (
            f64::from(self.width).mul_add(fraction_x, f64::from(self.offset_x)),
            f64::from(self.height).mul_add(fraction_y, f64::from(self.offset_y)),
        )
    }
}

/// A resized source together with its placement
#[derive(Debug, Clone)]
pub struct Fitted {
    /// Placement offsets and size inside the target
    pub placement: FitPlacement,
    /// The resized source, `placement.width` x `placement.height`
    pub image: RgbaImage,
}

/// Uniformly scale `source` to the largest size that fits inside the target and
/// does not exceed `scale` of that bound, centered
///
/// Zero-sized targets or sources are floored to one pixel, and `scale` is clamped
/// to `[0, 1]`, so the result always has positive dimensions.
pub fn fit(source: &RgbaImage, target_width: u32, target_height: u32, scale: f64) -> Fitted {
    let target_width = target_width.max(1);
    let target_height = target_height.max(1);
    let source_width = source.width().max(1);
    let source_height = source.height().max(1);

    let bound = (f64::from(target_width) / f64::from(source_width))
        .min(f64::from(target_height) / f64::from(source_height));
    let factor = bound * clamp01(scale);

    let width = scaled_dimension(source_width, factor, target_width);
    let height = scaled_dimension(source_height, factor, target_height);

    let image = if source.width() == 0 || source.height() == 0 {
        RgbaImage::new(width, height)
    } else if source.width() == width && source.height() == height {
        source.clone()
    } else {
        imageops::resize(source, width, height, RESAMPLE_FILTER)
    };

    Fitted {
        placement: FitPlacement {
            offset_x: (target_width - width) / 2,
            offset_y: (target_height - height) / 2,
            width,
            height,
        },
        image,
    }
}

fn scaled_dimension(dimension: u32, factor: f64, limit: u32) -> u32 {
    let scaled = (f64::from(dimension) * factor).round();
    if scaled.is_finite() && scaled >= 1.0 {
        (scaled as u32).min(limit)
    } else {
        1
    }
}

/// Paint a fitted image onto an opaque canvas of the target size
///
/// The canvas is filled with `background` first and the fitted image is
/// alpha-blended on top at its placement offsets.
pub fn place_on_canvas(
    fitted: &Fitted,
    target_width: u32,
    target_height: u32,
    background: Rgb,
) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(
        target_width.max(1),
        target_height.max(1),
        Rgba([background[0], background[1], background[2], 255]),
    );
    imageops::overlay(
        &mut canvas,
        &fitted.image,
        i64::from(fitted.placement.offset_x),
        i64::from(fitted.placement.offset_y),
    );
    canvas
}

/// Resize to exact dimensions, skipping the resample when they already match
pub fn resample(image: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    let width = width.max(1);
    let height = height.max(1);
    if image.width() == width && image.height() == height {
        image.clone()
    } else {
        imageops::resize(image, width, height, RESAMPLE_FILTER)
    }
}
