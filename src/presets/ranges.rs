//! Sampling ranges and fixed overrides for preset generation
//!
//! Precedence for every preset field, highest first:
//! 1. a value in [`FixedOverrides`]
//! 2. a value sampled from the configured [`PresetRanges`] entry
//! 3. a value sampled from the built-in default range
//!
//! Fields without a range (flags, budgets, paths) take the override if present
//! and the crate default otherwise.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::algorithm::anchors::Subject;
use crate::io::configuration::{
    DEFAULT_ASPECT_RANGE, DEFAULT_BOUQUET_SCALE_RANGE, DEFAULT_BRIGHTNESS_RANGE,
    DEFAULT_CONTRAST_RANGE, DEFAULT_DISPERSION_RANGE, DEFAULT_FLOWER_COUNT_RANGE,
    DEFAULT_FRONT_VIEW_RANGE, DEFAULT_IMAGE_SCALE_RANGE, DEFAULT_INNER_LIFT_RANGE,
    DEFAULT_OUTER_LIFT_RANGE, DEFAULT_PIXEL_SIZE_RANGE,
};
use crate::io::error::{Result, invalid_parameter};
use crate::math::interpolation::lerp;
use crate::math::random::SeededRandom;

/// Closed interval a parameter is sampled from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterRange {
    /// Inclusive lower bound
    pub min: f64,
    /// Inclusive upper bound
    pub max: f64,
}

impl ParameterRange {
    /// Create a range
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Uniform float in `[min, max)`; consumes one draw
    pub fn sample(&self, rng: &mut SeededRandom) -> f64 {
        lerp(self.min, self.max, rng.next_f64())
    }

    /// Uniform integer in `[floor(min), floor(max)]`; consumes one draw
    pub fn sample_integer(&self, rng: &mut SeededRandom) -> i64 {
        let lo = self.min.floor();
        let hi = self.max.floor().max(lo);
        let value = lerp(lo, hi + 1.0, rng.next_f64()).floor();
        value.clamp(lo, hi) as i64
    }

    /// Whether `value` lies inside the range
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Reject reversed or non-finite ranges
    ///
    /// # Errors
    ///
    /// Returns an error if either bound is not finite or `min > max`
    pub fn validate(&self, parameter: &'static str) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min > self.max {
            return Err(invalid_parameter(
                parameter,
                &format!("[{}, {}]", self.min, self.max),
                &"range bounds must be finite with min <= max",
            ));
        }
        Ok(())
    }
}

/// Configured ranges; unset entries use the built-in default range
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresetRanges {
    /// Mosaic cell size in pixels
    pub pixel_size: Option<ParameterRange>,
    /// Brightness offset
    pub brightness: Option<ParameterRange>,
    /// Contrast factor
    pub contrast: Option<ParameterRange>,
    /// Fraction of the canvas the source occupies
    pub image_scale: Option<ParameterRange>,
    /// Bouquet sprite count
    pub flower_count: Option<ParameterRange>,
    /// Bouquet size knob
    pub bouquet_scale: Option<ParameterRange>,
    /// Bouquet aspect knob
    pub aspect: Option<ParameterRange>,
    /// Bouquet dispersion knob
    pub dispersion: Option<ParameterRange>,
    /// Bouquet front-view ratio knob
    pub front_view_ratio: Option<ParameterRange>,
    /// Outer ring lift
    pub outer_lift: Option<ParameterRange>,
    /// Inner ring lift
    pub inner_lift: Option<ParameterRange>,
    /// Explicit density; only sampled when configured
    pub density: Option<ParameterRange>,
}

impl PresetRanges {
    /// Every configured range paired with its parameter name
    pub fn configured(&self) -> Vec<(&'static str, ParameterRange)> {
        [
            ("pixel_size", self.pixel_size),
            ("brightness", self.brightness),
            ("contrast", self.contrast),
            ("image_scale", self.image_scale),
            ("flower_count", self.flower_count),
            ("bouquet_scale", self.bouquet_scale),
            ("aspect", self.aspect),
            ("dispersion", self.dispersion),
            ("front_view_ratio", self.front_view_ratio),
            ("outer_lift", self.outer_lift),
            ("inner_lift", self.inner_lift),
            ("density", self.density),
        ]
        .into_iter()
        .filter_map(|(name, range)| range.map(|r| (name, r)))
        .collect()
    }

    /// Reject reversed or non-finite ranges
    ///
    /// # Errors
    ///
    /// Returns the first invalid range found
    pub fn validate(&self) -> Result<()> {
        for (name, range) in self.configured() {
            range.validate(name)?;
        }
        Ok(())
    }

    /// Pixel size range, configured or default
    pub fn pixel_size(&self) -> ParameterRange {
        self.pixel_size.unwrap_or(DEFAULT_PIXEL_SIZE_RANGE)
    }

    /// Brightness range, configured or default
    pub fn brightness(&self) -> ParameterRange {
        self.brightness.unwrap_or(DEFAULT_BRIGHTNESS_RANGE)
    }

    /// Contrast range, configured or default
    pub fn contrast(&self) -> ParameterRange {
        self.contrast.unwrap_or(DEFAULT_CONTRAST_RANGE)
    }

    /// Image scale range, configured or default
    pub fn image_scale(&self) -> ParameterRange {
        self.image_scale.unwrap_or(DEFAULT_IMAGE_SCALE_RANGE)
    }

    /// Flower count range, configured or default
    pub fn flower_count(&self) -> ParameterRange {
        self.flower_count.unwrap_or(DEFAULT_FLOWER_COUNT_RANGE)
    }

    /// Bouquet scale range, configured or default
    pub fn bouquet_scale(&self) -> ParameterRange {
        self.bouquet_scale.unwrap_or(DEFAULT_BOUQUET_SCALE_RANGE)
    }

    /// Aspect range, configured or default
    pub fn aspect(&self) -> ParameterRange {
        self.aspect.unwrap_or(DEFAULT_ASPECT_RANGE)
    }

    /// Dispersion range, configured or default
    pub fn dispersion(&self) -> ParameterRange {
        self.dispersion.unwrap_or(DEFAULT_DISPERSION_RANGE)
    }

    /// Front-view ratio range, configured or default
    pub fn front_view_ratio(&self) -> ParameterRange {
        self.front_view_ratio.unwrap_or(DEFAULT_FRONT_VIEW_RANGE)
    }

    /// Outer lift range, configured or default
    pub fn outer_lift(&self) -> ParameterRange {
        self.outer_lift.unwrap_or(DEFAULT_OUTER_LIFT_RANGE)
    }

    /// Inner lift range, configured or default
    pub fn inner_lift(&self) -> ParameterRange {
        self.inner_lift.unwrap_or(DEFAULT_INNER_LIFT_RANGE)
    }
}

/// Values that replace sampled or default ones unconditionally
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixedOverrides {
    /// Mosaic cell size
    pub pixel_size: Option<u32>,
    /// Brightness offset
    pub brightness: Option<i32>,
    /// Contrast factor
    pub contrast: Option<f32>,
    /// Fraction of the canvas the source occupies
    pub image_scale: Option<f64>,
    /// Draw cells as squares
    pub draw_as_rects: Option<bool>,
    /// Cells realized per frame
    pub max_cells: Option<usize>,
    /// Frames between reshuffles
    pub reshuffle_every: Option<u32>,
    /// Source image identity
    pub subject: Option<Subject>,
    /// Source image path
    pub source: Option<PathBuf>,
    /// Sprite image paths
    pub sprites: Option<Vec<PathBuf>>,
    /// Enable or disable the bouquet
    pub bouquet: Option<bool>,
    /// Bouquet sprite count
    pub flower_count: Option<usize>,
    /// Bouquet size knob
    pub bouquet_scale: Option<f64>,
    /// Bouquet aspect knob
    pub aspect: Option<f64>,
    /// Bouquet dispersion knob
    pub dispersion: Option<f64>,
    /// Bouquet front-view ratio knob
    pub front_view_ratio: Option<f64>,
    /// Outer ring lift
    pub outer_lift: Option<f64>,
    /// Inner ring lift
    pub inner_lift: Option<f64>,
    /// Explicit density
    pub density: Option<f64>,
}

impl FixedOverrides {
    /// Combine two override sets; values in `higher` win
    #[must_use]
    pub fn merged_with(&self, higher: &Self) -> Self {
        Self {
            pixel_size: higher.pixel_size.or(self.pixel_size),
            brightness: higher.brightness.or(self.brightness),
            contrast: higher.contrast.or(self.contrast),
            image_scale: higher.image_scale.or(self.image_scale),
            draw_as_rects: higher.draw_as_rects.or(self.draw_as_rects),
            max_cells: higher.max_cells.or(self.max_cells),
            reshuffle_every: higher.reshuffle_every.or(self.reshuffle_every),
            subject: higher.subject.or(self.subject),
            source: higher.source.clone().or_else(|| self.source.clone()),
            sprites: higher.sprites.clone().or_else(|| self.sprites.clone()),
            bouquet: higher.bouquet.or(self.bouquet),
            flower_count: higher.flower_count.or(self.flower_count),
            bouquet_scale: higher.bouquet_scale.or(self.bouquet_scale),
            aspect: higher.aspect.or(self.aspect),
            dispersion: higher.dispersion.or(self.dispersion),
            front_view_ratio: higher.front_view_ratio.or(self.front_view_ratio),
            outer_lift: higher.outer_lift.or(self.outer_lift),
            inner_lift: higher.inner_lift.or(self.inner_lift),
            density: higher.density.or(self.density),
        }
    }
}
