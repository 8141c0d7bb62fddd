//! Constants, defaults and the versioned configuration document

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::algorithm::compositor::CanvasSize;
use crate::color::Palette;
use crate::io::error::{Result, WithPath, configuration_error, invalid_parameter};
use crate::presets::ranges::{FixedOverrides, ParameterRange, PresetRanges};
use crate::processing::tone::{BRIGHTNESS_LIMIT, CONTRAST_LIMIT};
use crate::spatial::arrangement::ArrangementTuning;

/// Configuration document version this build understands
pub const CONFIG_VERSION: u32 = 1;

// Composition defaults
/// Default top-level seed
pub const DEFAULT_SEED: u32 = 1337;
/// Default output canvas width
pub const DEFAULT_CANVAS_WIDTH: u32 = 480;
/// Default output canvas height
pub const DEFAULT_CANVAS_HEIGHT: u32 = 640;
/// Default mosaic cell size
pub const DEFAULT_PIXEL_SIZE: u32 = 3;
/// Largest accepted mosaic cell size
pub const MAX_PIXEL_SIZE: u32 = 64;
/// Default brightness offset
pub const DEFAULT_BRIGHTNESS: i32 = -15;
/// Default contrast factor
pub const DEFAULT_CONTRAST: f32 = 15.0;
/// Default fraction of the canvas the source occupies
pub const DEFAULT_IMAGE_SCALE: f64 = 0.9;
/// Default cells realized per frame
pub const DEFAULT_MAX_CELLS: usize = 50_000;
/// Default frames between reshuffles (never)
pub const DEFAULT_RESHUFFLE_EVERY: u32 = 0;
/// Default number of presets generated
pub const DEFAULT_PRESET_COUNT: usize = 8;
/// Default coverage floor when layers share a budget
pub const DEFAULT_MIN_COVERAGE: f64 = 0.25;

// Arrangement constants
/// Smallest bouquet the arrangement accepts
pub const MIN_FLOWER_COUNT: usize = 6;
/// Smallest number of points requested on a ring
pub const MIN_RING_COUNT: usize = 2;
/// Rejection-sampling attempts per requested point
pub const DEFAULT_ATTEMPT_FACTOR: usize = 140;
/// Front-half angle probability on the outer ring
pub const DEFAULT_OUTER_FRONT_BIAS: f64 = 0.82;
/// Front-half angle probability on the inner ring
pub const DEFAULT_INNER_FRONT_BIAS: f64 = 0.68;
/// Inner ring gap relative to the outer ring gap
pub const DEFAULT_INNER_GAP_FACTOR: f64 = 0.88;
/// Largest absolute sprite rotation in radians
pub const DEFAULT_MAX_ROTATION: f64 = 0.35;

// Default sampling ranges
/// Pixel size range
pub const DEFAULT_PIXEL_SIZE_RANGE: ParameterRange = ParameterRange::new(2.0, 3.0);
/// Brightness range
pub const DEFAULT_BRIGHTNESS_RANGE: ParameterRange = ParameterRange::new(-20.0, -10.0);
/// Contrast range
pub const DEFAULT_CONTRAST_RANGE: ParameterRange = ParameterRange::new(10.0, 20.0);
/// Image scale range
pub const DEFAULT_IMAGE_SCALE_RANGE: ParameterRange = ParameterRange::new(0.82, 0.94);
/// Flower count range
pub const DEFAULT_FLOWER_COUNT_RANGE: ParameterRange = ParameterRange::new(24.0, 64.0);
/// Bouquet scale range
pub const DEFAULT_BOUQUET_SCALE_RANGE: ParameterRange = ParameterRange::new(0.35, 0.8);
/// Aspect range
pub const DEFAULT_ASPECT_RANGE: ParameterRange = ParameterRange::new(0.35, 0.7);
/// Dispersion range
pub const DEFAULT_DISPERSION_RANGE: ParameterRange = ParameterRange::new(0.25, 0.7);
/// Front-view ratio range
pub const DEFAULT_FRONT_VIEW_RANGE: ParameterRange = ParameterRange::new(0.45, 0.8);
/// Outer lift range
pub const DEFAULT_OUTER_LIFT_RANGE: ParameterRange = ParameterRange::new(0.05, 0.35);
/// Inner lift range
pub const DEFAULT_INNER_LIFT_RANGE: ParameterRange = ParameterRange::new(0.3, 0.6);

// Output settings
/// Infix added to output filenames before the preset name
pub const OUTPUT_INFIX: &str = "_";
/// Frames in an exported reveal animation
pub const REVEAL_FRAME_COUNT: usize = 24;
/// Delay between reveal animation frames
pub const REVEAL_FRAME_DELAY_MS: u32 = 40;
/// Minimum frame delay that viewers reliably support (in milliseconds)
pub const VIEWER_MIN_FRAME_DELAY_MS: u32 = 50;
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

/// Versioned configuration document
///
/// Every field has a default, so a document only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MosaicConfig {
    /// Document version; must equal [`CONFIG_VERSION`]
    pub version: u32,
    /// Output canvas width
    pub canvas_width: u32,
    /// Output canvas height
    pub canvas_height: u32,
    /// Palette, background first
    pub palette: Palette,
    /// Top-level preset seed
    pub seed: u32,
    /// Number of presets to derive
    pub preset_count: usize,
    /// Sampling ranges
    pub ranges: PresetRanges,
    /// Values applied after sampling
    pub fixed: FixedOverrides,
    /// Arrangement sampler constants
    pub tuning: ArrangementTuning,
    /// Coverage floor when layers share a budget
    pub min_coverage: f64,
}

impl Default for MosaicConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            palette: Palette::default(),
            seed: DEFAULT_SEED,
            preset_count: DEFAULT_PRESET_COUNT,
            ranges: PresetRanges::default(),
            fixed: FixedOverrides::default(),
            tuning: ArrangementTuning::default(),
            min_coverage: DEFAULT_MIN_COVERAGE,
        }
    }
}

impl MosaicConfig {
    /// Parse and validate a JSON document
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or fails [`Self::validate`]
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its contents are invalid
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            crate::io::error::MosaicError::FileSystem {
                path: path.to_path_buf(),
                operation: "read configuration",
                source: e,
            }
        })?;
        Self::from_json_str(&text).with_path(path)
    }

    /// Check everything the core would otherwise silently clamp
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint
    pub fn validate(&self) -> Result<()> {
        if self.version != CONFIG_VERSION {
            return Err(configuration_error(
                &"version",
                &format!(
                    "unsupported version {} (expected {CONFIG_VERSION})",
                    self.version
                ),
            ));
        }
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(invalid_parameter(
                "canvas",
                &format!("{}x{}", self.canvas_width, self.canvas_height),
                &"canvas dimensions must be positive",
            ));
        }
        if !(0.0..=1.0).contains(&self.min_coverage) {
            return Err(invalid_parameter(
                "min_coverage",
                &self.min_coverage,
                &"coverage must lie in [0, 1]",
            ));
        }
        if let Some(brightness) = self.fixed.brightness {
            validate_brightness(f64::from(brightness))?;
        }
        if let Some(range) = self.ranges.brightness {
            validate_brightness(range.min)?;
            validate_brightness(range.max)?;
        }
        if let Some(contrast) = self.fixed.contrast {
            validate_contrast(contrast)?;
        }
        if let Some(range) = self.ranges.contrast {
            validate_contrast(range.min as f32)?;
            validate_contrast(range.max as f32)?;
        }
        if self.fixed.pixel_size == Some(0) {
            return Err(invalid_parameter(
                "pixel_size",
                &0,
                &"pixel size must be at least 1",
            ));
        }
        self.ranges.validate()
    }

    /// Canvas size described by this configuration
    pub const fn canvas(&self) -> CanvasSize {
        CanvasSize {
            width: self.canvas_width,
            height: self.canvas_height,
        }
    }
}

/// Reject brightness offsets outside `[-BRIGHTNESS_LIMIT, BRIGHTNESS_LIMIT]`
///
/// # Errors
///
/// Returns an error for NaN or out-of-range offsets
pub fn validate_brightness(brightness: f64) -> Result<()> {
    let limit = f64::from(BRIGHTNESS_LIMIT);
    if brightness.is_nan() || brightness.abs() > limit {
        return Err(invalid_parameter(
            "brightness",
            &brightness,
            &format!("brightness must lie in [-{limit}, {limit}]"),
        ));
    }
    Ok(())
}

/// Reject contrast factors outside `[-CONTRAST_LIMIT, CONTRAST_LIMIT]`
///
/// # Errors
///
/// Returns an error for NaN or out-of-range factors
pub fn validate_contrast(contrast: f32) -> Result<()> {
    if contrast.is_nan() || contrast.abs() > CONTRAST_LIMIT {
        return Err(invalid_parameter(
            "contrast",
            &contrast,
            &format!("contrast must lie in [-{CONTRAST_LIMIT}, {CONTRAST_LIMIT}]"),
        ));
    }
    Ok(())
}
