//! Immutable parameter bundles describing one renderable composition

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::algorithm::anchors::Subject;
use crate::io::configuration::{
    DEFAULT_BRIGHTNESS, DEFAULT_CONTRAST, DEFAULT_IMAGE_SCALE, DEFAULT_MAX_CELLS,
    DEFAULT_PIXEL_SIZE, DEFAULT_RESHUFFLE_EVERY, DEFAULT_SEED,
};
use crate::spatial::arrangement::ArrangementParams;

/// Shape knobs for the bouquet arrangement, each normalized to `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BouquetKnobs {
    /// Requested sprite count
    pub flower_count: usize,
    /// Overall bouquet size
    pub scale: f64,
    /// Width versus height
    pub aspect: f64,
    /// Jitter and size spread
    pub dispersion: f64,
    /// Cap on ring height relative to width
    pub front_view_ratio: f64,
    /// Upward shift of the outer ring
    pub outer_lift: f64,
    /// Upward shift of the inner ring
    pub inner_lift: f64,
    /// Optional explicit density
    pub density: Option<f64>,
}

impl Default for BouquetKnobs {
    fn default() -> Self {
        let params = ArrangementParams::default();
        Self {
            flower_count: params.flower_count,
            scale: params.scale,
            aspect: params.aspect,
            dispersion: params.dispersion,
            front_view_ratio: params.front_view_ratio,
            outer_lift: params.outer_lift,
            inner_lift: params.inner_lift,
            density: params.density,
        }
    }
}

impl BouquetKnobs {
    /// Arrangement inputs anchored at `(center_x, center_y)`
    pub const fn to_params(
        &self,
        center_x: f64,
        center_y: f64,
        unit: f64,
        sprite_count: usize,
    ) -> ArrangementParams {
        ArrangementParams {
            center_x,
            center_y,
            unit,
            flower_count: self.flower_count,
            scale: self.scale,
            aspect: self.aspect,
            dispersion: self.dispersion,
            front_view_ratio: self.front_view_ratio,
            outer_lift: self.outer_lift,
            inner_lift: self.inner_lift,
            sprite_count,
            density: self.density,
        }
    }
}

/// Every tunable of one composition
///
/// Presets are replaced wholesale, never mutated in place by the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    /// Display name
    pub name: String,
    /// Seed every stochastic stage of this composition derives from
    pub seed: u32,
    /// Side of one mosaic cell in canvas pixels (at least 1)
    pub pixel_size: u32,
    /// Brightness offset added before contrast
    pub brightness: i32,
    /// Contrast factor
    pub contrast: f32,
    /// Fraction of the canvas the source may occupy
    pub image_scale: f64,
    /// Draw cells as squares rather than circles
    pub draw_as_rects: bool,
    /// Cells realized per frame
    pub max_cells: usize,
    /// Frames between reshuffles of the draw order (0 = never)
    pub reshuffle_every: u32,
    /// Source image identity used for the bouquet anchor
    pub subject: Subject,
    /// Source image path
    pub source: Option<PathBuf>,
    /// Sprite image paths
    pub sprites: Vec<PathBuf>,
    /// Bouquet shape, or `None` to skip the arrangement
    pub bouquet: Option<BouquetKnobs>,
}

impl Default for Preset {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            seed: DEFAULT_SEED,
            pixel_size: DEFAULT_PIXEL_SIZE,
            brightness: DEFAULT_BRIGHTNESS,
            contrast: DEFAULT_CONTRAST,
            image_scale: DEFAULT_IMAGE_SCALE,
            draw_as_rects: true,
            max_cells: DEFAULT_MAX_CELLS,
            reshuffle_every: DEFAULT_RESHUFFLE_EVERY,
            subject: Subject::Other,
            source: None,
            sprites: Vec::new(),
            bouquet: Some(BouquetKnobs::default()),
        }
    }
}

impl Preset {
    /// Pixel size floored to 1
    pub fn effective_pixel_size(&self) -> u32 {
        self.pixel_size.max(1)
    }
}
