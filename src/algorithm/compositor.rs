//! Builds one finished, quantized mosaic per preset
//!
//! A [`Composition`] owns everything one build produced: the dithered working
//! raster, the arrangement, the immutable drawable cells and their base order.
//! Nothing is shared between compositions; rebuilding means building a new one.

use std::borrow::Cow;

use image::RgbaImage;
use tracing::{debug, info};

use crate::algorithm::draw_order::{DrawCells, DrawOrder, admitted};
use crate::color::Palette;
use crate::io::configuration::{DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH};
use crate::math::random::SeededRandom;
use crate::presets::preset::Preset;
use crate::processing::dither::DitherReport;
use crate::processing::fit::{FitPlacement, fit, place_on_canvas, resample};
use crate::processing::tone::TonePipeline;
use crate::spatial::arrangement::{Arrangement, ArrangementGenerator, ArrangementTuning};
use crate::spatial::sprites::{
    PROCEDURAL_SPRITE_COUNT, SpriteSet, composite_arrangement, procedural_flowers,
};

/// Salt mixed into the preset seed for the arrangement stream
pub const ARRANGEMENT_SEED_SALT: u32 = 0xA5A5_1F1F;

/// Canvas dimensions in output pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasSize {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS_WIDTH,
            height: DEFAULT_CANVAS_HEIGHT,
        }
    }
}

impl CanvasSize {
    /// Working grid for a pixel size: `floor(canvas / pixel_size)`, at least 1x1
    pub fn working(&self, pixel_size: u32) -> (u32, u32) {
        let pixel_size = pixel_size.max(1);
        (
            (self.width / pixel_size).max(1),
            (self.height / pixel_size).max(1),
        )
    }
}

/// Everything one build produced
#[derive(Debug, Clone)]
pub struct Composition {
    /// The preset this composition was built from
    pub preset: Preset,
    /// Dithered raster at working resolution; every pixel is a palette entry
    pub raster: RgbaImage,
    /// Output pixels per working cell
    pub pixel_size: u32,
    /// Where the source landed in composite space (working size x pixel size)
    pub placement: FitPlacement,
    /// Sprite arrangement in composite space, when the bouquet is enabled
    pub arrangement: Option<Arrangement>,
    /// Number of sprites actually drawn
    pub sprites_drawn: usize,
    /// Drawable cells of `raster`
    pub cells: DrawCells,
    /// Shuffled presentation order of `cells`
    pub order: DrawOrder,
    /// Error diffusion bookkeeping
    pub dither: DitherReport,
}

impl Composition {
    /// Working raster dimensions
    pub fn working_size(&self) -> (u32, u32) {
        self.raster.dimensions()
    }

    /// Output dimensions (working size times pixel size)
    pub fn output_size(&self) -> (u32, u32) {
        (
            self.raster.width().saturating_mul(self.pixel_size),
            self.raster.height().saturating_mul(self.pixel_size),
        )
    }

    /// Draw order for `frame` under the preset's reshuffle policy
    pub fn order_for_frame(&self, frame: u64) -> Cow<'_, [usize]> {
        self.order.for_frame(frame, self.preset.reshuffle_every)
    }

    /// Cells admitted at `frame` under the preset's budget
    pub fn admitted_for_frame(&self, frame: u64) -> Vec<usize> {
        admitted(&self.order_for_frame(frame), self.preset.max_cells).to_vec()
    }
}

/// Orchestrates fit, arrangement, compositing, tone and dithering
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Compositor {
    /// Palette every composition is reduced to
    pub palette: Palette,
    /// Output canvas size
    pub canvas: CanvasSize,
    /// Arrangement sampler constants
    pub tuning: ArrangementTuning,
}

impl Compositor {
    /// Create a compositor
    pub const fn new(palette: Palette, canvas: CanvasSize, tuning: ArrangementTuning) -> Self {
        Self {
            palette,
            canvas,
            tuning,
        }
    }

    /// Build the composition for `preset`
    ///
    /// `sprites` may be empty, in which case procedural flowers derived from the
    /// preset seed are used. Runs to completion synchronously and never fails.
    #[tracing::instrument(skip_all, fields(preset = %preset.name, seed = preset.seed))]
    pub fn build(&self, preset: &Preset, source: &RgbaImage, sprites: &SpriteSet) -> Composition {
        let pixel_size = preset.effective_pixel_size();
        let (working_width, working_height) = self.canvas.working(pixel_size);
        let composite_width = working_width.saturating_mul(pixel_size);
        let composite_height = working_height.saturating_mul(pixel_size);

        let fitted = fit(source, composite_width, composite_height, preset.image_scale);
        let mut canvas = place_on_canvas(
            &fitted,
            composite_width,
            composite_height,
            self.palette.background(),
        );

        let mut arrangement = None;
        let mut sprites_drawn = 0;
        if let Some(knobs) = &preset.bouquet {
            let generated;
            let sprite_set = if sprites.is_empty() {
                generated = procedural_flowers(preset.seed, PROCEDURAL_SPRITE_COUNT, &self.palette);
                &generated
            } else {
                sprites
            };

            let anchor = preset.subject.anchor();
            let (center_x, center_y) = fitted.placement.point_at(anchor.x, anchor.y);
            let params = knobs.to_params(
                center_x,
                center_y,
                f64::from(fitted.placement.width),
                sprite_set.len(),
            );
            let mut rng = SeededRandom::derived(preset.seed, ARRANGEMENT_SEED_SALT);
            let placed = ArrangementGenerator::new(self.tuning).generate(&params, &mut rng);
            sprites_drawn = composite_arrangement(&mut canvas, &placed.points, sprite_set);
            arrangement = Some(placed);
        }

        let mut raster = resample(&canvas, working_width, working_height);
        let dither = TonePipeline {
            brightness: preset.brightness,
            contrast: preset.contrast,
        }
        .apply(&mut raster, &self.palette);

        let cells = DrawCells::scan(&raster, &self.palette);
        let order = DrawOrder::new(&cells, preset.seed);

        debug!(
            working_width,
            working_height,
            sprites_drawn,
            "composition raster ready"
        );
        info!(cells = cells.len(), "composition built");

        Composition {
            preset: preset.clone(),
            raster,
            pixel_size,
            placement: fitted.placement,
            arrangement,
            sprites_drawn,
            cells,
            order,
            dither,
        }
    }
}
