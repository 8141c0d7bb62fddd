//! Deterministic preset derivation from one top-level seed
//!
//! Item `i` is seeded with `(seed + i * PRESET_SEED_STRIDE) mod 2^32` and draws
//! its parameters in a fixed order, so a preset never depends on how many
//! others were generated alongside it. Overrides are applied after sampling and
//! do not change the draw sequence.

use crate::io::configuration::{
    DEFAULT_MAX_CELLS, DEFAULT_RESHUFFLE_EVERY, MAX_PIXEL_SIZE, MIN_FLOWER_COUNT,
};
use crate::math::random::SeededRandom;
use crate::presets::preset::{BouquetKnobs, Preset};
use crate::presets::ranges::{FixedOverrides, PresetRanges};

/// Large prime separating per-item seeds
pub const PRESET_SEED_STRIDE: u32 = 2_654_435_761;

/// Per-item seed for preset `index`
pub const fn item_seed(seed: u32, index: usize) -> u32 {
    seed.wrapping_add((index as u32).wrapping_mul(PRESET_SEED_STRIDE))
}

/// Derives preset bundles from ranges and overrides
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PresetFactory {
    /// Sampling ranges
    pub ranges: PresetRanges,
    /// Values applied last
    pub overrides: FixedOverrides,
}

impl PresetFactory {
    /// Create a factory
    pub const fn new(ranges: PresetRanges, overrides: FixedOverrides) -> Self {
        Self { ranges, overrides }
    }

    /// Generate `count` presets from `seed`
    #[tracing::instrument(skip(self))]
    pub fn generate(&self, seed: u32, count: usize) -> Vec<Preset> {
        (0..count).map(|index| self.preset(seed, index)).collect()
    }

    /// Generate the preset at `index` without generating the others
    pub fn preset(&self, seed: u32, index: usize) -> Preset {
        let item = item_seed(seed, index);
        let mut rng = SeededRandom::new(item);
        let ranges = &self.ranges;

        let pixel_size = ranges
            .pixel_size()
            .sample_integer(&mut rng)
            .clamp(1, i64::from(MAX_PIXEL_SIZE)) as u32;
        let brightness = ranges.brightness().sample(&mut rng).round() as i32;
        let contrast = ranges.contrast().sample(&mut rng) as f32;
        let image_scale = ranges.image_scale().sample(&mut rng);
        let flower_count = ranges
            .flower_count()
            .sample_integer(&mut rng)
            .max(MIN_FLOWER_COUNT as i64) as usize;
        let bouquet = BouquetKnobs {
            flower_count,
            scale: ranges.bouquet_scale().sample(&mut rng),
            aspect: ranges.aspect().sample(&mut rng),
            dispersion: ranges.dispersion().sample(&mut rng),
            front_view_ratio: ranges.front_view_ratio().sample(&mut rng),
            outer_lift: ranges.outer_lift().sample(&mut rng),
            inner_lift: ranges.inner_lift().sample(&mut rng),
            density: ranges.density.map(|range| range.sample(&mut rng)),
        };

        let sampled = Preset {
            name: format!("preset{index:02}"),
            seed: item,
            pixel_size,
            brightness,
            contrast,
            image_scale,
            draw_as_rects: true,
            max_cells: DEFAULT_MAX_CELLS,
            reshuffle_every: DEFAULT_RESHUFFLE_EVERY,
            bouquet: Some(bouquet),
            ..Preset::default()
        };

        apply_overrides(sampled, &self.overrides)
    }
}

/// Generate `count` presets; see [`PresetFactory::generate`]
pub fn generate(
    seed: u32,
    count: usize,
    ranges: &PresetRanges,
    overrides: &FixedOverrides,
) -> Vec<Preset> {
    PresetFactory::new(*ranges, overrides.clone()).generate(seed, count)
}

/// Apply every set override to `preset`
pub fn apply_overrides(preset: Preset, overrides: &FixedOverrides) -> Preset {
    let bouquet = match overrides.bouquet {
        Some(false) => None,
        Some(true) => Some(preset.bouquet.unwrap_or_default()),
        None => preset.bouquet,
    }
    .map(|knobs| BouquetKnobs {
        flower_count: overrides
            .flower_count
            .unwrap_or(knobs.flower_count)
            .max(MIN_FLOWER_COUNT),
        scale: overrides.bouquet_scale.unwrap_or(knobs.scale),
        aspect: overrides.aspect.unwrap_or(knobs.aspect),
        dispersion: overrides.dispersion.unwrap_or(knobs.dispersion),
        front_view_ratio: overrides.front_view_ratio.unwrap_or(knobs.front_view_ratio),
        outer_lift: overrides.outer_lift.unwrap_or(knobs.outer_lift),
        inner_lift: overrides.inner_lift.unwrap_or(knobs.inner_lift),
        density: overrides.density.or(knobs.density),
    });

    Preset {
        pixel_size: overrides
            .pixel_size
            .unwrap_or(preset.pixel_size)
            .clamp(1, MAX_PIXEL_SIZE),
        brightness: overrides.brightness.unwrap_or(preset.brightness),
        contrast: overrides.contrast.unwrap_or(preset.contrast),
        image_scale: overrides.image_scale.unwrap_or(preset.image_scale),
        draw_as_rects: overrides.draw_as_rects.unwrap_or(preset.draw_as_rects),
        max_cells: overrides.max_cells.unwrap_or(preset.max_cells),
        reshuffle_every: overrides.reshuffle_every.unwrap_or(preset.reshuffle_every),
        subject: overrides.subject.unwrap_or(preset.subject),
        source: overrides.source.clone().or(preset.source),
        sprites: overrides.sprites.clone().unwrap_or(preset.sprites),
        bouquet,
        ..preset
    }
}
