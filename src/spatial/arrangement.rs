//! Seeded bouquet arrangement: sprites placed on two density-weighted elliptical rings
//!
//! The outer ring is filled first and seeds the collision set of the inner ring,
//! which sits higher, smaller and tighter so it reads as behind the outer
//! cluster. Every candidate is rejection-sampled against a minimum gap; points
//! that cannot be placed within the attempt budget are simply left out.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::io::configuration::{
    DEFAULT_ATTEMPT_FACTOR, DEFAULT_INNER_FRONT_BIAS, DEFAULT_INNER_GAP_FACTOR,
    DEFAULT_MAX_ROTATION, DEFAULT_OUTER_FRONT_BIAS, MIN_FLOWER_COUNT, MIN_RING_COUNT,
};
use crate::math::interpolation::{clamp_range, clamp01, count_fraction, inverse_lerp, lerp};
use crate::math::random::SeededRandom;
use crate::math::sampling::{NearFarTail, front_biased_angle};
use crate::spatial::ellipse::ArrangementGuide;

/// Lowest density a bouquet may have
pub const DENSITY_MIN: f64 = 0.38;
/// Highest density a bouquet may have
pub const DENSITY_MAX: f64 = 0.88;
/// Share of sprites assigned to the outer ring before perturbation
pub const NOMINAL_OUTER_SHARE: f64 = 0.62;
/// Lower bound on the outer ring share
pub const OUTER_SHARE_MIN: f64 = 0.54;
/// Upper bound on the outer ring share
pub const OUTER_SHARE_MAX: f64 = 0.78;
/// Smallest inner ring scale relative to the outer ring
pub const INNER_SCALE_MIN: f64 = 0.44;
/// Largest inner ring scale relative to the outer ring
pub const INNER_SCALE_MAX: f64 = 0.84;
/// Sprite count at which the circle scale factor is 1
pub const REFERENCE_FLOWER_COUNT: f64 = 42.0;
/// Exponent applied to the count ratio in the circle scale factor
pub const CIRCLE_SCALE_EXPONENT: f64 = 0.88;
/// Outer ring semi-axis as a fraction of the reference length, before shaping
pub const OUTER_BASE_RADIUS: f64 = 0.26;

/// Which ring a point belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ring {
    /// Front, wider ring placed first
    Outer,
    /// Raised, smaller ring placed second
    Inner,
}

/// One placed sprite
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArrangementPoint {
    /// Horizontal position of the sprite center
    pub x: f64,
    /// Vertical position of the sprite center
    pub y: f64,
    /// Draw-order key in `[-1, 1]`; lower is drawn first
    pub depth: f64,
    /// Index into the sprite set (wrapped modulo the loaded sprite count when drawn)
    pub sprite_index: usize,
    /// Rotation in radians
    pub rotation: f64,
    /// Sprite size (longest side) in pixels
    pub size: f64,
    /// Ring the point was placed on
    pub ring: Ring,
}

/// Inputs to one arrangement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArrangementParams {
    /// Horizontal anchor of the bouquet
    pub center_x: f64,
    /// Vertical anchor of the bouquet
    pub center_y: f64,
    /// Reference length the ring sizes scale with (usually the fitted image width)
    pub unit: f64,
    /// Requested number of sprites (raised to the enforced minimum)
    pub flower_count: usize,
    /// Overall bouquet size knob in `[0, 1]`
    pub scale: f64,
    /// Width-versus-height knob in `[0, 1]`; higher is wider
    pub aspect: f64,
    /// Jitter and size spread knob in `[0, 1]`
    pub dispersion: f64,
    /// Cap on ring height relative to width in `[0, 1]`; low values foreshorten
    pub front_view_ratio: f64,
    /// Upward shift of the outer ring as a fraction of its vertical radius
    pub outer_lift: f64,
    /// Upward shift of the inner ring as a fraction of the outer vertical radius
    pub inner_lift: f64,
    /// Number of distinct sprites available
    pub sprite_count: usize,
    /// Optional explicit density, blended 70/30 with the derived one
    pub density: Option<f64>,
}

impl Default for ArrangementParams {
    fn default() -> Self {
        Self {
            center_x: 0.0,
            center_y: 0.0,
            unit: 100.0,
            flower_count: 42,
            scale: 0.5,
            aspect: 0.5,
            dispersion: 0.5,
            front_view_ratio: 0.6,
            outer_lift: 0.2,
            inner_lift: 0.45,
            sprite_count: 1,
            density: None,
        }
    }
}

/// Empirical constants of the placement sampler
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArrangementTuning {
    /// Rejection-sampling attempts allowed per requested point in a ring
    pub attempt_factor: usize,
    /// Probability of picking a front-half angle on the outer ring
    pub outer_front_bias: f64,
    /// Probability of picking a front-half angle on the inner ring
    pub inner_front_bias: f64,
    /// Inner ring minimum gap relative to the outer ring's
    pub inner_gap_factor: f64,
    /// Largest absolute sprite rotation in radians
    pub max_rotation: f64,
}

impl Default for ArrangementTuning {
    fn default() -> Self {
        Self {
            attempt_factor: DEFAULT_ATTEMPT_FACTOR,
            outer_front_bias: DEFAULT_OUTER_FRONT_BIAS,
            inner_front_bias: DEFAULT_INNER_FRONT_BIAS,
            inner_gap_factor: DEFAULT_INNER_GAP_FACTOR,
            max_rotation: DEFAULT_MAX_ROTATION,
        }
    }
}

/// Every quantity derived from the inputs before any point is placed
#[derive(Debug, Clone, PartialEq)]
pub struct BouquetLayout {
    /// Effective sprite count after clamping
    pub flower_count: usize,
    /// Density in `[DENSITY_MIN, DENSITY_MAX]`
    pub density: f64,
    /// Outer ring ellipse
    pub outer: ArrangementGuide,
    /// Inner ring ellipse
    pub inner: ArrangementGuide,
    /// Fraction of sprites requested on the outer ring
    pub outer_share: f64,
    /// Points requested on the outer ring
    pub outer_count: usize,
    /// Points requested on the inner ring
    pub inner_count: usize,
    /// Inner ring scale relative to the outer ring
    pub inner_scale: f64,
    /// Square root of ring area per sprite
    pub spacing: f64,
    /// Minimum center distance on the outer ring
    pub min_gap: f64,
    /// Radial jitter distribution
    pub radial_jitter: NearFarTail,
    /// Amplitude of independent vertical jitter
    pub vertical_jitter: f64,
    /// Amplitude of tangential jitter
    pub tangential_jitter: f64,
    /// Smallest sprite size before the frontal boost
    pub size_min: f64,
    /// Largest sprite size before the frontal boost
    pub size_max: f64,
}

/// Placement statistics for one ring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RingReport {
    /// Points requested
    pub requested: usize,
    /// Points accepted
    pub placed: usize,
    /// Candidates drawn
    pub attempts: usize,
}

/// Result of one arrangement
#[derive(Debug, Clone, PartialEq)]
pub struct Arrangement {
    /// Placed points sorted by ascending depth
    pub points: Vec<ArrangementPoint>,
    /// Outer ring guide
    pub outer: ArrangementGuide,
    /// Inner ring guide
    pub inner: ArrangementGuide,
    /// Outer ring statistics
    pub outer_report: RingReport,
    /// Inner ring statistics
    pub inner_report: RingReport,
    /// Minimum gap enforced on the outer ring
    pub outer_gap: f64,
    /// Minimum gap enforced on the inner ring
    pub inner_gap: f64,
    /// Density the arrangement was built with
    pub density: f64,
}

impl Arrangement {
    /// Points belonging to one ring, in depth order
    pub fn ring_points(&self, ring: Ring) -> impl Iterator<Item = &ArrangementPoint> {
        self.points.iter().filter(move |p| p.ring == ring)
    }
}

/// Places bouquet sprites with a seeded stream
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ArrangementGenerator {
    /// Sampler constants
    pub tuning: ArrangementTuning,
}

impl ArrangementGenerator {
    /// Create a generator with explicit tuning
    pub const fn new(tuning: ArrangementTuning) -> Self {
        Self { tuning }
    }

    /// Derive the layout and place both rings
    ///
    /// Never fails: degenerate inputs are clamped and under-filled rings are
    /// returned as they are.
    #[tracing::instrument(skip_all, fields(flowers = params.flower_count))]
    pub fn generate(&self, params: &ArrangementParams, rng: &mut SeededRandom) -> Arrangement {
        let layout = derive_layout(params, rng);
        let inner_gap = layout.min_gap * self.tuning.inner_gap_factor;

        let mut placed: Vec<ArrangementPoint> =
            Vec::with_capacity(layout.outer_count + layout.inner_count);

        let outer_report = self.place_ring(
            &RingPlan {
                ring: Ring::Outer,
                guide: layout.outer,
                count: layout.outer_count,
                min_gap: layout.min_gap,
                front_bias: self.tuning.outer_front_bias,
            },
            &layout,
            params.sprite_count,
            rng,
            &mut placed,
        );
        let inner_report = self.place_ring(
            &RingPlan {
                ring: Ring::Inner,
                guide: layout.inner,
                count: layout.inner_count,
                min_gap: inner_gap,
                front_bias: self.tuning.inner_front_bias,
            },
            &layout,
            params.sprite_count,
            rng,
            &mut placed,
        );

        placed.sort_by(|a, b| a.depth.total_cmp(&b.depth));

        debug!(
            requested = layout.outer_count + layout.inner_count,
            placed = placed.len(),
            density = layout.density,
            "arrangement generated"
        );

        Arrangement {
            points: placed,
            outer: layout.outer,
            inner: layout.inner,
            outer_report,
            inner_report,
            outer_gap: layout.min_gap,
            inner_gap,
            density: layout.density,
        }
    }

    fn place_ring(
        &self,
        plan: &RingPlan,
        layout: &BouquetLayout,
        sprite_count: usize,
        rng: &mut SeededRandom,
        placed: &mut Vec<ArrangementPoint>,
    ) -> RingReport {
        let max_attempts = plan.count.saturating_mul(self.tuning.attempt_factor.max(1));
        let gap_squared = plan.min_gap * plan.min_gap;
        let mut report = RingReport {
            requested: plan.count,
            placed: 0,
            attempts: 0,
        };

        while report.placed < plan.count && report.attempts < max_attempts {
            report.attempts += 1;

            let angle = front_biased_angle(rng, plan.front_bias);
            let (base_x, base_y) = plan.guide.point_at(angle);
            let (sin, cos) = angle.sin_cos();

            let magnitude = layout.radial_jitter.sample(rng);
            let radial = if rng.chance(0.5) { -magnitude } else { magnitude };
            let tangential = rng.symmetric(layout.tangential_jitter);
            let vertical = rng.symmetric(layout.vertical_jitter);

            let x = cos.mul_add(radial, base_x) - sin * tangential;
            let y = sin.mul_add(radial, base_y) + cos.mul_add(tangential, vertical);

            let collides = placed.iter().any(|p| {
                let dx = p.x - x;
                let dy = p.y - y;
                dx.mul_add(dx, dy * dy) < gap_squared
            });
            if collides {
                continue;
            }

            let sprite_index = rng.index(sprite_count);
            let rotation = rng.symmetric(self.tuning.max_rotation);
            let frontal = f64::midpoint(sin, 1.0);
            let size = lerp(layout.size_min, layout.size_max, rng.next_f64())
                * frontal.mul_add(0.2, 0.9);

            placed.push(ArrangementPoint {
                x,
                y,
                depth: sin,
                sprite_index,
                rotation,
                size,
                ring: plan.ring,
            });
            report.placed += 1;
        }

        report
    }
}

struct RingPlan {
    ring: Ring,
    guide: ArrangementGuide,
    count: usize,
    min_gap: f64,
    front_bias: f64,
}

/// Compute ring shapes, counts, spacing and jitter ranges for `params`
///
/// Consumes draws from `rng` in a fixed order: density jitter, outer width
/// noise, outer height noise, share noise, inner lift jitter.
pub fn derive_layout(params: &ArrangementParams, rng: &mut SeededRandom) -> BouquetLayout {
    let flower_count = params.flower_count.max(MIN_FLOWER_COUNT);
    let t = count_fraction(flower_count);
    let scale = clamp01(params.scale);
    let aspect = clamp01(params.aspect);
    let dispersion = clamp01(params.dispersion);
    let front_view = clamp01(params.front_view_ratio);
    let unit = if params.unit.is_finite() { params.unit.max(0.0) } else { 0.0 };

    let derived_density = clamp_range(
        lerp(0.80, 0.46, t) + rng.symmetric(0.06),
        DENSITY_MIN,
        DENSITY_MAX,
    );
    let density = params.density.map_or(derived_density, |explicit| {
        clamp_range(
            clamp01(explicit).mul_add(0.7, derived_density * 0.3),
            DENSITY_MIN,
            DENSITY_MAX,
        )
    });
    let density_t = inverse_lerp(DENSITY_MIN, DENSITY_MAX, density);

    let circle_scale = clamp_range(flower_count as f64 / REFERENCE_FLOWER_COUNT, 0.4, 1.4)
        .powf(CIRCLE_SCALE_EXPONENT);
    let base_radius =
        unit * OUTER_BASE_RADIUS * circle_scale * lerp(0.94, 1.06, t) * lerp(0.55, 1.0, scale);
    let radius_x = base_radius * lerp(0.85, 1.2, aspect) * (1.0 + rng.symmetric(0.04));
    let radius_y = (base_radius * lerp(0.95, 0.7, aspect) * (1.0 + rng.symmetric(0.04)))
        .min(front_view * radius_x);
    let outer_seed = ArrangementGuide::new(params.center_x, params.center_y, radius_x, radius_y);
    let outer = outer_seed.shifted_y(-clamp01(params.outer_lift) * outer_seed.radius_y);

    let outer_share = clamp_range(
        (density - 0.63).mul_add(0.25, NOMINAL_OUTER_SHARE) + rng.symmetric(0.04),
        OUTER_SHARE_MIN,
        OUTER_SHARE_MAX,
    );
    let outer_count = ((flower_count as f64 * outer_share).round() as usize).max(MIN_RING_COUNT);
    let inner_count = flower_count
        .saturating_sub(outer_count)
        .max(MIN_RING_COUNT);

    let inner_scale = clamp_range(
        lerp(INNER_SCALE_MAX, INNER_SCALE_MIN, density_t),
        INNER_SCALE_MIN,
        INNER_SCALE_MAX,
    );
    let inner_lift = (clamp01(params.inner_lift) + rng.symmetric(0.06)).max(0.0) * outer.radius_y;
    let inner = outer.scaled(inner_scale).shifted_y(-inner_lift);

    let total_area = (outer.area() + inner.area()).max(1.0);
    let spacing = (total_area / flower_count as f64).sqrt();

    let min_gap = spacing * lerp(0.9, 0.55, density_t);
    let radial_jitter = NearFarTail {
        min: spacing * lerp(0.04, 0.12, dispersion),
        max: spacing * lerp(0.3, 1.05, dispersion) * lerp(1.0, 0.85, t) * lerp(1.1, 0.9, density_t),
        near_power: lerp(2.4, 1.4, dispersion),
        far_probability: lerp(0.04, 0.12, dispersion),
    };
    let vertical_jitter = outer.radius_y * lerp(0.03, 0.2, dispersion);
    let tangential_jitter = spacing * lerp(0.12, 0.4, dispersion);
    let size_min = spacing * lerp(0.95, 1.15, density_t) * lerp(1.05, 0.92, t);
    let size_max = size_min * lerp(1.2, 1.55, dispersion);

    BouquetLayout {
        flower_count,
        density,
        outer,
        inner,
        outer_share,
        outer_count,
        inner_count,
        inner_scale,
        spacing,
        min_gap,
        radial_jitter,
        vertical_jitter,
        tangential_jitter,
        size_min,
        size_max,
    }
}
