//! Shaped random draws used by the sprite placement sampler

use std::f64::consts::PI;

use crate::math::interpolation::lerp;
use crate::math::random::SeededRandom;

/// Narrowest band of the range that the far tail draws from
pub const FAR_TAIL_MIN_WIDTH: f64 = 0.18;

/// Widest band of the range that the far tail draws from
pub const FAR_TAIL_MAX_WIDTH: f64 = 0.28;

/// Shape of a mostly-near, occasionally-far magnitude distribution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearFarTail {
    /// Smallest magnitude returned
    pub min: f64,
    /// Largest magnitude returned
    pub max: f64,
    /// Exponent applied to the uniform draw; larger values crowd toward `min`
    pub near_power: f64,
    /// Probability of drawing from the far band instead
    pub far_probability: f64,
}

impl NearFarTail {
    /// Draw one magnitude in `[min, max]`
    ///
    /// Usually `rand^near_power` mapped into the range, which piles values up
    /// near `min`. With probability `far_probability` the fraction instead comes
    /// from the top band of the range, whose width is itself uniform in
    /// `[FAR_TAIL_MIN_WIDTH, FAR_TAIL_MAX_WIDTH]`.
    pub fn sample(&self, rng: &mut SeededRandom) -> f64 {
        let (lo, hi) = if self.min <= self.max {
            (self.min, self.max)
        } else {
            (self.max, self.min)
        };

        let fraction = if rng.chance(self.far_probability) {
            let band = rng.range(FAR_TAIL_MIN_WIDTH, FAR_TAIL_MAX_WIDTH);
            1.0 - rng.next_f64() * band
        } else {
            rng.next_f64().powf(self.near_power.max(f64::EPSILON))
        };

        lerp(lo, hi, fraction)
    }
}

/// Pick an angle on the ellipse, biased toward the front (viewer-facing) half
///
/// The front half is `(0, PI)`, where `sin(angle) > 0` and points sit below the
/// ellipse center on screen.
pub fn front_biased_angle(rng: &mut SeededRandom, front_bias: f64) -> f64 {
    if rng.chance(front_bias) {
        rng.next_f64() * PI
    } else {
        rng.next_f64().mul_add(PI, PI)
    }
}
