//! Scalar interpolation helpers shared by the arrangement and preset stages

use num_traits::Float;

/// Sprite count at which count-normalized interpolation reaches 0
pub const COUNT_NORMALIZATION_MIN: f64 = 6.0;

/// Sprite count at which count-normalized interpolation reaches 1
pub const COUNT_NORMALIZATION_MAX: f64 = 120.0;

/// Linear interpolation between `a` and `b`
///
/// `t` is not clamped; callers pass normalized values.
pub fn lerp<T: Float>(a: T, b: T, t: T) -> T {
    (b - a).mul_add(t, a)
}

/// Position of `value` inside `[a, b]` as a fraction, clamped to `[0, 1]`
///
/// A degenerate interval maps everything to 0.
pub fn inverse_lerp<T: Float>(a: T, b: T, value: T) -> T {
    let span = b - a;
    if span.abs() <= T::epsilon() {
        return T::zero();
    }
    clamp01((value - a) / span)
}

/// Clamp to the unit interval, mapping NaN to 0
pub fn clamp01<T: Float>(value: T) -> T {
    if value.is_nan() {
        return T::zero();
    }
    value.max(T::zero()).min(T::one())
}

/// Clamp to `[min, max]`, mapping NaN to `min`
pub fn clamp_range<T: Float>(value: T, min: T, max: T) -> T {
    if value.is_nan() {
        return min;
    }
    value.max(min).min(max)
}

/// Normalize a sprite count onto `[0, 1]`
///
/// Small bouquets sit near 0 and very large ones saturate at 1; every
/// count-dependent knob in the arrangement interpolates along this value.
pub fn count_fraction(count: usize) -> f64 {
    inverse_lerp(
        COUNT_NORMALIZATION_MIN,
        COUNT_NORMALIZATION_MAX,
        count as f64,
    )
}

/// Hermite smoothstep of `t` clamped to `[0, 1]`
pub fn smoothstep<T: Float>(t: T) -> T {
    let t = clamp01(t);
    let two = T::one() + T::one();
    let three = two + T::one();
    t * t * (three - two * t)
}
