//! Mathematical utilities for seeded randomness and interpolation

/// Scalar interpolation and clamping helpers
pub mod interpolation;
/// Seeded 32-bit pseudo-random stream
pub mod random;
/// Shaped random draws for jitter and angle selection
pub mod sampling;
