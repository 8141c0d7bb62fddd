//! Deterministic 32-bit pseudo-random stream used by every stochastic stage
//!
//! The generator keeps a single `u32` of state. Each draw advances the state by a
//! fixed odd constant and scrambles it with two xor-shift/odd-multiplier rounds,
//! so the output depends only on wrapping 32-bit integer arithmetic and is
//! bit-identical on every platform.

use rand::rand_core::{RngCore, SeedableRng, impls};

/// Additive increment applied to the state before every draw
pub const STATE_INCREMENT: u32 = 0x6D2B_79F5;

const INV_2_POW_32: f64 = 1.0 / 4_294_967_296.0;

/// Reproducible stream of floats in `[0, 1)` bound to one seed
///
/// A stream is owned by whichever stage created it and is never shared between
/// compositions. Cloning a stream forks it: both copies replay the same sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededRandom {
    state: u32,
}

impl SeededRandom {
    /// Create a stream from an integer seed
    pub const fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Create a stream from a base seed mixed with a fixed stage constant
    ///
    /// Stages derive their own stream this way so that two stages fed the same
    /// preset seed never consume the same sequence.
    pub const fn derived(seed: u32, salt: u32) -> Self {
        Self::new(seed ^ salt)
    }

    /// Advance the state and return the next scrambled 32-bit word
    pub const fn next_word(&mut self) -> u32 {
        self.state = self.state.wrapping_add(STATE_INCREMENT);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    /// Next float in `[0, 1)`
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_word()) * INV_2_POW_32
    }

    /// Uniform float in `[min, max)`
    pub fn range(&mut self, min: f64, max: f64) -> f64 {
        (max - min).mul_add(self.next_f64(), min)
    }

    /// Uniform float in `[-amplitude, amplitude)`
    pub fn symmetric(&mut self, amplitude: f64) -> f64 {
        (self.next_f64() - 0.5) * 2.0 * amplitude
    }

    /// Uniform index in `0..len`, or 0 when `len` is 0
    pub fn index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        ((self.next_f64() * len as f64) as usize).min(len - 1)
    }

    /// Returns `true` with the given probability
    pub fn chance(&mut self, probability: f64) -> bool {
        self.next_f64() < probability
    }

    /// In-place Fisher-Yates shuffle driven by this stream
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.index(i + 1);
            items.swap(i, j);
        }
    }

    /// Current internal state (the value the next draw will advance from)
    pub const fn state(&self) -> u32 {
        self.state
    }
}

impl RngCore for SeededRandom {
    fn next_u32(&mut self) -> u32 {
        self.next_word()
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        impls::fill_bytes_via_next(self, dst);
    }
}

impl SeedableRng for SeededRandom {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }

    fn seed_from_u64(state: u64) -> Self {
        Self::new(state as u32)
    }
}
