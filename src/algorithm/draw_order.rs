//! Drawable cells and their budgeted, shuffled presentation order
//!
//! The drawable set is computed once from the dithered raster and never
//! changes; only the order in which cells are realized and how many of them a
//! frame admits vary.

use std::borrow::Cow;

use bitvec::vec::BitVec;
use image::RgbaImage;

use crate::color::{Palette, Rgb};
use crate::math::random::SeededRandom;

/// Salt mixed into the preset seed for the base shuffle
pub const SHUFFLE_SEED_SALT: u32 = 0x5EED_0D3E;

/// Odd multiplier spreading frame counts across the seed space
pub const FRAME_SEED_MULTIPLIER: u32 = 0x85EB_CA6B;

/// One drawable pixel of the working raster
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawCell {
    /// Linear pixel index (`y * width + x`)
    pub index: usize,
    /// Quantized color
    pub rgb: Rgb,
}

/// Every non-background pixel of a dithered raster, in scan order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawCells {
    width: u32,
    height: u32,
    cells: Vec<DrawCell>,
    mask: BitVec,
}

impl DrawCells {
    /// Collect every pixel whose color is not the palette background
    pub fn scan(raster: &RgbaImage, palette: &Palette) -> Self {
        let width = raster.width();
        let height = raster.height();
        let mut mask = BitVec::repeat(false, width as usize * height as usize);
        let mut cells = Vec::new();

        for (x, y, pixel) in raster.enumerate_pixels() {
            let rgb = [pixel.0[0], pixel.0[1], pixel.0[2]];
            if palette.is_background(rgb) {
                continue;
            }
            let index = y as usize * width as usize + x as usize;
            mask.set(index, true);
            cells.push(DrawCell { index, rgb });
        }

        Self {
            width,
            height,
            cells,
            mask,
        }
    }

    /// Drawable cells in scan order
    pub fn cells(&self) -> &[DrawCell] {
        &self.cells
    }

    /// Number of drawable cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether nothing is drawable
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Grid width the indices refer to
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Grid height the indices refer to
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Occupancy mask over the whole grid, one bit per pixel
    pub fn mask(&self) -> &BitVec {
        &self.mask
    }

    /// Whether the pixel at `(x, y)` is drawable
    pub fn is_drawable(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let index = y as usize * self.width as usize + x as usize;
        self.mask.get(index).is_some_and(|bit| *bit)
    }

    /// Grid position of a linear index
    pub const fn position(&self, index: usize) -> (u32, u32) {
        if self.width == 0 {
            return (0, 0);
        }
        (
            (index % self.width as usize) as u32,
            (index / self.width as usize) as u32,
        )
    }

    fn indices(&self) -> Vec<usize> {
        self.cells.iter().map(|cell| cell.index).collect()
    }
}

/// Shuffled presentation order of a composition's drawable cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawOrder {
    seed: u32,
    scan: Vec<usize>,
    base: Vec<usize>,
}

impl DrawOrder {
    /// Shuffle the drawable cells once with a stream derived from `seed`
    pub fn new(cells: &DrawCells, seed: u32) -> Self {
        let scan = cells.indices();
        let base = shuffled(&scan, SeededRandom::derived(seed, SHUFFLE_SEED_SALT));
        Self { seed, scan, base }
    }

    /// The base order (linear pixel indices)
    pub fn base(&self) -> &[usize] {
        &self.base
    }

    /// Number of cells in every order
    pub fn len(&self) -> usize {
        self.base.len()
    }

    /// Whether there is nothing to draw
    pub fn is_empty(&self) -> bool {
        self.base.is_empty()
    }

    /// Order to present at `frame` under a reshuffle-every-N-frames policy
    ///
    /// `reshuffle_every == 0` never reshuffles. Otherwise every frame in the same
    /// epoch of N frames gets the same order, seeded from the base seed and the
    /// frame count that started the epoch; the first epoch uses the base order.
    /// The result is a pure function of `(seed, frame, reshuffle_every)`.
    pub fn for_frame(&self, frame: u64, reshuffle_every: u32) -> Cow<'_, [usize]> {
        match epoch_start(frame, reshuffle_every) {
            Some(start) if start > 0 => Cow::Owned(shuffled(
                &self.scan,
                SeededRandom::derived(frame_seed(self.seed, start), SHUFFLE_SEED_SALT),
            )),
            _ => Cow::Borrowed(&self.base),
        }
    }
}

/// First frame of the reshuffle epoch containing `frame`, if reshuffling is on
pub const fn epoch_start(frame: u64, reshuffle_every: u32) -> Option<u64> {
    if reshuffle_every == 0 {
        return None;
    }
    let every = reshuffle_every as u64;
    Some(frame / every * every)
}

/// Seed for the order shown from `frame` onwards
pub const fn frame_seed(seed: u32, frame: u64) -> u32 {
    seed.wrapping_add((frame as u32).wrapping_mul(FRAME_SEED_MULTIPLIER))
}

/// The leading `min(budget, order.len())` cells a renderer may realize
pub fn admitted(order: &[usize], budget: usize) -> &[usize] {
    order.get(..budget.min(order.len())).unwrap_or(order)
}

fn shuffled(indices: &[usize], mut rng: SeededRandom) -> Vec<usize> {
    let mut order = indices.to_vec();
    rng.shuffle(&mut order);
    order
}
