//! Floyd-Steinberg error diffusion against a fixed palette
//!
//! Each color channel gets its own floating-point working buffer so quantization
//! error never leaks into alpha. Pixels are visited row-major, left to right and
//! top to bottom, and every quantization depends on the error already diffused
//! into it, so the scan is strictly sequential.
//!
//! ```text
//!        X   7
//!    3   5   1      (/16)
//! ```
//!
//! Shares that would land outside the raster are dropped, not wrapped.

use image::RgbaImage;
use ndarray::Array2;

use crate::color::Palette;

/// Error diffusion targets as `(dx, dy, weight)`
pub const FLOYD_STEINBERG: [(isize, usize, f32); 4] = [
    (1, 0, 7.0 / 16.0),
    (-1, 1, 3.0 / 16.0),
    (0, 1, 5.0 / 16.0),
    (1, 1, 1.0 / 16.0),
];

/// Bookkeeping from one dithering pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DitherReport {
    /// Per-channel error whose diffusion target fell outside the raster
    pub dropped_error: [f64; 3],
    /// How many pixels were assigned to each palette entry
    pub palette_counts: Vec<usize>,
}

impl DitherReport {
    /// Number of pixels quantized to the background entry
    pub fn background_count(&self) -> usize {
        self.palette_counts.first().copied().unwrap_or(0)
    }
}

/// Dither `raster` in place; every output pixel becomes an opaque palette entry
pub fn dither(raster: &mut RgbaImage, palette: &Palette) {
    dither_with_report(raster, palette);
}

/// Dither `raster` in place and report where the error went
pub fn dither_with_report(raster: &mut RgbaImage, palette: &Palette) -> DitherReport {
    let width = raster.width() as usize;
    let height = raster.height() as usize;
    let mut report = DitherReport {
        dropped_error: [0.0; 3],
        palette_counts: vec![0; palette.len()],
    };
    if width == 0 || height == 0 {
        return report;
    }

    let mut channels: [Array2<f32>; 3] = [
        Array2::zeros((height, width)),
        Array2::zeros((height, width)),
        Array2::zeros((height, width)),
    ];
    for (x, y, pixel) in raster.enumerate_pixels() {
        for (channel, buffer) in channels.iter_mut().enumerate() {
            if let Some(value) = buffer.get_mut((y as usize, x as usize)) {
                *value = f32::from(pixel.0.get(channel).copied().unwrap_or(0));
            }
        }
    }

    for y in 0..height {
        for x in 0..width {
            let mut current = [0.0_f32; 3];
            for (value, buffer) in current.iter_mut().zip(&channels) {
                *value = buffer.get((y, x)).copied().unwrap_or(0.0);
            }
            let index = palette.nearest_index_f32(current);
            let chosen = palette.get(index).unwrap_or_else(|| palette.background());
            if let Some(count) = report.palette_counts.get_mut(index) {
                *count += 1;
            }

            let per_channel = channels
                .iter_mut()
                .zip(current.iter().zip(&chosen))
                .zip(report.dropped_error.iter_mut());
            for ((buffer, (&value, &target)), dropped) in per_channel {
                let target = f32::from(target);
                let error = value - target;
                if let Some(cell) = buffer.get_mut((y, x)) {
                    *cell = target;
                }
                for &(dx, dy, weight) in &FLOYD_STEINBERG {
                    let neighbor = x
                        .checked_add_signed(dx)
                        .filter(|&tx| tx < width)
                        .zip(Some(y + dy).filter(|&ty| ty < height));
                    match neighbor.and_then(|(tx, ty)| buffer.get_mut((ty, tx))) {
                        Some(cell) => *cell += error * weight,
                        None => *dropped += f64::from(error * weight),
                    }
                }
            }

            raster.put_pixel(
                x as u32,
                y as u32,
                image::Rgba([chosen[0], chosen[1], chosen[2], 255]),
            );
        }
    }

    report
}
