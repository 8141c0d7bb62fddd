//! Sprite sets, rotated alpha compositing and procedural flower sprites

use std::f64::consts::{FRAC_1_SQRT_2, PI};

use image::{Rgba, RgbaImage};

use crate::color::Palette;
use crate::math::interpolation::lerp;
use crate::math::random::SeededRandom;
use crate::spatial::arrangement::ArrangementPoint;

/// Side length of generated flower sprites
pub const PROCEDURAL_SPRITE_SIZE: u32 = 48;

/// Number of generated flower sprites when none are loaded
pub const PROCEDURAL_SPRITE_COUNT: usize = 5;

/// Salt mixed into the preset seed for procedural sprites
pub const SPRITE_SEED_SALT: u32 = 0x0F10_3E55;

/// Ordered collection of sprite images
///
/// Arrangement points refer to sprites by index; indices wrap modulo the number
/// of sprites actually loaded, so missing sprites never invalidate a placement.
#[derive(Debug, Clone, Default)]
pub struct SpriteSet {
    sprites: Vec<RgbaImage>,
}

impl SpriteSet {
    /// Wrap loaded sprites, dropping any with a zero dimension
    pub fn new(sprites: Vec<RgbaImage>) -> Self {
        Self {
            sprites: sprites
                .into_iter()
                .filter(|s| s.width() > 0 && s.height() > 0)
                .collect(),
        }
    }

    /// Number of usable sprites
    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    /// Whether no sprite is usable
    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    /// Sprite for a placement index, wrapping modulo the set size
    pub fn wrapped(&self, index: usize) -> Option<&RgbaImage> {
        if self.sprites.is_empty() {
            return None;
        }
        self.sprites.get(index % self.sprites.len())
    }
}

/// Draw every point back-to-front; returns how many sprites were drawn
///
/// `points` must already be in draw order (ascending depth).
pub fn composite_arrangement(
    canvas: &mut RgbaImage,
    points: &[ArrangementPoint],
    sprites: &SpriteSet,
) -> usize {
    let mut drawn = 0;
    for point in points {
        if let Some(sprite) = sprites.wrapped(point.sprite_index) {
            composite_sprite(canvas, sprite, point.x, point.y, point.size, point.rotation);
            drawn += 1;
        }
    }
    drawn
}

/// Alpha-blend `sprite` centered at `(center_x, center_y)`
///
/// The sprite is scaled so its longest side equals `size` and rotated by
/// `rotation` radians, sampling the source with nearest-neighbor inverse mapping.
pub fn composite_sprite(
    canvas: &mut RgbaImage,
    sprite: &RgbaImage,
    center_x: f64,
    center_y: f64,
    size: f64,
    rotation: f64,
) {
    let longest = f64::from(sprite.width().max(sprite.height()));
    if longest <= 0.0 || !size.is_finite() || size <= 0.0 {
        return;
    }
    let scale = size / longest;
    let reach = size * FRAC_1_SQRT_2 + 1.0;
    let (sin, cos) = (-rotation).sin_cos();
    let half_w = f64::from(sprite.width()) / 2.0;
    let half_h = f64::from(sprite.height()) / 2.0;

    let x_start = (center_x - reach).floor().max(0.0) as u32;
    let y_start = (center_y - reach).floor().max(0.0) as u32;
    let x_end = ((center_x + reach).ceil().max(0.0) as u32).min(canvas.width());
    let y_end = ((center_y + reach).ceil().max(0.0) as u32).min(canvas.height());

    for y in y_start..y_end {
        for x in x_start..x_end {
            let dx = f64::from(x) + 0.5 - center_x;
            let dy = f64::from(y) + 0.5 - center_y;
            let local_x = dx.mul_add(cos, -dy * sin) / scale + half_w;
            let local_y = dx.mul_add(sin, dy * cos) / scale + half_h;
            if local_x < 0.0 || local_y < 0.0 {
                continue;
            }
            let Some(source) = sprite.get_pixel_checked(local_x as u32, local_y as u32) else {
                continue;
            };
            if source.0[3] == 0 {
                continue;
            }
            let target = canvas.get_pixel_mut(x, y);
            *target = blend(*target, *source);
        }
    }
}

/// Source-over blend of `top` onto `bottom`
pub fn blend(bottom: Rgba<u8>, top: Rgba<u8>) -> Rgba<u8> {
    let alpha = f32::from(top.0[3]) / 255.0;
    let under = f32::from(bottom.0[3]) / 255.0;
    let out_alpha = alpha + under * (1.0 - alpha);
    if out_alpha <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }
    let mut out = [0u8; 4];
    for ((value, &over), &base) in out.iter_mut().zip(&top.0).zip(&bottom.0).take(3) {
        let t = f32::from(over) * alpha;
        let b = f32::from(base) * under * (1.0 - alpha);
        *value = ((t + b) / out_alpha).round().clamp(0.0, 255.0) as u8;
    }
    out[3] = (out_alpha * 255.0).round().clamp(0.0, 255.0) as u8;
    Rgba(out)
}

/// Generate a deterministic set of petal-flower sprites from `seed`
///
/// Petal and heart colors come from the non-background palette entries so the
/// flowers survive quantization.
pub fn procedural_flowers(seed: u32, count: usize, palette: &Palette) -> SpriteSet {
    let mut rng = SeededRandom::derived(seed, SPRITE_SEED_SALT);
    let colors: Vec<_> = if palette.len() > 1 {
        palette.colors().iter().skip(1).copied().collect()
    } else {
        palette.colors().to_vec()
    };

    let sprites = (0..count)
        .map(|_| {
            let petals = 5 + rng.index(4);
            let phase = rng.next_f64() * PI;
            let roundness = rng.range(0.25, 0.45);
            let petal = colors.get(rng.index(colors.len())).copied().unwrap_or([255; 3]);
            let heart = colors.get(rng.index(colors.len())).copied().unwrap_or([0; 3]);
            flower_sprite(PROCEDURAL_SPRITE_SIZE, petals, phase, roundness, petal, heart)
        })
        .collect();

    SpriteSet::new(sprites)
}

fn flower_sprite(
    side: u32,
    petals: usize,
    phase: f64,
    roundness: f64,
    petal: [u8; 3],
    heart: [u8; 3],
) -> RgbaImage {
    let center = f64::from(side) / 2.0;
    let outer = center - 1.0;
    let heart_radius = outer * 0.24;
    let lobes = petals as f64;

    RgbaImage::from_fn(side, side, |x, y| {
        let dx = f64::from(x) + 0.5 - center;
        let dy = f64::from(y) + 0.5 - center;
        let radius = dx.hypot(dy);
        let theta = dy.atan2(dx);
        let edge = outer * lerp(roundness, 1.0, (0.5 * lobes).mul_add(theta, phase).cos().abs());

        if radius <= heart_radius {
            Rgba([heart[0], heart[1], heart[2], 255])
        } else if radius <= edge {
            Rgba([petal[0], petal[1], petal[2], 255])
        } else {
            Rgba([0, 0, 0, 0])
        }
    })
}
