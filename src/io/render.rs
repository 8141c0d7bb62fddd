//! Reference renderer: turns admitted draw cells into filled shapes
//!
//! The core only hands over a draw order, a raster and a budget; this module
//! is the collaborator that realizes them as `pixel_size` squares or circles on
//! an output image, used for PNG and GIF export.

use image::{Rgba, RgbaImage};

use crate::algorithm::budget::allocate_layer_budgets;
use crate::algorithm::compositor::Composition;
use crate::algorithm::draw_order::admitted;
use crate::color::Rgb;
use crate::spatial::ellipse::ArrangementGuide;

/// Primitive used for one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellShape {
    /// Filled square of side `pixel_size`
    Rect,
    /// Filled circle of diameter `pixel_size`
    Ellipse,
}

impl CellShape {
    /// Shape selected by a draw-as-rectangles flag
    pub const fn from_rects_flag(draw_as_rects: bool) -> Self {
        if draw_as_rects { Self::Rect } else { Self::Ellipse }
    }
}

/// Blank output image filled with the background color
pub fn blank(width: u32, height: u32, background: Rgb) -> RgbaImage {
    RgbaImage::from_pixel(
        width.max(1),
        height.max(1),
        Rgba([background[0], background[1], background[2], 255]),
    )
}

/// Paint the first `min(budget, order.len())` cells; returns how many were painted
///
/// `order` holds linear indices into `raster`. Cells falling outside `target`
/// are clipped.
pub fn paint_cells(
    target: &mut RgbaImage,
    raster: &RgbaImage,
    order: &[usize],
    budget: usize,
    pixel_size: u32,
    shape: CellShape,
) -> usize {
    let width = raster.width() as usize;
    if width == 0 {
        return 0;
    }
    let pixel_size = pixel_size.max(1);
    let mut painted = 0;

    for &index in admitted(order, budget) {
        let x = (index % width) as u32;
        let y = (index / width) as u32;
        let Some(color) = raster.get_pixel_checked(x, y).copied() else {
            continue;
        };
        fill_cell(target, x * pixel_size, y * pixel_size, pixel_size, shape, color);
        painted += 1;
    }

    painted
}

fn fill_cell(
    target: &mut RgbaImage,
    left: u32,
    top: u32,
    side: u32,
    shape: CellShape,
    color: Rgba<u8>,
) {
    let radius = f64::from(side) / 2.0;
    for dy in 0..side {
        for dx in 0..side {
            if shape == CellShape::Ellipse {
                let ox = f64::from(dx) + 0.5 - radius;
                let oy = f64::from(dy) + 0.5 - radius;
                if ox.hypot(oy) > radius {
                    continue;
                }
            }
            if let Some(pixel) = target.get_pixel_mut_checked(left + dx, top + dy) {
                *pixel = color;
            }
        }
    }
}

/// Render one frame of a composition at its output size
pub fn render_frame(composition: &Composition, frame: u64, background: Rgb) -> RgbaImage {
    let (width, height) = composition.output_size();
    let mut target = blank(width, height, background);
    let order = composition.order_for_frame(frame);
    paint_cells(
        &mut target,
        &composition.raster,
        &order,
        composition.preset.max_cells,
        composition.pixel_size,
        CellShape::from_rects_flag(composition.preset.draw_as_rects),
    );
    target
}

/// Render a background composition with foreground layers sharing one budget
///
/// Layers are painted in order, background first; each receives its share of
/// `total_budget` from [`allocate_layer_budgets`]. The output takes the size of
/// the background layer.
pub fn render_layers(
    layers: &[&Composition],
    total_budget: usize,
    min_coverage: f64,
    frame: u64,
    background: Rgb,
) -> RgbaImage {
    let Some(base) = layers.first() else {
        return blank(1, 1, background);
    };
    let (width, height) = base.output_size();
    let mut target = blank(width, height, background);

    let sizes: Vec<usize> = layers.iter().map(|layer| layer.order.len()).collect();
    let budgets = allocate_layer_budgets(total_budget, &sizes, min_coverage);

    for (layer, budget) in layers.iter().zip(budgets) {
        let order = layer.order_for_frame(frame);
        paint_cells(
            &mut target,
            &layer.raster,
            &order,
            budget,
            layer.pixel_size,
            CellShape::from_rects_flag(layer.preset.draw_as_rects),
        );
    }

    target
}

/// Outline an arrangement guide ellipse on `target`
pub fn draw_guide(target: &mut RgbaImage, guide: &ArrangementGuide, color: Rgb) {
    let perimeter = (guide.radius_x + guide.radius_y) * std::f64::consts::PI;
    let steps = perimeter.ceil().max(16.0) as usize * 2;
    for step in 0..steps {
        let angle = std::f64::consts::TAU * step as f64 / steps as f64;
        let (x, y) = guide.point_at(angle);
        if x < 0.0 || y < 0.0 {
            continue;
        }
        if let Some(pixel) = target.get_pixel_mut_checked(x as u32, y as u32) {
            *pixel = Rgba([color[0], color[1], color[2], 255]);
        }
    }
}

/// Outline both guides of a composition's arrangement, if it has one
pub fn draw_guides(target: &mut RgbaImage, composition: &Composition, color: Rgb) {
    if let Some(arrangement) = &composition.arrangement {
        draw_guide(target, &arrangement.outer, color);
        draw_guide(target, &arrangement.inner, color);
    }
}
