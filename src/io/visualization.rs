//! Progressive-reveal frame capture and GIF generation

use std::path::Path;

use image::{Delay, Frame, RgbaImage};

use crate::algorithm::compositor::Composition;
use crate::color::Rgb;
use crate::io::configuration::VIEWER_MIN_FRAME_DELAY_MS;
use crate::io::error::{MosaicError, Result};
use crate::io::image::ensure_parent;
use crate::io::render::{CellShape, blank, paint_cells};

/// How many frames to render and how long each is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealCapture {
    /// Frames in the animation, the last one showing the full budget
    pub frame_count: usize,
    /// Requested delay between frames
    pub frame_delay_ms: u32,
}

impl RevealCapture {
    /// Budget realized at `frame` (0-based), growing linearly to the cap
    ///
    /// The cap is `min(max_cells, drawable cells)`; the last frame reaches it.
    pub fn budget_at(&self, frame: usize, cap: usize) -> usize {
        let frames = self.frame_count.max(1);
        let step = frame.min(frames - 1) + 1;
        cap.saturating_mul(step).div_ceil(frames)
    }

    /// Delay actually written, raised to what viewers support
    pub fn effective_delay_ms(&self) -> u32 {
        self.frame_delay_ms.max(VIEWER_MIN_FRAME_DELAY_MS)
    }

    /// Render every frame of the reveal
    ///
    /// Frame `i` uses the composition's draw order for frame `i`, so a
    /// reshuffle policy changes which cells appear as the budget grows.
    pub fn render(&self, composition: &Composition, background: Rgb) -> Vec<RgbaImage> {
        let (width, height) = composition.output_size();
        let cap = composition.preset.max_cells.min(composition.order.len());
        let shape = CellShape::from_rects_flag(composition.preset.draw_as_rects);

        (0..self.frame_count.max(1))
            .map(|frame| {
                let mut target = blank(width, height, background);
                let order = composition.order_for_frame(frame as u64);
                paint_cells(
                    &mut target,
                    &composition.raster,
                    &order,
                    self.budget_at(frame, cap),
                    composition.pixel_size,
                    shape,
                );
                target
            })
            .collect()
    }

    /// Render and encode the reveal as an animated GIF
    ///
    /// The final frame is held longer so the finished mosaic stays visible.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The composition has nothing to draw
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(
        &self,
        composition: &Composition,
        background: Rgb,
        output_path: &Path,
    ) -> Result<()> {
        if composition.order.is_empty() {
            return Err(MosaicError::InvalidParameter {
                parameter: "composition",
                value: composition.preset.name.clone(),
                reason: "no drawable cells to reveal".to_string(),
            });
        }

        let delay_ms = self.effective_delay_ms();
        let images = self.render(composition, background);
        let last = images.len().saturating_sub(1);
        let frames: Vec<Frame> = images
            .into_iter()
            .enumerate()
            .map(|(index, image)| {
                let hold = if index == last { delay_ms * 25 } else { delay_ms };
                Frame::from_parts(image, 0, 0, Delay::from_numer_denom_ms(hold, 1))
            })
            .collect();

        ensure_parent(output_path)?;
        let file = std::fs::File::create(output_path).map_err(|e| MosaicError::FileSystem {
            path: output_path.to_path_buf(),
            operation: "create file",
            source: e,
        })?;

        let mut encoder = image::codecs::gif::GifEncoder::new(file);
        encoder
            .encode_frames(frames)
            .map_err(|e| MosaicError::ImageExport {
                path: output_path.to_path_buf(),
                source: e,
            })
    }
}
