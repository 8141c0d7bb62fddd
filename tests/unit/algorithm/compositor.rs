//! Tests for composition building: sizes, determinism, bouquet toggling and drawable cells

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};
    use pixelbloom::algorithm::compositor::{CanvasSize, Compositor};
    use pixelbloom::color::Palette;
    use pixelbloom::presets::preset::Preset;
    use pixelbloom::spatial::arrangement::ArrangementTuning;
    use pixelbloom::spatial::sprites::SpriteSet;

    fn compositor() -> Compositor {
        Compositor::new(
            Palette::default(),
            CanvasSize {
                width: 120,
                height: 160,
            },
            ArrangementTuning::default(),
        )
    }

    fn source() -> RgbaImage {
        RgbaImage::from_fn(60, 90, |x, y| Rgba([(x * 4) as u8, (y * 2) as u8, 120, 255]))
    }

    // Tests the working size divides the canvas by the pixel size
    // Verified by rounding up instead of down
    #[test]
    fn test_working_size() {
        let canvas = CanvasSize {
            width: 100,
            height: 50,
        };
        assert_eq!(canvas.working(3), (33, 16));
        assert_eq!(canvas.working(0), (100, 50));
        assert_eq!(canvas.working(1000), (1, 1));
    }

    // Tests composition sizes and cell bookkeeping
    // Verified by building the raster at canvas resolution
    #[test]
    fn test_build_sizes() {
        let preset = Preset {
            pixel_size: 4,
            ..Preset::default()
        };
        let composition = compositor().build(&preset, &source(), &SpriteSet::default());
        assert_eq!(composition.working_size(), (30, 40));
        assert_eq!(composition.output_size(), (120, 160));
        assert_eq!(composition.order.len(), composition.cells.len());
        assert_eq!(
            composition.dither.palette_counts.iter().sum::<usize>(),
            30 * 40
        );
        assert_eq!(
            composition.cells.len(),
            30 * 40 - composition.dither.background_count()
        );
    }

    // Tests the same preset and inputs build identical compositions
    // Verified by deriving the arrangement stream from the clock
    #[test]
    fn test_build_deterministic() {
        let preset = Preset::default();
        let a = compositor().build(&preset, &source(), &SpriteSet::default());
        let b = compositor().build(&preset, &source(), &SpriteSet::default());
        assert_eq!(a.raster, b.raster);
        assert_eq!(a.order, b.order);
        assert_eq!(a.arrangement, b.arrangement);
    }

    // Tests the bouquet is arranged and drawn only when enabled
    // Verified by always generating an arrangement
    #[test]
    fn test_bouquet_toggle() {
        let with = compositor().build(&Preset::default(), &source(), &SpriteSet::default());
        assert!(with.arrangement.is_some());
        assert!(with.sprites_drawn > 0);

        let without = Preset {
            bouquet: None,
            ..Preset::default()
        };
        let plain = compositor().build(&without, &source(), &SpriteSet::default());
        assert!(plain.arrangement.is_none());
        assert_eq!(plain.sprites_drawn, 0);
    }

    // Tests admitted cells respect the per-frame budget
    // Verified by ignoring max_cells
    #[test]
    fn test_admitted_budget() {
        let preset = Preset {
            max_cells: 25,
            ..Preset::default()
        };
        let composition = compositor().build(&preset, &source(), &SpriteSet::default());
        assert!(composition.cells.len() > 25);
        let admitted = composition.admitted_for_frame(0);
        assert_eq!(admitted.len(), 25);
        assert_eq!(admitted.as_slice(), &composition.order.base()[..25]);
    }
}
