//! Tests for progressive-reveal budgets, frame rendering and GIF export

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};
    use pixelbloom::MosaicError;
    use pixelbloom::algorithm::compositor::{CanvasSize, Composition, Compositor};
    use pixelbloom::color::Palette;
    use pixelbloom::io::configuration::VIEWER_MIN_FRAME_DELAY_MS;
    use pixelbloom::io::visualization::RevealCapture;
    use pixelbloom::presets::preset::Preset;
    use pixelbloom::spatial::arrangement::ArrangementTuning;
    use pixelbloom::spatial::sprites::SpriteSet;
    use tempfile::TempDir;

    fn build(source: &RgbaImage, reshuffle_every: u32) -> Composition {
        let compositor = Compositor::new(
            Palette::default(),
            CanvasSize {
                width: 48,
                height: 48,
            },
            ArrangementTuning::default(),
        );
        let preset = Preset {
            pixel_size: 2,
            reshuffle_every,
            bouquet: None,
            ..Preset::default()
        };
        compositor.build(&preset, source, &SpriteSet::default())
    }

    fn gradient() -> RgbaImage {
        RgbaImage::from_fn(24, 24, |x, y| Rgba([(x * 10) as u8, (y * 10) as u8, 220, 255]))
    }

    // Tests budgets grow to the cap on the last frame
    // Verified by dividing by frames + 1
    #[test]
    fn test_budget_schedule() {
        let capture = RevealCapture {
            frame_count: 4,
            frame_delay_ms: 10,
        };
        let budgets: Vec<usize> = (0..4).map(|f| capture.budget_at(f, 10)).collect();
        assert_eq!(budgets, vec![3, 5, 8, 10]);
        assert_eq!(capture.budget_at(99, 10), 10);
        assert_eq!(capture.effective_delay_ms(), VIEWER_MIN_FRAME_DELAY_MS);
    }

    // Tests coverage never shrinks across frames without reshuffling
    // Verified by rendering each frame from a fresh shuffle
    #[test]
    fn test_reveal_monotonic() {
        let composition = build(&gradient(), 0);
        let background = Palette::default().background();
        let frames = RevealCapture {
            frame_count: 5,
            frame_delay_ms: 80,
        }
        .render(&composition, background);

        assert_eq!(frames.len(), 5);
        let mut previous = 0;
        for frame in &frames {
            let covered = frame.pixels().filter(|p| p.0[..3] != background).count();
            assert!(covered >= previous);
            previous = covered;
        }
        assert_eq!(previous, composition.cells.len() * 4);
    }

    // Tests the GIF is written with every frame
    // Verified by encoding only the last frame
    #[test]
    fn test_export_gif() {
        let temp_dir = TempDir::new().expect("temp dir");
        let path = temp_dir.path().join("reveal").join("bloom.gif");
        let composition = build(&gradient(), 2);
        RevealCapture {
            frame_count: 3,
            frame_delay_ms: 60,
        }
        .export_gif(&composition, Palette::default().background(), &path)
        .expect("gif written");

        let file = std::fs::File::open(&path).expect("gif exists");
        let decoder = image::codecs::gif::GifDecoder::new(std::io::BufReader::new(file))
            .expect("valid gif");
        let frames = image::AnimationDecoder::into_frames(decoder)
            .collect_frames()
            .expect("frames decode");
        assert_eq!(frames.len(), 3);
    }

    // Tests an empty composition is refused
    // Verified by exporting a blank animation
    #[test]
    fn test_export_empty_rejected() {
        let temp_dir = TempDir::new().expect("temp dir");
        let background = Palette::default().background();
        let dark = RgbaImage::from_pixel(8, 8, Rgba([background[0], background[1], background[2], 255]));
        let composition = build(&dark, 0);
        assert!(composition.order.is_empty());
        let result = RevealCapture {
            frame_count: 2,
            frame_delay_ms: 50,
        }
        .export_gif(&composition, background, &temp_dir.path().join("empty.gif"));
        assert!(matches!(result, Err(MosaicError::InvalidParameter { .. })));
    }
}
