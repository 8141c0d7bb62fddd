//! Tests for palette construction, nearest-color lookup and serialization

#[cfg(test)]
mod tests {
    use pixelbloom::color::Palette;
    use pixelbloom::color::palette::{DEFAULT_PALETTE, squared_distance};

    // Tests an empty palette is rejected
    // Verified by accepting any vector
    #[test]
    fn test_empty_palette_rejected() {
        assert!(Palette::new(Vec::new()).is_err());
        assert!(Palette::try_from(Vec::<[u8; 3]>::new()).is_err());
    }

    // Tests nearest lookup picks the closest entry
    // Verified by using Manhattan distance
    #[test]
    fn test_nearest() {
        let palette = Palette::new(vec![[0, 0, 0], [255, 255, 255], [255, 0, 0]])
            .expect("valid palette");
        assert_eq!(palette.nearest_index([20, 10, 5]), 0);
        assert_eq!(palette.nearest_index([240, 250, 230]), 1);
        assert_eq!(palette.nearest_index([200, 30, 40]), 2);
        assert_eq!(palette.nearest([200, 30, 40]), [255, 0, 0]);
    }

    // Tests ties resolve to the earliest entry
    // Verified by using <= in the comparison
    #[test]
    fn test_tie_breaks_to_first() {
        let palette = Palette::new(vec![[0, 0, 0], [255, 255, 255]]).expect("valid palette");
        assert_eq!(squared_distance([127, 127, 127], [0, 0, 0]), 3 * 127 * 127);
        assert_eq!(palette.nearest_index([128, 128, 128]), 1);
        let mid = Palette::new(vec![[0, 0, 0], [2, 2, 2]]).expect("valid palette");
        assert_eq!(mid.nearest_index([1, 1, 1]), 0);
        assert_eq!(mid.nearest_index_f32([1.0, 1.0, 1.0]), 0);
    }

    // Tests the float lookup tolerates out-of-range accumulated values
    // Verified by casting negatives to u8 before lookup
    #[test]
    fn test_nearest_f32_out_of_range() {
        let palette = Palette::new(vec![[0, 0, 0], [255, 255, 255]]).expect("valid palette");
        assert_eq!(palette.nearest_index_f32([-40.0, -10.0, -3.0]), 0);
        assert_eq!(palette.nearest_index_f32([300.0, 280.0, 260.0]), 1);
    }

    // Tests the background is entry 0
    // Verified by returning the last entry
    #[test]
    fn test_background() {
        let palette = Palette::default();
        assert_eq!(palette.len(), DEFAULT_PALETTE.len());
        assert_eq!(palette.background(), DEFAULT_PALETTE[0]);
        assert!(palette.is_background(DEFAULT_PALETTE[0]));
        assert!(!palette.is_background(DEFAULT_PALETTE[1]));
        assert!(!palette.is_empty());
        assert_eq!(palette.get(99), None);
    }

    // Tests palettes serialize as plain color arrays and reject empty lists
    // Verified by serializing the wrapper struct
    #[test]
    fn test_serde_shape() {
        let palette = Palette::new(vec![[1, 2, 3], [4, 5, 6]]).expect("valid palette");
        let json = serde_json::to_string(&palette).expect("serializable");
        assert_eq!(json, "[[1,2,3],[4,5,6]]");
        let back: Palette = serde_json::from_str(&json).expect("deserializable");
        assert_eq!(back, palette);
        assert!(serde_json::from_str::<Palette>("[]").is_err());
    }
}
