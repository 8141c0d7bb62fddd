//! Tests for parameter ranges, range validation and override merging

#[cfg(test)]
mod tests {
    use pixelbloom::io::configuration::DEFAULT_FLOWER_COUNT_RANGE;
    use pixelbloom::math::random::SeededRandom;
    use pixelbloom::presets::ranges::{FixedOverrides, ParameterRange, PresetRanges};

    // Tests float samples stay in [min, max)
    // Verified by sampling from [0, max)
    #[test]
    fn test_sample_bounds() {
        let range = ParameterRange::new(-3.0, 4.0);
        let mut rng = SeededRandom::new(1);
        for _ in 0..2000 {
            let value = range.sample(&mut rng);
            assert!((-3.0..4.0).contains(&value));
        }
    }

    // Tests integer samples cover both endpoints inclusively
    // Verified by dropping the +1 on the upper bound
    #[test]
    fn test_sample_integer_inclusive() {
        let range = ParameterRange::new(2.0, 3.0);
        let mut rng = SeededRandom::new(6);
        let values: Vec<i64> = (0..400).map(|_| range.sample_integer(&mut rng)).collect();
        assert!(values.iter().all(|v| (2..=3).contains(v)));
        assert!(values.contains(&2));
        assert!(values.contains(&3));
    }

    // Tests reversed and non-finite ranges fail validation
    // Verified by only checking ordering
    #[test]
    fn test_validate() {
        assert!(ParameterRange::new(1.0, 2.0).validate("x").is_ok());
        assert!(ParameterRange::new(2.0, 1.0).validate("x").is_err());
        assert!(ParameterRange::new(f64::NAN, 1.0).validate("x").is_err());

        let ranges = PresetRanges {
            aspect: Some(ParameterRange::new(0.9, 0.1)),
            ..PresetRanges::default()
        };
        assert!(ranges.validate().is_err());
        assert!(PresetRanges::default().validate().is_ok());
    }

    // Tests unconfigured ranges fall back to the defaults
    // Verified by returning an empty range
    #[test]
    fn test_fallback() {
        let ranges = PresetRanges::default();
        assert!(ranges.configured().is_empty());
        assert_eq!(ranges.flower_count(), DEFAULT_FLOWER_COUNT_RANGE);

        let custom = PresetRanges {
            flower_count: Some(ParameterRange::new(10.0, 12.0)),
            ..PresetRanges::default()
        };
        assert_eq!(custom.flower_count(), ParameterRange::new(10.0, 12.0));
        assert_eq!(custom.configured().len(), 1);
    }

    // Tests the higher override set wins field by field
    // Verified by preferring the lower set
    #[test]
    fn test_merge_precedence() {
        let lower = FixedOverrides {
            brightness: Some(5),
            contrast: Some(10.0),
            ..FixedOverrides::default()
        };
        let higher = FixedOverrides {
            brightness: Some(-5),
            bouquet: Some(false),
            ..FixedOverrides::default()
        };
        let merged = lower.merged_with(&higher);
        assert_eq!(merged.brightness, Some(-5));
        assert_eq!(merged.contrast, Some(10.0));
        assert_eq!(merged.bouquet, Some(false));
    }
}
