//! Tests for shaped draws: near/far tail magnitudes and front-biased angles

#[cfg(test)]
mod tests {
    use pixelbloom::math::random::SeededRandom;
    use pixelbloom::math::sampling::{FAR_TAIL_MAX_WIDTH, NearFarTail, front_biased_angle};
    use std::f64::consts::PI;

    // Tests magnitudes stay within [min, max], including reversed bounds
    // Verified by lerping past max in the far band
    #[test]
    fn test_tail_bounds() {
        let tail = NearFarTail {
            min: 2.0,
            max: 10.0,
            near_power: 2.0,
            far_probability: 0.3,
        };
        let reversed = NearFarTail {
            min: 10.0,
            max: 2.0,
            ..tail
        };
        let mut rng = SeededRandom::new(8);
        for _ in 0..5000 {
            let a = tail.sample(&mut rng);
            let b = reversed.sample(&mut rng);
            assert!((2.0..=10.0).contains(&a));
            assert!((2.0..=10.0).contains(&b));
        }
    }

    // Tests a pure far tail only lands in the top band
    // Verified by widening the band past its maximum
    #[test]
    fn test_far_band() {
        let tail = NearFarTail {
            min: 0.0,
            max: 1.0,
            near_power: 2.0,
            far_probability: 1.0,
        };
        let mut rng = SeededRandom::new(21);
        for _ in 0..2000 {
            assert!(tail.sample(&mut rng) >= 1.0 - FAR_TAIL_MAX_WIDTH - 1e-12);
        }
    }

    // Tests a strong near power crowds values toward min
    // Verified by inverting the exponent
    #[test]
    fn test_near_crowding() {
        let tail = NearFarTail {
            min: 0.0,
            max: 1.0,
            near_power: 3.0,
            far_probability: 0.0,
        };
        let mut rng = SeededRandom::new(4);
        let mean = (0..4000).map(|_| tail.sample(&mut rng)).sum::<f64>() / 4000.0;
        assert!(mean < 0.35, "mean {mean} should sit near the minimum");
    }

    // Tests the angle bias selects the front half at the requested rate
    // Verified by mapping front draws into the back half
    #[test]
    fn test_front_bias() {
        let mut rng = SeededRandom::new(77);
        let draws = 4000;
        let front = (0..draws)
            .map(|_| front_biased_angle(&mut rng, 0.8))
            .inspect(|angle| assert!((0.0..2.0 * PI).contains(angle)))
            .filter(|angle| *angle < PI)
            .count();
        let rate = front as f64 / f64::from(draws);
        assert!((rate - 0.8).abs() < 0.05, "front rate {rate}");

        let always = front_biased_angle(&mut rng, 1.0);
        assert!(always < PI && always.sin() >= 0.0);
    }
}
