//! Tests for the seeded random stream: known outputs, determinism and helpers

#[cfg(test)]
mod tests {
    use pixelbloom::math::random::{STATE_INCREMENT, SeededRandom};
    use rand::{RngCore, SeedableRng};

    // Tests the first words for fixed seeds match the reference stream
    // Verified by swapping the xor-shift amounts in the scrambler
    #[test]
    fn test_known_words_for_fixed_seeds() {
        let mut zero = SeededRandom::new(0);
        assert_eq!(zero.next_word(), 1_144_304_738);
        assert_eq!(zero.next_word(), 1_416_247);
        assert_eq!(zero.next_word(), 958_946_056);

        let mut answer = SeededRandom::new(42);
        assert_eq!(answer.next_word(), 2_581_720_956);
        assert_eq!(answer.next_word(), 1_925_393_290);
        assert_eq!(answer.next_word(), 3_661_312_704);
    }

    // Tests floats are the words scaled by 2^-32
    // Verified by dividing by u32::MAX instead
    #[test]
    fn test_next_f64_scaling() {
        let mut rng = SeededRandom::new(42);
        let expected = [0.601_103_751_920_163_6, 0.448_290_558_997_541_67, 0.852_465_793_490_409_9];
        for value in expected {
            let drawn = rng.next_f64();
            assert!((drawn - value).abs() < 1e-15, "expected {value}, got {drawn}");
        }
    }

    // Tests two streams with the same seed replay identical sequences
    // Verified by mixing a global counter into the state
    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = SeededRandom::new(20_260_209);
        let mut b = SeededRandom::new(20_260_209);
        for _ in 0..1000 {
            assert_eq!(a.next_word(), b.next_word());
        }
    }

    // Tests the state advances by the fixed increment per draw
    // Verified by changing the increment constant
    #[test]
    fn test_state_advance() {
        let mut rng = SeededRandom::new(7);
        rng.next_word();
        rng.next_word();
        assert_eq!(rng.state(), 7u32.wrapping_add(STATE_INCREMENT.wrapping_mul(2)));
    }

    // Tests floats stay inside [0, 1) over many draws
    // Verified by scaling with 2^-31
    #[test]
    fn test_unit_interval() {
        let mut rng = SeededRandom::new(u32::MAX);
        for _ in 0..10_000 {
            let value = rng.next_f64();
            assert!((0.0..1.0).contains(&value));
        }
    }

    // Tests derived streams differ from the base stream
    // Verified by ignoring the salt
    #[test]
    fn test_derived_stream_differs() {
        let mut base = SeededRandom::new(99);
        let mut derived = SeededRandom::derived(99, 0xA5A5_1F1F);
        assert_ne!(base.next_word(), derived.next_word());
        assert_eq!(SeededRandom::derived(99, 0).state(), 99);
    }

    // Tests range, symmetric and index helpers respect their bounds
    // Verified by dropping the min offset in range
    #[test]
    fn test_helper_bounds() {
        let mut rng = SeededRandom::new(3);
        for _ in 0..2000 {
            let r = rng.range(-2.0, 5.0);
            assert!((-2.0..5.0).contains(&r));
            let s = rng.symmetric(0.5);
            assert!((-0.5..0.5).contains(&s));
            assert!(rng.index(7) < 7);
        }
    }

    // Tests index of an empty range returns 0 without consuming a draw
    // Verified by drawing before the length check
    #[test]
    fn test_index_empty_does_not_draw() {
        let mut rng = SeededRandom::new(11);
        assert_eq!(rng.index(0), 0);
        assert_eq!(rng.state(), 11);
    }

    // Tests shuffling is a permutation and reproducible
    // Verified by swapping with a fixed index
    #[test]
    fn test_shuffle_permutation() {
        let mut items: Vec<usize> = (0..50).collect();
        let mut again = items.clone();
        SeededRandom::new(5).shuffle(&mut items);
        SeededRandom::new(5).shuffle(&mut again);
        assert_eq!(items, again);

        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..50).collect::<Vec<_>>());
        assert_ne!(items, sorted);
    }

    // Tests the rand trait implementations follow the native stream
    // Verified by returning the raw state from next_u32
    #[test]
    fn test_rand_core_traits() {
        let mut native = SeededRandom::new(42);
        let mut seeded = SeededRandom::from_seed(42u32.to_le_bytes());
        assert_eq!(seeded.next_u32(), native.next_word());

        let mut bytes = [0u8; 8];
        SeededRandom::seed_from_u64(1).fill_bytes(&mut bytes);
        assert!(bytes.iter().any(|&b| b != 0));
    }
}
