// xt-entropy-calc/tests/entropy_properties.rs
use proptest::prelude::*;
use xt_entropy_calc::{compute_entropy, MAX_ENTROPY};

fn buffer_and_shuffle() -> impl Strategy<Value = (Vec<u8>, Vec<u8>)> {
    prop::collection::vec(any::<u8>(), 1..4096)
        .prop_flat_map(|data| (Just(data.clone()), Just(data).prop_shuffle()))
}

proptest! {
    #[test]
    fn entropy_stays_within_bounds(data in prop::collection::vec(any::<u8>(), 1..4096)) {
        let entropy = compute_entropy(&data);
        prop_assert!((0.0..=MAX_ENTROPY).contains(&entropy), "entropy {} out of range", entropy);
    }

    #[test]
    fn entropy_ignores_byte_order((data, shuffled) in buffer_and_shuffle()) {
        prop_assert_eq!(compute_entropy(&data).to_bits(), compute_entropy(&shuffled).to_bits());
    }

    #[test]
    fn repeated_single_byte_has_no_entropy(byte in any::<u8>(), len in 1usize..4096) {
        prop_assert_eq!(compute_entropy(&vec![byte; len]), 0.0);
    }

    #[test]
    fn every_byte_k_times_is_maximal(k in 1usize..64, rotation in 0usize..256) {
        let data: Vec<u8> = (0..256 * k).map(|i| ((i + rotation) % 256) as u8).collect();
        prop_assert_eq!(compute_entropy(&data), MAX_ENTROPY);
    }

    #[test]
    fn shuffled_uniform_buffer_is_maximal(
        data in (1usize..16)
            .prop_flat_map(|k| Just((0..256 * k).map(|i| (i % 256) as u8).collect::<Vec<u8>>()).prop_shuffle())
    ) {
        prop_assert_eq!(compute_entropy(&data), MAX_ENTROPY);
    }
}
