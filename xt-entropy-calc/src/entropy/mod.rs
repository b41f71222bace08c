// xt-entropy-calc/src/entropy/mod.rs
use libm::log2;

use crate::EntropyScore;

/// Upper bound of the byte-level entropy, in bits per byte.
pub const MAX_ENTROPY: EntropyScore = 8.0;

/// Calculates the Shannon entropy of a byte slice.
///
/// Returns the entropy in bits per byte, always within `0.0..=8.0`.
/// Callers are expected to reject empty input; an empty slice yields `0.0`.
pub fn compute_entropy(data: &[u8]) -> EntropyScore {
    if data.is_empty() {
        return 0.0;
    }

    let mut frequencies = [0u64; 256];
    for &byte in data {
        frequencies[byte as usize] += 1;
    }

    let len = data.len() as f64;
    let mut sum = 0.0;

    for &count in frequencies.iter() {
        if count > 0 {
            let p = count as f64 / len;
            sum += p * log2(p);
        }
    }

    // `sum` is never positive; the single-symbol case yields -0.0.
    if sum < 0.0 { -sum } else { 0.0 }
}
