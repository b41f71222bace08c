// xt-entropy-core/src/annotation.rs
//! Text form of the entropy annotation attached to each item.

use xt_entropy_calc::EntropyScore;

/// Digits after the decimal point in every annotation.
pub const ANNOTATION_PRECISION: usize = 16;

/// Formats an entropy score as fixed-point with exactly 16 fractional digits,
/// e.g. `"3.9187254345322418"`.
pub fn format_entropy(entropy: EntropyScore) -> String {
    format!("{:.*}", ANNOTATION_PRECISION, entropy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use xt_entropy_calc::compute_entropy;

    #[test]
    fn test_fixed_digits() {
        assert_eq!(format_entropy(0.0), "0.0000000000000000");
        assert_eq!(format_entropy(8.0), "8.0000000000000000");
        assert_eq!(format_entropy(1.5), "1.5000000000000000");
    }

    #[test]
    fn test_always_sixteen_fraction_digits() {
        let samples: [&[u8]; 4] = [b"abc", b"hello, world", b"\x00\x01\x01\x02\x02\x02", b"zz"];
        for data in samples {
            let text = format_entropy(compute_entropy(data));
            let (_, fraction) = text.split_once('.').unwrap();
            assert_eq!(fraction.len(), ANNOTATION_PRECISION, "{}", text);
        }
    }

    #[test]
    fn test_parse_back_reproduces_value() {
        let samples: [&[u8]; 3] = [b"abc", b"The quick brown fox", b"\x00\x00\x00\x01"];
        for data in samples {
            let entropy = compute_entropy(data);
            let text = format_entropy(entropy);
            let parsed: f64 = text.parse().unwrap();
            assert!((parsed - entropy).abs() < 1e-15, "{} vs {}", parsed, entropy);
            assert_eq!(format_entropy(parsed), text);
        }
    }
}
