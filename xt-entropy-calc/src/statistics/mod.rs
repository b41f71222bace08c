use libm::sqrt;

/// Summary statistics over the entropy scores emitted for one volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntropyStats {
    /// Number of scores summarized.
    pub count: usize,
    /// The arithmetic mean of the scores.
    pub mean: f64,
    /// The population standard deviation of the scores.
    pub std_dev: f64,
    /// Lowest score seen (0.0 when `count == 0`).
    pub min: f64,
    /// Highest score seen (0.0 when `count == 0`).
    pub max: f64,
}

impl Default for EntropyStats {
    fn default() -> Self {
        Self { count: 0, mean: 0.0, std_dev: 0.0, min: 0.0, max: 0.0 }
    }
}

/// Calculates count, mean, standard deviation and range for a slice of scores.
pub fn compute_stats(values: &[f64]) -> EntropyStats {
    if values.is_empty() {
        return EntropyStats::default();
    }

    let count = values.len();
    let n = count as f64;
    let mean = values.iter().sum::<f64>() / n;

    // Population variance over every score of the volume.
    let mut variance = 0.0;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &score in values {
        variance += (score - mean) * (score - mean);
        min = min.min(score);
        max = max.max(score);
    }
    variance /= n;

    EntropyStats { count, mean, std_dev: sqrt(variance), min, max }
}

#[cfg(test)]
mod tests {
    use super::*;
    extern crate alloc;
    use alloc::vec;

    const EPSILON: f64 = 1e-10;

    #[test]
    fn test_compute_stats_empty() {
        let stats = compute_stats(&[]);
        assert_eq!(stats, EntropyStats::default());
    }

    #[test]
    fn test_compute_stats_single_value() {
        let stats = compute_stats(&[5.0]);
        assert_eq!(stats.count, 1);
        assert_eq!(stats.mean, 5.0);
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.min, 5.0);
        assert_eq!(stats.max, 5.0);
    }

    #[test]
    fn test_compute_stats_simple_range() {
        // Squared deviations from 5.0 sum to 32 over 8 scores.
        let values = vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let stats = compute_stats(&values);
        assert_eq!(stats.count, 8);
        assert!((stats.mean - 5.0).abs() < EPSILON);
        assert!((stats.std_dev - 2.0).abs() < EPSILON);
        assert_eq!(stats.min, 2.0);
        assert_eq!(stats.max, 9.0);
    }
}
