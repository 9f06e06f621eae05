//! Numeric summary statistics.

use crate::types::NumericStats;

/// Summarize finite numeric values. Returns `None` for an empty slice.
pub(crate) fn numeric_stats(values: &[f64]) -> Option<NumericStats> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let min = sorted[0];
    let max = sorted[sorted.len() - 1];

    // Summation rounding can land a hair outside the observed range.
    let mean = calculate_mean(values).clamp(min, max);

    Some(NumericStats {
        min,
        max,
        mean,
        median: median_of_sorted(&sorted),
        std: calculate_std(values, mean),
        zeroes_count: values.iter().filter(|v| **v == 0.0).count(),
        negative_count: values.iter().filter(|v| **v < 0.0).count(),
    })
}

/// Arithmetic mean, 0 for an empty slice.
///
/// Falls back to summing values scaled by the largest magnitude when the
/// plain sum overflows, so finite input always yields a finite mean.
pub(crate) fn calculate_mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;

    let sum: f64 = values.iter().sum();
    if sum.is_finite() {
        return sum / n;
    }

    let scale = max_abs(values);
    values.iter().map(|v| v / scale).sum::<f64>() / n * scale
}

fn max_abs(values: &[f64]) -> f64 {
    values.iter().fold(0.0, |acc, v| acc.max(v.abs()))
}

/// Median of an already sorted slice.
pub(crate) fn median_of_sorted(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return 0.0;
    }
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        // Halve before adding so large magnitudes cannot overflow.
        sorted[n / 2 - 1] / 2.0 + sorted[n / 2] / 2.0
    }
}

/// Sample standard deviation (n - 1 denominator).
///
/// Zero or one value yields 0 instead of an undefined result.
pub(crate) fn calculate_std(values: &[f64], mean: f64) -> f64 {
    let n = values.len() as f64;

    if n <= 1.0 {
        return 0.0;
    }

    let variance: f64 = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    if variance.is_finite() {
        return variance.sqrt();
    }

    // Squared deviations overflowed; redo the sum on scaled values.
    let scale = max_abs(values);
    let scaled_mean = mean / scale;
    let scaled_variance: f64 = values
        .iter()
        .map(|v| (v / scale - scaled_mean).powi(2))
        .sum::<f64>()
        / (n - 1.0);

    // A spread wider than f64::MAX saturates instead of becoming infinite.
    (scaled_variance.sqrt() * scale).min(f64::MAX)
}
