//! Mean of a window, rounded to two decimals.

/// Arithmetic mean rounded to 2 decimal places (half away from zero). Empty input yields 0.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn average(values: &[i64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let sum: i128 = values.iter().map(|&v| i128::from(v)).sum();
    let mean = sum as f64 / values.len() as f64;
    (mean * 100.0).round() / 100.0
}
