//! Descriptive statistics for numeric fields.

use indexmap::IndexMap;
use tracing::debug;

use super::math::{iqr_fence, mean, median_of_sorted, quartiles_of_sorted, sorted};
use super::typing::FieldTyper;
use crate::input::Dataset;
use crate::model::FieldStatistics;

/// Fence width used for the `outliers` list.
pub const OUTLIER_IQR_MULTIPLIER: f64 = 1.5;

/// Compute statistics for a sequence of values.
///
/// Returns `None` for empty input. `null_count` is left at 0; use
/// [`describe_dataset`] to have it filled from the source field.
pub fn describe(values: &[f64]) -> Option<FieldStatistics> {
    if values.is_empty() {
        return None;
    }

    let n = values.len() as f64;
    let sorted = sorted(values);
    let min = sorted[0];
    let max = sorted[sorted.len() - 1];

    let median = median_of_sorted(&sorted);
    let (mode, unique_count) = mode_and_unique(&sorted);

    // Moments are taken on values divided by a power of two so that sums of
    // huge inputs stay finite. The division is exact for ordinary data.
    let scale = moment_scale(min.abs().max(max.abs()));
    let scaled: Vec<f64> = values.iter().map(|v| v / scale).collect();
    let scaled_mean = mean(&scaled);
    let scaled_variance = scaled.iter().map(|v| (v - scaled_mean).powi(2)).sum::<f64>() / n;
    let scaled_sd = scaled_variance.sqrt();

    let mean = scaled_mean * scale;
    let variance = saturate(scaled_variance * scale * scale);
    let standard_deviation = variance.sqrt();

    let (skewness, kurtosis) = if scaled_sd == 0.0 {
        (0.0, 0.0)
    } else {
        let (m3, m4) = scaled.iter().fold((0.0, 0.0), |(m3, m4), v| {
            let z = (v - scaled_mean) / scaled_sd;
            (m3 + z.powi(3), m4 + z.powi(4))
        });
        (m3 / n, m4 / n - 3.0)
    };

    let quartiles = quartiles_of_sorted(&sorted);
    let outliers = iqr_fence(values, OUTLIER_IQR_MULTIPLIER).values;

    Some(FieldStatistics {
        count: values.len(),
        mean,
        median,
        mode,
        variance,
        standard_deviation,
        min,
        max,
        range: saturate(max - min),
        quartiles,
        skewness,
        kurtosis,
        outliers,
        null_count: 0,
        unique_count,
    })
}

/// Largest power of two not above `magnitude`, and never below 1.
fn moment_scale(magnitude: f64) -> f64 {
    if magnitude < 2.0 {
        return 1.0;
    }
    let exponent = (magnitude.log2().floor() as i32).clamp(0, f64::MAX_EXP - 1);
    2f64.powi(exponent)
}

/// Clamp an overflowed result to the largest finite value.
fn saturate(value: f64) -> f64 {
    if value.is_finite() { value } else { f64::MAX }
}

/// Compute statistics for every numeric field with at least one value.
///
/// Fields without values get no entry.
pub fn describe_dataset(dataset: &Dataset) -> IndexMap<String, FieldStatistics> {
    let mut statistics = IndexMap::new();

    for field in FieldTyper::numeric_fields(dataset) {
        let values = FieldTyper::numeric_values(dataset, &field);
        let Some(mut stats) = describe(&values) else {
            debug!(field = %field, "Skipping statistics: no numeric values");
            continue;
        };
        stats.null_count = dataset.row_count() - values.len();
        statistics.insert(field, stats);
    }

    statistics
}

/// Modal values and distinct count from a sorted slice.
fn mode_and_unique(sorted: &[f64]) -> (Vec<f64>, usize) {
    let mut runs: Vec<(f64, usize)> = Vec::new();
    for &value in sorted {
        match runs.last_mut() {
            Some((last, count)) if *last == value => *count += 1,
            _ => runs.push((value, 1)),
        }
    }

    let best = runs.iter().map(|&(_, count)| count).max().unwrap_or(0);
    let mode = runs
        .iter()
        .filter(|&&(_, count)| count == best)
        .map(|&(value, _)| value)
        .collect();

    (mode, runs.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Value;

    #[test]
    fn test_empty_is_none() {
        assert!(describe(&[]).is_none());
    }

    #[test]
    fn test_basic_statistics() {
        let stats = describe(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert_eq!(stats.count, 8);
        assert_eq!(stats.mean, 5.0);
        assert_eq!(stats.median, 4.5);
        assert_eq!(stats.mode, vec![4.0]);
        assert_eq!(stats.variance, 4.0);
        assert_eq!(stats.standard_deviation, 2.0);
        assert_eq!(stats.min, 2.0);
        assert_eq!(stats.max, 9.0);
        assert_eq!(stats.range, 7.0);
        assert_eq!(stats.unique_count, 5);
    }

    #[test]
    fn test_iqr_outliers() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 100.0];
        let stats = describe(&values).unwrap();
        assert_eq!(stats.quartiles.q1, 3.0);
        assert_eq!(stats.quartiles.q3, 8.0);
        assert_eq!(stats.iqr(), 5.0);
        assert_eq!(stats.quartiles.fences(1.5), (-4.5, 15.5));
        assert_eq!(stats.outliers, vec![100.0]);
    }

    #[test]
    fn test_mode_ties_keep_all() {
        let stats = describe(&[3.0, 1.0, 3.0, 1.0, 2.0]).unwrap();
        assert_eq!(stats.mode, vec![1.0, 3.0]);
    }

    #[test]
    fn test_constant_series() {
        let stats = describe(&[5.0; 6]).unwrap();
        assert_eq!(stats.variance, 0.0);
        assert_eq!(stats.skewness, 0.0);
        assert_eq!(stats.kurtosis, 0.0);
        assert!(stats.outliers.is_empty());
        assert_eq!(stats.unique_count, 1);
    }

    #[test]
    fn test_symmetric_skewness_is_zero() {
        let stats = describe(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert!(stats.skewness.abs() < 1e-12);
        // Uniform-like data is platykurtic.
        assert!(stats.kurtosis < 0.0);
    }

    #[test]
    fn test_right_skew() {
        let stats = describe(&[1.0, 1.0, 1.0, 2.0, 2.0, 3.0, 10.0]).unwrap();
        assert!(stats.skewness > 0.0);
    }

    #[test]
    fn test_describe_dataset_counts_nulls() {
        let dataset = Dataset::from_columns(vec![
            ("revenue", vec![Value::from(10.0), Value::Missing, Value::from("30")]),
            ("campaign", vec![Value::from("a"), Value::from("b"), Value::from("c")]),
            ("empty", vec![Value::Missing, Value::Missing, Value::Missing]),
        ]);

        let stats = describe_dataset(&dataset);
        assert_eq!(stats.len(), 1);
        let revenue = &stats["revenue"];
        assert_eq!(revenue.count, 2);
        assert_eq!(revenue.null_count, 1);
        assert_eq!(revenue.mean, 20.0);
    }

    #[test]
    fn test_huge_values_stay_finite() {
        let stats = describe(&[1e308, 1e308, -1e308, 5.0]).unwrap();
        assert!((stats.mean - 2.5e307).abs() < 1e294);
        assert_eq!(stats.median, 5e307);
        assert!(stats.variance.is_finite());
        assert!(stats.standard_deviation.is_finite());
        assert!(stats.skewness.is_finite());
        assert!(stats.kurtosis.is_finite());
        assert_eq!(stats.range, f64::MAX);

        let stats = describe(&[1e200, 2e200, 3e200]).unwrap();
        assert!((stats.mean / 2e200 - 1.0).abs() < 1e-12);
        assert_eq!(stats.variance, f64::MAX);
        assert_eq!(stats.standard_deviation, stats.variance.sqrt());
        assert!(stats.skewness.abs() < 1e-12);
        assert!((stats.kurtosis + 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_scaling_is_exact_for_ordinary_values() {
        let values = [2000.0, 4000.0, 4000.0, 4000.0, 5000.0, 5000.0, 7000.0, 9000.0];
        let stats = describe(&values).unwrap();
        assert_eq!(stats.mean, 5000.0);
        assert_eq!(stats.variance, 4_000_000.0);
        assert_eq!(stats.standard_deviation, 2000.0);
    }

    #[test]
    fn test_idempotent() {
        let values = [3.5, 1.25, 9.0, 4.0, 4.0, 12.0];
        assert_eq!(describe(&values), describe(&values));
    }
}
