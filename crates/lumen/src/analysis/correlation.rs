//! Pairwise Pearson correlation between numeric fields.

use tracing::debug;

use super::math::{correlation_p_value, pearson};
use super::typing::FieldTyper;
use crate::config::CorrelationConfig;
use crate::input::Dataset;
use crate::model::{CorrelationMatrix, CorrelationResult, Direction, Strength};

/// Discovers correlated numeric field pairs.
pub struct CorrelationEngine {
    config: CorrelationConfig,
}

impl CorrelationEngine {
    /// Create an engine with default thresholds.
    pub fn new() -> Self {
        Self::with_config(CorrelationConfig::default())
    }

    pub fn with_config(config: CorrelationConfig) -> Self {
        Self { config }
    }

    /// Correlate every unordered pair of numeric fields.
    ///
    /// Values are aligned by row: a row contributes to a pair only when both
    /// fields hold a number there. Pairs with `|r|` at or below the
    /// configured minimum are dropped. Results are ordered by descending
    /// `|r|`; ties keep field order.
    pub fn find_correlations(&self, dataset: &Dataset) -> Vec<CorrelationResult> {
        let fields = FieldTyper::numeric_fields(dataset);
        let mut results = Vec::new();

        for (i, a) in fields.iter().enumerate() {
            for b in &fields[i + 1..] {
                let Some(result) = self.correlate(dataset, a, b) else {
                    continue;
                };
                if result.coefficient.abs() > self.config.min_abs_coefficient {
                    results.push(result);
                }
            }
        }

        results.sort_by(|x, y| y.coefficient.abs().total_cmp(&x.coefficient.abs()));
        results
    }

    /// Correlate one pair without applying the reporting threshold.
    ///
    /// Returns `None` when fewer than two rows hold both values or when the
    /// two names are the same field.
    pub fn correlate(&self, dataset: &Dataset, a: &str, b: &str) -> Option<CorrelationResult> {
        if a == b {
            return None;
        }

        let (x, y) = FieldTyper::paired_values(dataset, a, b);
        if x.len() < 2 {
            debug!(field1 = %a, field2 = %b, pairs = x.len(), "Skipping correlation: insufficient pairs");
            return None;
        }

        let coefficient = pearson(&x, &y);
        let p_value = if self.config.compute_significance {
            correlation_p_value(coefficient, x.len())
        } else {
            None
        };

        Some(CorrelationResult {
            field1: a.to_string(),
            field2: b.to_string(),
            coefficient,
            strength: Strength::at_least(
                coefficient.abs(),
                self.config.strong_threshold,
                self.config.moderate_threshold,
            ),
            direction: Direction::of(coefficient),
            p_value,
            sample_size: x.len(),
        })
    }

    /// Full coefficient matrix over numeric fields.
    ///
    /// The diagonal is 1 by definition. Pairs without enough shared rows
    /// are 0.
    pub fn correlation_matrix(&self, dataset: &Dataset) -> CorrelationMatrix {
        let fields = FieldTyper::numeric_fields(dataset);
        let n = fields.len();
        let mut values = vec![vec![0.0; n]; n];

        for i in 0..n {
            values[i][i] = 1.0;
            for j in i + 1..n {
                let (x, y) = FieldTyper::paired_values(dataset, &fields[i], &fields[j]);
                let r = pearson(&x, &y);
                values[i][j] = r;
                values[j][i] = r;
            }
        }

        CorrelationMatrix { fields, values }
    }
}

impl Default for CorrelationEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Value;

    fn num(values: &[f64]) -> Vec<Value> {
        values.iter().map(|&v| Value::from(v)).collect()
    }

    #[test]
    fn test_perfect_positive() {
        let dataset = Dataset::from_columns(vec![
            ("x", num(&[1.0, 2.0, 3.0, 4.0, 5.0])),
            ("y", num(&[2.0, 4.0, 6.0, 8.0, 10.0])),
        ]);
        let results = CorrelationEngine::new().find_correlations(&dataset);

        assert_eq!(results.len(), 1);
        let r = &results[0];
        assert!((r.coefficient - 1.0).abs() < 1e-12);
        assert_eq!(r.strength, Strength::Strong);
        assert_eq!(r.direction, Direction::Positive);
        assert_eq!(r.p_value, Some(0.0));
        assert_eq!(r.sample_size, 5);
    }

    #[test]
    fn test_weak_pairs_dropped_and_sorted() {
        let dataset = Dataset::from_columns(vec![
            ("a", num(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0])),
            ("b", num(&[6.0, 5.0, 4.0, 3.0, 2.0, 1.0])),
            ("c", num(&[1.0, 3.0, 2.0, 5.0, 4.0, 6.0])),
            ("d", num(&[2.0, 1.0, 2.0, 1.0, 2.0, 1.0])),
        ]);
        let results = CorrelationEngine::new().find_correlations(&dataset);

        assert!(results.iter().all(|r| r.coefficient.abs() > 0.3));
        assert!(results.iter().all(|r| r.field1 != r.field2));
        for pair in results.windows(2) {
            assert!(pair[0].coefficient.abs() >= pair[1].coefficient.abs());
        }
        assert!(results[0].involves("a", "b"));
        assert_eq!(results[0].direction, Direction::Negative);
    }

    #[test]
    fn test_aligns_by_row() {
        // Independent filtering would pair 10 with 1; row alignment drops row 0.
        let dataset = Dataset::from_columns(vec![
            ("x", vec![Value::from(10.0), Value::from(1.0), Value::from(2.0), Value::from(3.0)]),
            ("y", vec![Value::Missing, Value::from(1.0), Value::from(2.0), Value::from(3.0)]),
        ]);
        let result = CorrelationEngine::new().correlate(&dataset, "x", "y").unwrap();
        assert_eq!(result.sample_size, 3);
        assert!((result.coefficient - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_constant_field_is_zero() {
        let dataset = Dataset::from_columns(vec![
            ("x", num(&[1.0, 2.0, 3.0])),
            ("flat", num(&[4.0, 4.0, 4.0])),
        ]);
        let engine = CorrelationEngine::new();
        assert!(engine.find_correlations(&dataset).is_empty());
        assert_eq!(engine.correlate(&dataset, "x", "flat").unwrap().coefficient, 0.0);
    }

    #[test]
    fn test_matrix_symmetric_with_unit_diagonal() {
        let dataset = Dataset::from_columns(vec![
            ("a", num(&[1.0, 2.0, 3.0, 4.0])),
            ("b", num(&[2.0, 1.0, 4.0, 3.0])),
            ("c", num(&[7.0, 7.0, 7.0, 7.0])),
        ]);
        let matrix = CorrelationEngine::new().correlation_matrix(&dataset);

        assert_eq!(matrix.len(), 3);
        for i in 0..3 {
            assert_eq!(matrix.values[i][i], 1.0);
            for j in 0..3 {
                assert_eq!(matrix.values[i][j], matrix.values[j][i]);
            }
        }
        assert_eq!(matrix.get("a", "c"), Some(0.0));
    }

    #[test]
    fn test_self_pair_rejected() {
        let dataset = Dataset::from_columns(vec![("a", num(&[1.0, 2.0, 3.0]))]);
        assert!(CorrelationEngine::new().correlate(&dataset, "a", "a").is_none());
    }
}
