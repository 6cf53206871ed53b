//! Property-based tests for Lumen analysis.
//!
//! These tests use proptest to generate random datasets and verify that the
//! analysis components keep their invariants under all conditions.
//!
//! # Testing Philosophy
//!
//! Property-based tests verify:
//! 1. **No panics**: Analysis never crashes on sparse or malformed rows
//! 2. **Determinism**: Same input and seed always produce the same output
//! 3. **Invariants**: Ordering, bounds and conservation properties hold
//!
//! # Running Property Tests
//!
//! ```bash
//! # Run all property tests
//! cargo test -p lumen --test property_tests
//!
//! # Run with more cases (slower but more thorough)
//! PROPTEST_CASES=10000 cargo test -p lumen --test property_tests
//! ```

use proptest::prelude::*;

use lumen::analysis::{describe, kmeans, rng_from_seed, silhouette_score};
use lumen::{CorrelationEngine, Dataset, Lumen, PatternDetails, PatternDetector, Value};

// =============================================================================
// Test Strategies
// =============================================================================

/// Finite values in a range that keeps sums well away from overflow.
fn finite_value() -> impl Strategy<Value = f64> {
    -1.0e6..1.0e6f64
}

fn numeric_series(min: usize, max: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(finite_value(), min..max)
}

/// Any cell a JSON record might hold.
fn cell() -> impl Strategy<Value = Value> {
    prop_oneof![
        4 => finite_value().prop_map(Value::from),
        1 => Just(Value::Missing),
        1 => any::<bool>().prop_map(Value::from),
        1 => "[a-z ]{0,6}".prop_map(Value::from),
        1 => (-1000i32..1000).prop_map(|n| Value::from(n.to_string())),
    ]
}

/// Columns of uneven length; short columns are padded with missing values.
fn sparse_dataset() -> impl Strategy<Value = Dataset> {
    prop::collection::vec(prop::collection::vec(cell(), 0..30), 0..5).prop_map(|columns| {
        Dataset::from_columns(
            columns
                .into_iter()
                .enumerate()
                .map(|(i, values)| (format!("f{i}"), values))
                .collect(),
        )
    })
}

fn numeric_dataset() -> impl Strategy<Value = Dataset> {
    (2usize..5, 3usize..25).prop_flat_map(|(fields, rows)| {
        prop::collection::vec(prop::collection::vec(finite_value(), rows), fields).prop_map(
            |columns| {
                Dataset::from_columns(
                    columns
                        .into_iter()
                        .enumerate()
                        .map(|(i, values)| (format!("f{i}"), values))
                        .collect(),
                )
            },
        )
    })
}

// =============================================================================
// Statistics Properties
// =============================================================================

proptest! {
    /// Order statistics are consistent with each other.
    #[test]
    fn statistics_ordering(values in numeric_series(1, 200)) {
        let stats = describe(&values).unwrap();
        let q = &stats.quartiles;

        prop_assert_eq!(stats.count, values.len());
        prop_assert!(stats.min <= q.q1);
        prop_assert!(q.q1 <= q.q2);
        prop_assert!(q.q2 <= q.q3);
        prop_assert!(q.q3 <= stats.max);
        prop_assert!(stats.min <= stats.median && stats.median <= stats.max);
        prop_assert!(stats.variance >= 0.0);
        prop_assert_eq!(stats.standard_deviation, stats.variance.sqrt());
        prop_assert_eq!(stats.range, stats.max - stats.min);
        prop_assert!(stats.unique_count >= 1 && stats.unique_count <= stats.count);
        prop_assert!(!stats.mode.is_empty());
    }

    /// The mean lies within the observed range, up to rounding.
    #[test]
    fn statistics_mean_bounded(values in numeric_series(1, 200)) {
        let stats = describe(&values).unwrap();
        let slack = 1e-9 * stats.max.abs().max(stats.min.abs()).max(1.0);
        prop_assert!(stats.mean >= stats.min - slack);
        prop_assert!(stats.mean <= stats.max + slack);
    }

    /// Every reported outlier is a member of the input outside the fences.
    #[test]
    fn outliers_outside_fences(values in numeric_series(1, 200)) {
        let stats = describe(&values).unwrap();
        let (lower, upper) = stats.quartiles.fences(1.5);
        for outlier in &stats.outliers {
            prop_assert!(values.contains(outlier));
            prop_assert!(*outlier < lower || *outlier > upper);
        }
    }

    /// Statistics are a pure function of the input.
    #[test]
    fn statistics_idempotent(values in numeric_series(0, 100)) {
        prop_assert_eq!(describe(&values), describe(&values));
    }
}

// =============================================================================
// Correlation Properties
// =============================================================================

proptest! {
    /// Coefficients stay in [-1, 1], pairs are distinct and results are
    /// sorted by descending magnitude above the threshold.
    #[test]
    fn correlation_bounds_and_order(dataset in numeric_dataset()) {
        let results = CorrelationEngine::new().find_correlations(&dataset);

        for r in &results {
            prop_assert!((-1.0..=1.0).contains(&r.coefficient));
            prop_assert!(r.coefficient.abs() > 0.3);
            prop_assert_ne!(&r.field1, &r.field2);
            if let Some(p) = r.p_value {
                prop_assert!((0.0..=1.0).contains(&p));
            }
        }
        for pair in results.windows(2) {
            prop_assert!(pair[0].coefficient.abs() >= pair[1].coefficient.abs());
        }
    }

    /// Each unordered pair appears at most once.
    #[test]
    fn correlation_pairs_unique(dataset in numeric_dataset()) {
        let results = CorrelationEngine::new().find_correlations(&dataset);
        for (i, a) in results.iter().enumerate() {
            for b in &results[i + 1..] {
                prop_assert!(!a.involves(&b.field1, &b.field2));
            }
        }
    }

    /// Swapping the two fields leaves the coefficient unchanged, and the
    /// matrix agrees with the pairwise result in both directions.
    #[test]
    fn correlation_symmetric(dataset in numeric_dataset()) {
        let engine = CorrelationEngine::new();
        let matrix = engine.correlation_matrix(&dataset);

        for (i, a) in matrix.fields.iter().enumerate() {
            for (j, b) in matrix.fields.iter().enumerate() {
                if i == j {
                    prop_assert!(engine.correlate(&dataset, a, b).is_none());
                    continue;
                }
                let forward = engine.correlate(&dataset, a, b).map(|r| r.coefficient);
                let backward = engine.correlate(&dataset, b, a).map(|r| r.coefficient);
                prop_assert!(forward.is_some());
                prop_assert_eq!(forward, backward);
                prop_assert_eq!(forward, Some(matrix.values[i][j]));
            }
        }
    }

    /// The matrix is symmetric with a unit diagonal.
    #[test]
    fn correlation_matrix_symmetric(dataset in numeric_dataset()) {
        let matrix = CorrelationEngine::new().correlation_matrix(&dataset);
        for i in 0..matrix.len() {
            prop_assert_eq!(matrix.values[i][i], 1.0);
            for j in 0..matrix.len() {
                prop_assert_eq!(matrix.values[i][j], matrix.values[j][i]);
            }
        }
    }
}

// =============================================================================
// Pattern and Clustering Properties
// =============================================================================

proptest! {
    /// Seeded k-means conserves points and respects the iteration cap.
    #[test]
    fn kmeans_conserves_points(
        points in prop::collection::vec((finite_value(), finite_value()), 3..60),
        k in 2usize..5,
        seed in any::<u64>(),
    ) {
        let points: Vec<[f64; 2]> = points.into_iter().map(|(x, y)| [x, y]).collect();
        let mut rng = rng_from_seed(Some(seed));

        match kmeans(&points, k, 100, &mut rng) {
            Some(result) => {
                prop_assert!(points.len() >= k);
                prop_assert_eq!(result.sizes.iter().sum::<usize>(), points.len());
                prop_assert!(result.assignments.iter().all(|&a| a < k));
                prop_assert!(result.iterations >= 1 && result.iterations <= 100);

                let score = silhouette_score(&points, &result.assignments, k);
                prop_assert!((-1.0..=1.0).contains(&score));
            }
            None => prop_assert!(points.len() < k),
        }
    }

    /// Pattern confidences stay in [0, 1] and trend/seasonality patterns
    /// clear the confidence filter.
    #[test]
    fn pattern_confidence_bounded(dataset in numeric_dataset(), seed in any::<u64>()) {
        let mut rng = rng_from_seed(Some(seed));
        let patterns = PatternDetector::new().detect_with_rng(&dataset, &mut rng);

        for p in &patterns {
            prop_assert!((0.0..=1.0).contains(&p.confidence));
            match &p.details {
                PatternDetails::Trend { .. } | PatternDetails::Seasonality { .. } => {
                    prop_assert!(p.confidence > 0.6);
                }
                PatternDetails::Cluster { sizes, .. } => {
                    prop_assert!(sizes.iter().filter(|&&s| s > 0).count() > 1);
                }
                PatternDetails::Anomaly(flagged) | PatternDetails::Outlier(flagged) => {
                    prop_assert!(!flagged.values.is_empty());
                    prop_assert_eq!(flagged.values.len(), flagged.indices.len());
                }
            }
        }
    }

    /// Analysis never panics on sparse, mixed or malformed rows, and a
    /// fixed seed gives identical output.
    #[test]
    fn analysis_total_and_deterministic(dataset in sparse_dataset(), seed in any::<u64>()) {
        let lumen = Lumen::new().with_seed(seed);
        let first = lumen.analyze(&dataset);
        let second = lumen.analyze(&dataset);

        prop_assert_eq!(first.summary.row_count, dataset.row_count());
        prop_assert_eq!(&first.patterns, &second.patterns);
        prop_assert_eq!(&first.correlations, &second.correlations);
        prop_assert_eq!(&first.statistics, &second.statistics);
    }
}
