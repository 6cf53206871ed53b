//! Rule-based insight lines for the analysis summary.
//!
//! Each rule turns one analysis result into a sentence. Lines are ordered by
//! priority, so the most actionable findings come first.

use indexmap::IndexMap;

use crate::model::{CorrelationResult, FieldStatistics, Pattern, PatternKind, Strength};

/// Default cap on the number of insight lines.
pub const MAX_INSIGHTS: usize = 8;

/// Coefficient of variation above which a field is called highly variable.
const HIGH_VARIABILITY: f64 = 1.0;

/// Absolute skewness above which a field is called skewed.
const HIGH_SKEW: f64 = 1.0;

/// Builds summary insight lines without an LLM.
pub struct InsightEngine;

impl InsightEngine {
    /// Generate at most `limit` insight lines.
    pub fn generate(
        statistics: &IndexMap<String, FieldStatistics>,
        correlations: &[CorrelationResult],
        patterns: &[Pattern],
        limit: usize,
    ) -> Vec<String> {
        let mut ranked: Vec<(u8, String)> = Vec::new();

        for pattern in patterns {
            if let Some(line) = Self::from_pattern(pattern) {
                ranked.push(line);
            }
        }
        for correlation in correlations {
            if let Some(line) = Self::from_correlation(correlation) {
                ranked.push(line);
            }
        }
        for (field, stats) in statistics {
            ranked.extend(Self::from_statistics(field, stats));
        }

        // Stable sort keeps discovery order within a priority.
        ranked.sort_by_key(|(priority, _)| *priority);

        let mut lines: Vec<String> = ranked.into_iter().map(|(_, line)| line).take(limit).collect();
        if lines.is_empty() {
            lines.push("No notable patterns or relationships detected.".to_string());
        }
        lines
    }

    fn from_pattern(pattern: &Pattern) -> Option<(u8, String)> {
        let priority = match pattern.kind() {
            PatternKind::Anomaly => 1,
            PatternKind::Trend => 2,
            PatternKind::Seasonality => 3,
            PatternKind::Cluster => 4,
            // Restates the anomaly line for the same field.
            PatternKind::Outlier => return None,
        };
        Some((priority, pattern.description.clone()))
    }

    fn from_correlation(result: &CorrelationResult) -> Option<(u8, String)> {
        let priority = match result.strength {
            Strength::Strong => 2,
            Strength::Moderate => 5,
            Strength::Weak => return None,
        };
        Some((
            priority,
            format!(
                "{} and {} are {}ly {}ly correlated (r = {:.2}, n = {})",
                result.field1,
                result.field2,
                result.strength,
                result.direction,
                result.coefficient,
                result.sample_size
            ),
        ))
    }

    fn from_statistics(field: &str, stats: &FieldStatistics) -> Vec<(u8, String)> {
        let mut lines = Vec::new();

        if stats.null_count > 0 {
            let total = stats.count + stats.null_count;
            lines.push((
                6,
                format!(
                    "{} is missing {} of {} values ({:.0}%)",
                    field,
                    stats.null_count,
                    total,
                    stats.null_count as f64 / total as f64 * 100.0
                ),
            ));
        }

        let cv = stats.coefficient_of_variation();
        if cv > HIGH_VARIABILITY {
            lines.push((7, format!("{} is highly variable (CV = {:.2})", field, cv)));
        }

        if stats.skewness.abs() > HIGH_SKEW {
            let side = if stats.skewness > 0.0 { "right" } else { "left" };
            lines.push((
                8,
                format!("{} is {}-skewed (skewness = {:.2})", field, side, stats.skewness),
            ));
        }

        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::descriptive::describe;
    use crate::model::{Direction, FlaggedValues, PatternDetails};

    fn anomaly(field: &str) -> Pattern {
        Pattern {
            details: PatternDetails::Anomaly(FlaggedValues {
                values: vec![100.0],
                indices: vec![9],
                lower_fence: -4.5,
                upper_fence: 15.5,
            }),
            fields: vec![field.to_string()],
            confidence: 0.8,
            strength: Strength::Strong,
            description: format!("1 anomalous value in {}", field),
        }
    }

    fn correlation(strength: Strength) -> CorrelationResult {
        CorrelationResult {
            field1: "spend".to_string(),
            field2: "revenue".to_string(),
            coefficient: 0.91,
            strength,
            direction: Direction::Positive,
            p_value: None,
            sample_size: 12,
        }
    }

    #[test]
    fn test_empty_inputs() {
        let lines = InsightEngine::generate(&IndexMap::new(), &[], &[], MAX_INSIGHTS);
        assert_eq!(lines, vec!["No notable patterns or relationships detected."]);
    }

    #[test]
    fn test_anomalies_first() {
        let lines = InsightEngine::generate(
            &IndexMap::new(),
            &[correlation(Strength::Strong)],
            &[anomaly("cost")],
            MAX_INSIGHTS,
        );
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("anomalous"));
        assert_eq!(lines[1], "spend and revenue are strongly positively correlated (r = 0.91, n = 12)");
    }

    #[test]
    fn test_weak_correlations_skipped() {
        let lines = InsightEngine::generate(
            &IndexMap::new(),
            &[correlation(Strength::Weak)],
            &[],
            MAX_INSIGHTS,
        );
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("No notable"));
    }

    #[test]
    fn test_statistics_rules() {
        let mut stats = describe(&[1.0, 1.0, 1.0, 1.0, 2.0, 50.0]).unwrap();
        stats.null_count = 2;
        let mut map = IndexMap::new();
        map.insert("orders".to_string(), stats);

        let lines = InsightEngine::generate(&map, &[], &[], MAX_INSIGHTS);
        assert!(lines[0].starts_with("orders is missing 2 of 8 values"));
        assert!(lines.iter().any(|l| l.contains("highly variable")));
        assert!(lines.iter().any(|l| l.contains("right-skewed")));
    }

    #[test]
    fn test_limit() {
        let patterns: Vec<Pattern> = (0..5).map(|i| anomaly(&format!("f{i}"))).collect();
        let lines = InsightEngine::generate(&IndexMap::new(), &[], &patterns, 3);
        assert_eq!(lines.len(), 3);
    }
}
