//! Analysis configuration.
//!
//! Every threshold used by the analysis components lives here with its
//! default value. Configs deserialize from JSON, and missing keys fall back
//! to defaults so partial files work.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LumenError, Result};

/// Configuration for correlation discovery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrelationConfig {
    /// Pairs with `|r|` at or below this are not reported.
    pub min_abs_coefficient: f64,
    /// `|r|` at or above this is "strong".
    pub strong_threshold: f64,
    /// `|r|` at or above this is "moderate".
    pub moderate_threshold: f64,
    /// Attach an approximate p-value to each result.
    pub compute_significance: bool,
}

impl Default for CorrelationConfig {
    fn default() -> Self {
        Self {
            min_abs_coefficient: 0.3,
            strong_threshold: 0.7,
            moderate_threshold: 0.5,
            compute_significance: true,
        }
    }
}

/// Configuration for per-field pattern detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    pub trend_min_points: usize,
    /// Minimum `|slope|` for a trend to be reported.
    pub trend_min_slope: f64,
    /// Minimum R² for a trend to be reported.
    pub trend_min_r_squared: f64,
    pub seasonality_min_points: usize,
    /// Largest lag scanned for seasonality.
    pub seasonality_max_lag: usize,
    pub seasonality_min_autocorrelation: f64,
    /// Minimum points before IQR anomaly/outlier detection runs.
    pub anomaly_min_points: usize,
    /// Fence width in IQRs.
    pub iqr_multiplier: f64,
    /// Trend and seasonality patterns need confidence above this.
    pub min_confidence: f64,
    /// Emit an `outlier` pattern alongside each `anomaly` pattern.
    pub emit_outlier_duplicates: bool,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            trend_min_points: 3,
            trend_min_slope: 0.1,
            trend_min_r_squared: 0.3,
            seasonality_min_points: 12,
            seasonality_max_lag: 24,
            seasonality_min_autocorrelation: 0.3,
            anomaly_min_points: 10,
            iqr_multiplier: 1.5,
            min_confidence: 0.6,
            emit_outlier_duplicates: true,
        }
    }
}

/// Configuration for k-means clustering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    /// Number of clusters.
    pub k: usize,
    pub max_iterations: usize,
    /// Minimum paired points before clustering runs.
    pub min_points: usize,
    /// Seed for centroid initialization (None = fresh entropy each run).
    pub seed: Option<u64>,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            k: 3,
            max_iterations: 100,
            min_points: 10,
            seed: None,
        }
    }
}

/// Top-level configuration for an analysis run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub correlation: CorrelationConfig,
    pub patterns: PatternConfig,
    pub clustering: ClusterConfig,
}

impl AnalysisConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| LumenError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that thresholds are usable.
    pub fn validate(&self) -> Result<()> {
        if self.clustering.k < 2 {
            return Err(LumenError::Config(format!(
                "clustering.k must be at least 2, got {}",
                self.clustering.k
            )));
        }
        if self.clustering.max_iterations == 0 {
            return Err(LumenError::Config(
                "clustering.max_iterations must be positive".to_string(),
            ));
        }
        if !(self.patterns.iqr_multiplier >= 0.0) {
            return Err(LumenError::Config(format!(
                "patterns.iqr_multiplier must be non-negative, got {}",
                self.patterns.iqr_multiplier
            )));
        }
        if self.patterns.seasonality_max_lag < 2 {
            return Err(LumenError::Config(
                "patterns.seasonality_max_lag must be at least 2".to_string(),
            ));
        }
        let c = &self.correlation;
        if !(0.0..=1.0).contains(&c.min_abs_coefficient)
            || !(0.0..=1.0).contains(&c.moderate_threshold)
            || !(0.0..=1.0).contains(&c.strong_threshold)
        {
            return Err(LumenError::Config(
                "correlation thresholds must be within [0, 1]".to_string(),
            ));
        }
        Ok(())
    }

    /// Fix the clustering seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.clustering.seed = Some(seed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.correlation.min_abs_coefficient, 0.3);
        assert_eq!(config.patterns.seasonality_min_points, 12);
        assert_eq!(config.clustering.k, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"clustering": {"seed": 7}, "patterns": {"min_confidence": 0.5}}"#)
            .unwrap();

        let config = AnalysisConfig::from_file(file.path()).unwrap();
        assert_eq!(config.clustering.seed, Some(7));
        assert_eq!(config.clustering.k, 3);
        assert_eq!(config.patterns.min_confidence, 0.5);
        assert_eq!(config.patterns.trend_min_points, 3);
    }

    #[test]
    fn test_invalid_k_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"clustering": {"k": 1}}"#).unwrap();

        let err = AnalysisConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, LumenError::Config(_)));
    }
}
