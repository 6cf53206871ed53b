//! Main Lumen struct and public API.

use std::path::Path;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::{
    CorrelationEngine, FieldTyper, PatternDetector, RandomSource, describe_dataset, rng_from_seed,
};
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::input::{Dataset, Loader, SourceMetadata};
use crate::model::{CorrelationMatrix, CorrelationResult, FieldKind, FieldStatistics, Pattern};
use crate::report::{InsightEngine, MAX_INSIGHTS};

/// Result of analyzing a dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    /// Metadata about the source file, when the dataset came from one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceMetadata>,
    /// Kind of every field, in field order.
    pub field_kinds: IndexMap<String, FieldKind>,
    /// Statistics per numeric field with at least one value.
    pub statistics: IndexMap<String, FieldStatistics>,
    /// Surfaced correlations, strongest first.
    pub correlations: Vec<CorrelationResult>,
    pub correlation_matrix: CorrelationMatrix,
    pub patterns: Vec<Pattern>,
    pub summary: AnalysisSummary,
}

/// Summary of an analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    pub row_count: usize,
    pub field_count: usize,
    pub numeric_field_count: usize,
    pub correlation_count: usize,
    pub pattern_count: usize,
    /// Pattern counts keyed by kind name.
    pub patterns_by_kind: IndexMap<String, usize>,
    /// Most notable findings as sentences.
    pub insights: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

/// The main Lumen analysis engine.
pub struct Lumen {
    config: AnalysisConfig,
    loader: Loader,
    correlation: CorrelationEngine,
    patterns: PatternDetector,
}

impl Lumen {
    /// Create a new Lumen instance with default configuration.
    pub fn new() -> Self {
        Self::with_config(AnalysisConfig::default())
    }

    /// Create a Lumen instance after validating the configuration,
    /// rejecting unusable thresholds with
    /// [`LumenError::Config`](crate::LumenError::Config).
    pub fn try_with_config(config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_config(config))
    }

    /// Create a Lumen instance with custom configuration.
    ///
    /// The configuration is not validated. A cluster count below 2 or a
    /// seasonality lag below 2 disables that detector; use
    /// [`Lumen::try_with_config`] to reject such settings instead.
    pub fn with_config(config: AnalysisConfig) -> Self {
        let correlation = CorrelationEngine::with_config(config.correlation.clone());
        let patterns =
            PatternDetector::with_config(config.patterns.clone(), config.clustering.clone());

        Self {
            config,
            loader: Loader::new(),
            correlation,
            patterns,
        }
    }

    /// Fix the clustering seed so repeated runs give identical output.
    pub fn with_seed(self, seed: u64) -> Self {
        let config = self.config.with_seed(seed);
        Self::with_config(config)
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Load a JSON file and analyze it.
    pub fn analyze_file(&self, path: impl AsRef<Path>) -> Result<AnalysisReport> {
        let (dataset, source) = self.loader.load_file(path)?;
        let mut report = self.analyze(&dataset);
        report.source = Some(source);
        Ok(report)
    }

    /// Run every analysis over an in-memory dataset.
    pub fn analyze(&self, dataset: &Dataset) -> AnalysisReport {
        let mut rng = rng_from_seed(self.config.clustering.seed);
        self.analyze_with_rng(dataset, &mut rng)
    }

    /// Run every analysis, drawing clustering seeds from `rng`.
    pub fn analyze_with_rng(
        &self,
        dataset: &Dataset,
        rng: &mut dyn RandomSource,
    ) -> AnalysisReport {
        let field_kinds = FieldTyper::classify(dataset);
        let statistics = describe_dataset(dataset);
        let correlations = self.correlation.find_correlations(dataset);
        let correlation_matrix = self.correlation.correlation_matrix(dataset);
        let patterns = self.patterns.detect_with_rng(dataset, rng);

        let summary = self.compute_summary(
            dataset,
            &correlation_matrix,
            &statistics,
            &correlations,
            &patterns,
        );

        info!(
            rows = summary.row_count,
            fields = summary.field_count,
            numeric = summary.numeric_field_count,
            correlations = summary.correlation_count,
            patterns = summary.pattern_count,
            "Analysis complete"
        );

        AnalysisReport {
            source: None,
            field_kinds,
            statistics,
            correlations,
            correlation_matrix,
            patterns,
            summary,
        }
    }

    /// Statistics for every numeric field.
    pub fn statistics(&self, dataset: &Dataset) -> IndexMap<String, FieldStatistics> {
        describe_dataset(dataset)
    }

    /// Surfaced correlations, strongest first.
    pub fn correlations(&self, dataset: &Dataset) -> Vec<CorrelationResult> {
        self.correlation.find_correlations(dataset)
    }

    /// Detected patterns, using the configured seed.
    pub fn patterns(&self, dataset: &Dataset) -> Vec<Pattern> {
        self.patterns.detect(dataset)
    }

    fn compute_summary(
        &self,
        dataset: &Dataset,
        matrix: &CorrelationMatrix,
        statistics: &IndexMap<String, FieldStatistics>,
        correlations: &[CorrelationResult],
        patterns: &[Pattern],
    ) -> AnalysisSummary {
        let mut patterns_by_kind: IndexMap<String, usize> = IndexMap::new();
        for pattern in patterns {
            *patterns_by_kind.entry(pattern.kind().to_string()).or_insert(0) += 1;
        }

        let insights = InsightEngine::generate(statistics, correlations, patterns, MAX_INSIGHTS);

        AnalysisSummary {
            row_count: dataset.row_count(),
            field_count: dataset.field_count(),
            numeric_field_count: matrix.len(),
            correlation_count: correlations.len(),
            pattern_count: patterns.len(),
            patterns_by_kind,
            insights,
            generated_at: Utc::now(),
        }
    }
}

impl Default for Lumen {
    fn default() -> Self {
        Self::new()
    }
}
