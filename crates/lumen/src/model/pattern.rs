//! Detected patterns.

use serde::{Deserialize, Serialize};

use super::types::Strength;

/// Discriminant of a [`Pattern`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    Trend,
    Seasonality,
    Anomaly,
    Cluster,
    Outlier,
}

impl PatternKind {
    /// Kinds whose detector already gates on its own threshold and so skip
    /// the final confidence filter.
    pub fn bypasses_confidence_filter(&self) -> bool {
        matches!(
            self,
            PatternKind::Anomaly | PatternKind::Outlier | PatternKind::Cluster
        )
    }
}

impl std::fmt::Display for PatternKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PatternKind::Trend => write!(f, "trend"),
            PatternKind::Seasonality => write!(f, "seasonality"),
            PatternKind::Anomaly => write!(f, "anomaly"),
            PatternKind::Cluster => write!(f, "cluster"),
            PatternKind::Outlier => write!(f, "outlier"),
        }
    }
}

/// Values flagged outside the IQR fences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlaggedValues {
    pub values: Vec<f64>,
    /// Positions within the field's numeric sequence.
    pub indices: Vec<usize>,
    pub lower_fence: f64,
    pub upper_fence: f64,
}

/// Algorithm-specific data carried by a pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum PatternDetails {
    Trend {
        slope: f64,
        intercept: f64,
        r_squared: f64,
    },
    Seasonality {
        /// Lag with the highest autocorrelation.
        period: usize,
        amplitude: f64,
        /// Radians, position of the peak phase within one period.
        phase: f64,
    },
    Anomaly(FlaggedValues),
    Cluster {
        /// Member count per cluster, including empty clusters.
        sizes: Vec<usize>,
        centroids: Vec<[f64; 2]>,
        /// Cluster index for each paired point, in row order.
        assignments: Vec<usize>,
        /// Raw mean silhouette in [-1, 1].
        silhouette: f64,
        iterations: usize,
    },
    Outlier(FlaggedValues),
}

impl PatternDetails {
    pub fn kind(&self) -> PatternKind {
        match self {
            PatternDetails::Trend { .. } => PatternKind::Trend,
            PatternDetails::Seasonality { .. } => PatternKind::Seasonality,
            PatternDetails::Anomaly(_) => PatternKind::Anomaly,
            PatternDetails::Cluster { .. } => PatternKind::Cluster,
            PatternDetails::Outlier(_) => PatternKind::Outlier,
        }
    }
}

/// A pattern found in one field, or a pair of fields for clusters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    #[serde(flatten)]
    pub details: PatternDetails,
    /// One field, or two for clusters.
    pub fields: Vec<String>,
    /// Confidence in [0, 1].
    pub confidence: f64,
    pub strength: Strength,
    pub description: String,
}

impl Pattern {
    pub fn kind(&self) -> PatternKind {
        self.details.kind()
    }

    /// The primary field.
    pub fn field(&self) -> &str {
        self.fields.first().map(String::as_str).unwrap_or("")
    }
}
