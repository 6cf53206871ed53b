//! Pattern detection: linear trend, autocorrelation seasonality, IQR
//! anomalies, and two-field clustering.
//!
//! Row position is the time axis. Each detector skips silently when a field
//! has too few points; the absence of a pattern is the signal.

use std::f64::consts::PI;

use tracing::{debug, trace};

use super::clustering::{Point, kmeans, silhouette_score};
use super::math::{iqr_fence, mean};
use super::random::{RandomSource, rng_from_seed};
use super::typing::FieldTyper;
use crate::config::{ClusterConfig, PatternConfig};
use crate::input::Dataset;
use crate::model::{FlaggedValues, Pattern, PatternDetails, Strength};

/// Confidence attached to IQR anomaly patterns.
pub const ANOMALY_CONFIDENCE: f64 = 0.8;
/// Confidence attached to IQR outlier patterns.
pub const OUTLIER_CONFIDENCE: f64 = 0.9;

/// Ordinary least squares fit of value against row index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    /// `1 - SSres/SStot`, or 0 for a constant series.
    pub r_squared: f64,
}

/// Fit `value = intercept + slope * index`.
///
/// Returns `None` for fewer than two points.
pub fn linear_fit(values: &[f64]) -> Option<LinearFit> {
    let n = values.len();
    if n < 2 {
        return None;
    }

    let mean_x = (n - 1) as f64 / 2.0;
    let mean_y = mean(values);

    let (mut sxx, mut sxy) = (0.0, 0.0);
    for (i, &y) in values.iter().enumerate() {
        let dx = i as f64 - mean_x;
        sxx += dx * dx;
        sxy += dx * (y - mean_y);
    }

    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;

    let (mut ss_res, mut ss_tot) = (0.0, 0.0);
    for (i, &y) in values.iter().enumerate() {
        let predicted = intercept + slope * i as f64;
        ss_res += (y - predicted).powi(2);
        ss_tot += (y - mean_y).powi(2);
    }

    let r_squared = if ss_tot == 0.0 {
        0.0
    } else {
        1.0 - ss_res / ss_tot
    };

    Some(LinearFit {
        slope,
        intercept,
        r_squared,
    })
}

/// Sample autocorrelation at `lag`, 0 for a constant series or a lag that
/// leaves no overlapping pairs.
pub fn autocorrelation(values: &[f64], lag: usize) -> f64 {
    let n = values.len();
    if lag >= n {
        return 0.0;
    }

    let mu = mean(values);
    let denominator: f64 = values.iter().map(|v| (v - mu).powi(2)).sum();
    if denominator == 0.0 {
        return 0.0;
    }

    let numerator: f64 = values
        .iter()
        .zip(&values[lag..])
        .map(|(a, b)| (a - mu) * (b - mu))
        .sum();

    numerator / denominator
}

/// Strongest periodic component found by scanning autocorrelation lags.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeasonalFit {
    pub period: usize,
    pub autocorrelation: f64,
    /// Half the spread between the highest and lowest per-phase mean.
    pub amplitude: f64,
    /// Radians, `(peak phase / period) * 2π`.
    pub phase: f64,
}

/// Scan lags `2..=min(n/2, max_lag)` and keep the one with the highest
/// positive autocorrelation (first wins on ties).
///
/// Returns `None` when no lag has positive autocorrelation.
pub fn seasonal_fit(values: &[f64], max_lag: usize) -> Option<SeasonalFit> {
    let upper = (values.len() / 2).min(max_lag);

    let mut best: Option<(usize, f64)> = None;
    for lag in 2..=upper {
        let ac = autocorrelation(values, lag);
        if ac > best.map_or(0.0, |(_, b)| b) {
            best = Some((lag, ac));
        }
    }
    let (period, ac) = best?;

    let mut sums = vec![0.0; period];
    let mut counts = vec![0usize; period];
    for (i, &v) in values.iter().enumerate() {
        sums[i % period] += v;
        counts[i % period] += 1;
    }
    let phase_means: Vec<f64> = sums
        .iter()
        .zip(&counts)
        .map(|(&s, &c)| if c > 0 { s / c as f64 } else { 0.0 })
        .collect();

    let (mut peak, mut high, mut low) = (0, f64::NEG_INFINITY, f64::INFINITY);
    for (index, &m) in phase_means.iter().enumerate() {
        if m > high {
            high = m;
            peak = index;
        }
        low = low.min(m);
    }

    Some(SeasonalFit {
        period,
        autocorrelation: ac,
        amplitude: (high - low) / 2.0,
        phase: peak as f64 / period as f64 * 2.0 * PI,
    })
}

/// Detects trend, seasonality, anomaly, outlier, and cluster patterns.
pub struct PatternDetector {
    config: PatternConfig,
    clustering: ClusterConfig,
}

impl PatternDetector {
    /// Create a detector with default thresholds.
    pub fn new() -> Self {
        Self::with_config(PatternConfig::default(), ClusterConfig::default())
    }

    pub fn with_config(config: PatternConfig, clustering: ClusterConfig) -> Self {
        Self { config, clustering }
    }

    /// Detect patterns, drawing k-means seeds from the configured seed.
    pub fn detect(&self, dataset: &Dataset) -> Vec<Pattern> {
        let mut rng = rng_from_seed(self.clustering.seed);
        self.detect_with_rng(dataset, &mut rng)
    }

    /// Detect patterns with an explicit random source for clustering.
    ///
    /// Field patterns come first, in field order (trend, seasonality,
    /// anomaly, outlier for each field), followed by the cluster pattern.
    /// Trend and seasonality must clear the confidence filter; anomaly,
    /// outlier and cluster patterns are already gated by their own
    /// thresholds and bypass it.
    pub fn detect_with_rng(&self, dataset: &Dataset, rng: &mut dyn RandomSource) -> Vec<Pattern> {
        let fields = FieldTyper::numeric_fields(dataset);
        let mut patterns = Vec::new();

        for field in &fields {
            let values = FieldTyper::numeric_values(dataset, field);
            patterns.extend(self.field_patterns(field, &values));
        }

        if let Some(cluster) = self.cluster_pattern(dataset, &fields, rng) {
            patterns.push(cluster);
        }

        patterns.retain(|p| self.passes_filter(p));
        patterns
    }

    /// All per-field patterns for a value sequence, before the confidence
    /// filter.
    pub fn field_patterns(&self, field: &str, values: &[f64]) -> Vec<Pattern> {
        let mut patterns = Vec::new();
        patterns.extend(self.trend_pattern(field, values));
        patterns.extend(self.seasonality_pattern(field, values));
        patterns.extend(self.fence_patterns(field, values));
        patterns
    }

    /// Linear trend, when the slope and fit are both meaningful.
    pub fn trend_pattern(&self, field: &str, values: &[f64]) -> Option<Pattern> {
        if values.len() < self.config.trend_min_points.max(2) {
            trace!(field = %field, points = values.len(), "Skipping trend: insufficient data");
            return None;
        }

        let fit = linear_fit(values)?;
        if fit.slope.abs() <= self.config.trend_min_slope
            || fit.r_squared <= self.config.trend_min_r_squared
        {
            return None;
        }

        let heading = if fit.slope > 0.0 { "upward" } else { "downward" };
        Some(Pattern {
            details: PatternDetails::Trend {
                slope: fit.slope,
                intercept: fit.intercept,
                r_squared: fit.r_squared,
            },
            fields: vec![field.to_string()],
            confidence: fit.r_squared.clamp(0.0, 1.0),
            strength: Strength::above(fit.r_squared, 0.7, 0.5),
            description: format!(
                "{} shows an {} trend of {:.2} per row (R² = {:.2})",
                field,
                heading,
                fit.slope.abs(),
                fit.r_squared
            ),
        })
    }

    /// Periodic behaviour found through autocorrelation.
    pub fn seasonality_pattern(&self, field: &str, values: &[f64]) -> Option<Pattern> {
        if values.len() < self.config.seasonality_min_points {
            trace!(field = %field, points = values.len(), "Skipping seasonality: insufficient data");
            return None;
        }

        let fit = seasonal_fit(values, self.config.seasonality_max_lag)?;
        if fit.autocorrelation <= self.config.seasonality_min_autocorrelation {
            return None;
        }

        let strength = if fit.autocorrelation > 0.7 {
            Strength::Strong
        } else {
            Strength::Moderate
        };

        Some(Pattern {
            details: PatternDetails::Seasonality {
                period: fit.period,
                amplitude: fit.amplitude,
                phase: fit.phase,
            },
            fields: vec![field.to_string()],
            confidence: fit.autocorrelation.clamp(0.0, 1.0),
            strength,
            description: format!(
                "{} repeats every {} rows (autocorrelation {:.2}, amplitude {:.2})",
                field, fit.period, fit.autocorrelation, fit.amplitude
            ),
        })
    }

    /// Anomaly pattern, plus its outlier twin when configured, for values
    /// outside the IQR fences.
    ///
    /// Both come from the same fence test; they differ only in kind,
    /// confidence and wording.
    pub fn fence_patterns(&self, field: &str, values: &[f64]) -> Vec<Pattern> {
        if values.len() < self.config.anomaly_min_points {
            trace!(field = %field, points = values.len(), "Skipping anomalies: insufficient data");
            return Vec::new();
        }

        let flagged = iqr_fence(values, self.config.iqr_multiplier);
        if flagged.values.is_empty() {
            return Vec::new();
        }

        let mut patterns = vec![self.anomaly_pattern(field, flagged.clone())];
        if self.config.emit_outlier_duplicates {
            patterns.push(self.outlier_pattern(field, flagged));
        }
        patterns
    }

    fn anomaly_pattern(&self, field: &str, flagged: FlaggedValues) -> Pattern {
        let count = flagged.values.len();
        let description = format!(
            "{} anomalous value{} in {} outside [{:.2}, {:.2}]",
            count,
            if count == 1 { "" } else { "s" },
            field,
            flagged.lower_fence,
            flagged.upper_fence
        );
        Pattern {
            details: PatternDetails::Anomaly(flagged),
            fields: vec![field.to_string()],
            confidence: ANOMALY_CONFIDENCE,
            strength: Strength::Strong,
            description,
        }
    }

    fn outlier_pattern(&self, field: &str, flagged: FlaggedValues) -> Pattern {
        let count = flagged.values.len();
        let description = format!(
            "{} has {} outlier{} beyond {}×IQR",
            field,
            count,
            if count == 1 { "" } else { "s" },
            self.config.iqr_multiplier
        );
        Pattern {
            details: PatternDetails::Outlier(flagged),
            fields: vec![field.to_string()],
            confidence: OUTLIER_CONFIDENCE,
            strength: Strength::Strong,
            description,
        }
    }

    /// K-means over the first two numeric fields, by position.
    ///
    /// Needs two numeric fields and enough rows holding both values. Only
    /// reported when more than one cluster ends up non-empty.
    pub fn cluster_pattern(
        &self,
        dataset: &Dataset,
        numeric_fields: &[String],
        rng: &mut dyn RandomSource,
    ) -> Option<Pattern> {
        let [x_field, y_field, ..] = numeric_fields else {
            trace!("Skipping clustering: fewer than two numeric fields");
            return None;
        };

        let (xs, ys) = FieldTyper::paired_values(dataset, x_field, y_field);
        let points: Vec<Point> = xs.into_iter().zip(ys).map(|(x, y)| [x, y]).collect();
        let k = self.clustering.k;
        if points.len() < self.clustering.min_points.max(k) {
            debug!(
                x = %x_field,
                y = %y_field,
                points = points.len(),
                "Skipping clustering: insufficient data"
            );
            return None;
        }

        let result = kmeans(&points, k, self.clustering.max_iterations, rng)?;
        let groups = result.non_empty_clusters();
        if groups <= 1 {
            debug!(x = %x_field, y = %y_field, "Skipping clustering: single group");
            return None;
        }

        let silhouette = silhouette_score(&points, &result.assignments, k);
        debug!(
            x = %x_field,
            y = %y_field,
            iterations = result.iterations,
            converged = result.converged,
            silhouette,
            "K-means finished"
        );

        Some(Pattern {
            details: PatternDetails::Cluster {
                sizes: result.sizes,
                centroids: result.centroids,
                assignments: result.assignments,
                silhouette,
                iterations: result.iterations,
            },
            fields: vec![x_field.clone(), y_field.clone()],
            confidence: silhouette.clamp(0.0, 1.0),
            strength: Strength::above(silhouette, 0.7, 0.5),
            description: format!(
                "{} and {} form {} groups (silhouette {:.2})",
                x_field, y_field, groups, silhouette
            ),
        })
    }

    fn passes_filter(&self, pattern: &Pattern) -> bool {
        pattern.kind().bypasses_confidence_filter()
            || pattern.confidence > self.config.min_confidence
    }
}

impl Default for PatternDetector {
    fn default() -> Self {
        Self::new()
    }
}
