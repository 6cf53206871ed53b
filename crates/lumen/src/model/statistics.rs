//! Per-field descriptive statistics.

use serde::{Deserialize, Serialize};

/// Nearest-rank quartiles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quartiles {
    /// First quartile, `sorted[floor(n * 0.25)]`.
    pub q1: f64,
    /// `sorted[floor(n * 0.5)]`. Equals the median for odd `n`.
    pub q2: f64,
    /// Third quartile, `sorted[floor(n * 0.75)]`.
    pub q3: f64,
}

impl Quartiles {
    /// Interquartile range.
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    /// Lower and upper Tukey fences.
    pub fn fences(&self, multiplier: f64) -> (f64, f64) {
        let iqr = self.iqr();
        (self.q1 - multiplier * iqr, self.q3 + multiplier * iqr)
    }
}

/// Statistics for a numeric field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldStatistics {
    /// Number of non-missing values.
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    /// Every value attaining the highest frequency, ascending.
    pub mode: Vec<f64>,
    /// Population variance.
    pub variance: f64,
    pub standard_deviation: f64,
    pub min: f64,
    pub max: f64,
    pub range: f64,
    pub quartiles: Quartiles,
    pub skewness: f64,
    /// Excess kurtosis.
    pub kurtosis: f64,
    /// Values outside the 1.5×IQR fences, in input order.
    pub outliers: Vec<f64>,
    /// Missing values in the source field.
    pub null_count: usize,
    pub unique_count: usize,
}

impl FieldStatistics {
    /// Calculate the interquartile range.
    pub fn iqr(&self) -> f64 {
        self.quartiles.iqr()
    }

    /// Check if a value is an outlier using the IQR method.
    pub fn is_outlier_iqr(&self, value: f64, multiplier: f64) -> bool {
        let (lower, upper) = self.quartiles.fences(multiplier);
        value < lower || value > upper
    }

    /// Calculate the z-score for a value.
    pub fn z_score(&self, value: f64) -> f64 {
        if self.standard_deviation == 0.0 {
            0.0
        } else {
            (value - self.mean) / self.standard_deviation
        }
    }

    /// Coefficient of variation, 0 when the mean is 0.
    pub fn coefficient_of_variation(&self) -> f64 {
        if self.mean == 0.0 {
            0.0
        } else {
            self.standard_deviation / self.mean.abs()
        }
    }
}
