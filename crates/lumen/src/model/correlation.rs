//! Correlation results.

use serde::{Deserialize, Serialize};

use super::types::{Direction, Strength};

/// A surfaced correlation between two numeric fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationResult {
    pub field1: String,
    pub field2: String,
    /// Pearson coefficient in [-1, 1].
    #[serde(alias = "correlation")]
    pub coefficient: f64,
    pub strength: Strength,
    pub direction: Direction,
    /// Approximate two-tailed p-value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p_value: Option<f64>,
    /// Rows where both fields were present.
    pub sample_size: usize,
}

impl CorrelationResult {
    /// Check whether this result concerns the given pair, in either order.
    pub fn involves(&self, a: &str, b: &str) -> bool {
        (self.field1 == a && self.field2 == b) || (self.field1 == b && self.field2 == a)
    }

    /// Whether the p-value, when present, is below `alpha`.
    pub fn is_significant(&self, alpha: f64) -> bool {
        self.p_value.is_some_and(|p| p < alpha)
    }
}

/// Full pairwise coefficient matrix over numeric fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub fields: Vec<String>,
    /// Row-major, `values[i][j]` is the coefficient of `fields[i]` and `fields[j]`.
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Look up a coefficient by field names.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.fields.iter().position(|f| f == a)?;
        let j = self.fields.iter().position(|f| f == b)?;
        Some(self.values[i][j])
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
