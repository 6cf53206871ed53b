//! Core type definitions shared by analysis results.

use serde::{Deserialize, Serialize};

/// Inferred kind of a field across the whole dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Every non-missing value converts to a finite number.
    Numeric,
    /// Every non-missing value is a boolean.
    Boolean,
    /// Every non-missing value is non-numeric text.
    Text,
    /// Non-missing values of more than one kind.
    Mixed,
    /// Every value is missing.
    Empty,
}

impl FieldKind {
    /// Returns true if this field takes part in numeric analysis.
    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldKind::Numeric)
    }
}

impl Default for FieldKind {
    fn default() -> Self {
        FieldKind::Empty
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldKind::Numeric => write!(f, "numeric"),
            FieldKind::Boolean => write!(f, "boolean"),
            FieldKind::Text => write!(f, "text"),
            FieldKind::Mixed => write!(f, "mixed"),
            FieldKind::Empty => write!(f, "empty"),
        }
    }
}

/// Qualitative strength bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strength {
    Weak,
    Moderate,
    Strong,
}

impl Strength {
    /// Bucket a score: strictly above `strong` is strong, strictly above
    /// `moderate` is moderate.
    pub fn above(score: f64, strong: f64, moderate: f64) -> Self {
        if score > strong {
            Strength::Strong
        } else if score > moderate {
            Strength::Moderate
        } else {
            Strength::Weak
        }
    }

    /// Bucket a score with inclusive boundaries.
    pub fn at_least(score: f64, strong: f64, moderate: f64) -> Self {
        if score >= strong {
            Strength::Strong
        } else if score >= moderate {
            Strength::Moderate
        } else {
            Strength::Weak
        }
    }
}

impl std::fmt::Display for Strength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strength::Weak => write!(f, "weak"),
            Strength::Moderate => write!(f, "moderate"),
            Strength::Strong => write!(f, "strong"),
        }
    }
}

/// Sign of a relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Positive,
    Negative,
}

impl Direction {
    pub fn of(value: f64) -> Self {
        if value >= 0.0 {
            Direction::Positive
        } else {
            Direction::Negative
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Positive => write!(f, "positive"),
            Direction::Negative => write!(f, "negative"),
        }
    }
}
