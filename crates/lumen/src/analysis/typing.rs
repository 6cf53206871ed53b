//! Field classification and numeric extraction.

use indexmap::IndexMap;
use tracing::trace;

use crate::input::{Dataset, Value};
use crate::model::FieldKind;

/// Classifies fields and extracts clean numeric vectors.
///
/// A field is numeric when every non-missing value is a number or text that
/// parses to a finite number. Booleans are not coerced. A field whose values
/// are all missing qualifies vacuously and yields an empty sequence, which
/// every downstream component treats as insufficient data.
pub struct FieldTyper;

impl FieldTyper {
    /// Classify a single field across all rows.
    pub fn classify_field(dataset: &Dataset, field: &str) -> FieldKind {
        let mut numbers = false;
        let mut booleans = false;
        let mut text = false;

        for value in dataset.field_values(field) {
            if value.is_missing() {
                continue;
            }
            match value {
                Value::Bool(_) => booleans = true,
                v if v.as_number().is_some() => numbers = true,
                _ => text = true,
            }
        }

        match (numbers, booleans, text) {
            (false, false, false) => FieldKind::Empty,
            (true, false, false) => FieldKind::Numeric,
            (false, true, false) => FieldKind::Boolean,
            (false, false, true) => FieldKind::Text,
            _ => FieldKind::Mixed,
        }
    }

    /// Classify every field, in field order.
    pub fn classify(dataset: &Dataset) -> IndexMap<String, FieldKind> {
        dataset
            .fields()
            .iter()
            .map(|field| (field.clone(), Self::classify_field(dataset, field)))
            .collect()
    }

    /// Check whether every non-missing value of the field is numeric.
    pub fn is_numeric_field(dataset: &Dataset, field: &str) -> bool {
        dataset
            .field_values(field)
            .all(|v| v.is_missing() || v.as_number().is_some())
    }

    /// Names of numeric fields, in field order.
    pub fn numeric_fields(dataset: &Dataset) -> Vec<String> {
        dataset
            .fields()
            .iter()
            .filter(|field| {
                let numeric = Self::is_numeric_field(dataset, field);
                if !numeric {
                    trace!(field = %field, "Excluding non-numeric field");
                }
                numeric
            })
            .cloned()
            .collect()
    }

    /// Non-missing values of a field converted to numbers, in row order.
    ///
    /// Values that do not convert are skipped; for fields that pass
    /// [`FieldTyper::is_numeric_field`] nothing is skipped.
    pub fn numeric_values(dataset: &Dataset, field: &str) -> Vec<f64> {
        dataset
            .field_values(field)
            .filter(|v| !v.is_missing())
            .filter_map(Value::as_number)
            .collect()
    }

    /// Row-aligned values for two fields.
    ///
    /// Only rows where both fields hold a number contribute, so the two
    /// sequences always have equal length and index `i` of each comes from
    /// the same row.
    pub fn paired_values(dataset: &Dataset, a: &str, b: &str) -> (Vec<f64>, Vec<f64>) {
        dataset
            .field_values(a)
            .zip(dataset.field_values(b))
            .filter_map(|(x, y)| Some((x.as_number()?, y.as_number()?)))
            .unzip()
    }

    /// Count missing values in a field.
    pub fn missing_count(dataset: &Dataset, field: &str) -> usize {
        dataset.field_values(field).filter(|v| v.is_missing()).count()
    }
}
