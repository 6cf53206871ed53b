//! In-memory dataset representation and source metadata.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// A scalar cell value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Null or absent.
    Missing,
    Number(f64),
    Bool(bool),
    Text(String),
}

impl Value {
    /// Check if the value counts as missing (null, absent, or blank text).
    pub fn is_missing(&self) -> bool {
        match self {
            Value::Missing => true,
            Value::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Convert to a finite number, if possible.
    ///
    /// Numbers pass through, text is trimmed and parsed. Booleans are not
    /// coerced, and non-finite results (`"inf"`, `"NaN"`) are rejected.
    pub fn as_number(&self) -> Option<f64> {
        let n = match self {
            Value::Number(n) => *n,
            Value::Text(s) => s.trim().parse::<f64>().ok()?,
            Value::Missing | Value::Bool(_) => return None,
        };
        n.is_finite().then_some(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Missing)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Missing,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => n.as_f64().map(Value::Number).unwrap_or(Value::Missing),
            serde_json::Value::String(s) => Value::Text(s),
            // Nested structures are not scalars; keep them as opaque text so
            // the field is excluded from numeric analysis.
            other => Value::Text(other.to_string()),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Value::from)
    }
}

/// A single record: field name to scalar value, in source order.
pub type Row = IndexMap<String, Value>;

static MISSING: Value = Value::Missing;

/// An ordered collection of records.
///
/// The field set is discovered from the first row. Row order is significant
/// for trend and seasonality detection, which treat position as time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Row>", into = "Vec<Row>")]
pub struct Dataset {
    fields: Vec<String>,
    rows: Vec<Row>,
}

impl Dataset {
    /// Create a dataset from rows.
    pub fn new(rows: Vec<Row>) -> Self {
        let fields = rows
            .first()
            .map(|row| row.keys().cloned().collect())
            .unwrap_or_default();
        Self { fields, rows }
    }

    /// Build a dataset from named columns of equal length.
    ///
    /// Shorter columns are padded with missing values.
    pub fn from_columns<S, V>(columns: Vec<(S, Vec<V>)>) -> Self
    where
        S: Into<String>,
        V: Into<Value>,
    {
        let row_count = columns.iter().map(|(_, v)| v.len()).max().unwrap_or(0);
        let mut rows: Vec<Row> = (0..row_count).map(|_| Row::new()).collect();

        for (name, values) in columns {
            let name = name.into();
            let mut values = values.into_iter();
            for row in rows.iter_mut() {
                let value = values.next().map(Into::into).unwrap_or(Value::Missing);
                row.insert(name.clone(), value);
            }
        }

        Self::new(rows)
    }

    /// Field names, in the order of the first row.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// All rows.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of fields.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get all values for a field, in row order.
    ///
    /// Rows that lack the field yield [`Value::Missing`].
    pub fn field_values<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a Value> + 'a {
        self.rows
            .iter()
            .map(move |row| row.get(field).unwrap_or(&MISSING))
    }

    /// Get a specific cell value.
    pub fn get(&self, row: usize, field: &str) -> Option<&Value> {
        self.rows.get(row).and_then(|r| r.get(field))
    }
}

impl From<Vec<Row>> for Dataset {
    fn from(rows: Vec<Row>) -> Self {
        Self::new(rows)
    }
}

impl From<Dataset> for Vec<Row> {
    fn from(dataset: Dataset) -> Self {
        dataset.rows
    }
}

/// Metadata about a loaded data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Detected format.
    pub format: String,
    /// Number of records.
    pub row_count: usize,
    /// Number of fields discovered from the first record.
    pub field_count: usize,
    /// When the file was loaded.
    pub loaded_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Create metadata for a file that has been loaded.
    pub fn new(
        path: PathBuf,
        hash: String,
        size_bytes: u64,
        row_count: usize,
        field_count: usize,
    ) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file,
            path,
            hash,
            size_bytes,
            format: "json".to_string(),
            row_count,
            field_count,
            loaded_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_values() {
        assert!(Value::Missing.is_missing());
        assert!(Value::from("").is_missing());
        assert!(Value::from("   ").is_missing());
        assert!(!Value::from("0").is_missing());
        assert!(!Value::from(0.0).is_missing());
        assert!(!Value::from(false).is_missing());
    }

    #[test]
    fn test_as_number() {
        assert_eq!(Value::from(2.5).as_number(), Some(2.5));
        assert_eq!(Value::from(" 42 ").as_number(), Some(42.0));
        assert_eq!(Value::from("1e3").as_number(), Some(1000.0));
        assert_eq!(Value::from("abc").as_number(), None);
        assert_eq!(Value::from("inf").as_number(), None);
        assert_eq!(Value::from("NaN").as_number(), None);
        assert_eq!(Value::from(true).as_number(), None);
        assert_eq!(Value::Number(f64::NAN).as_number(), None);
    }

    #[test]
    fn test_fields_from_first_row() {
        let dataset = Dataset::from_columns(vec![
            ("clicks", vec![Value::from(1.0), Value::from(2.0)]),
            ("channel", vec![Value::from("email"), Value::from("ads")]),
        ]);
        assert_eq!(dataset.fields(), &["clicks".to_string(), "channel".to_string()]);
        assert_eq!(dataset.row_count(), 2);
        assert_eq!(dataset.get(1, "channel"), Some(&Value::from("ads")));
    }

    #[test]
    fn test_absent_field_is_missing() {
        let mut first = Row::new();
        first.insert("a".to_string(), Value::from(1.0));
        first.insert("b".to_string(), Value::from(2.0));
        let mut second = Row::new();
        second.insert("a".to_string(), Value::from(3.0));

        let dataset = Dataset::new(vec![first, second]);
        let b: Vec<&Value> = dataset.field_values("b").collect();
        assert_eq!(b, vec![&Value::from(2.0), &Value::Missing]);
    }

    #[test]
    fn test_deserialize_nested_as_text() {
        let value: Value = serde_json::from_str(r#"{"a": 1}"#).unwrap();
        assert!(matches!(value, Value::Text(_)));
        let value: Value = serde_json::from_str("null").unwrap();
        assert_eq!(value, Value::Missing);
    }
}
