//! JSON record loader.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::debug;

use super::source::{Dataset, Row, SourceMetadata, Value};
use crate::error::{LumenError, Result};

/// Loader configuration.
#[derive(Debug, Clone, Default)]
pub struct LoaderConfig {
    /// Maximum records to keep (None = all).
    pub max_rows: Option<usize>,
}

/// Loads datasets from a JSON array of flat records.
pub struct Loader {
    config: LoaderConfig,
}

impl Loader {
    /// Create a new loader with default configuration.
    pub fn new() -> Self {
        Self {
            config: LoaderConfig::default(),
        }
    }

    /// Create a loader with custom configuration.
    pub fn with_config(config: LoaderConfig) -> Self {
        Self { config }
    }

    /// Load a file and return the dataset and metadata.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<(Dataset, SourceMetadata)> {
        let path = path.as_ref();

        let mut file = File::open(path).map_err(|e| LumenError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut contents = Vec::new();
        file.read_to_end(&mut contents).map_err(|e| LumenError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let dataset = self.load_slice(&contents)?;
        debug!(
            path = %path.display(),
            rows = dataset.row_count(),
            fields = dataset.field_count(),
            "Loaded dataset"
        );

        let metadata = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            contents.len() as u64,
            dataset.row_count(),
            dataset.field_count(),
        );

        Ok((dataset, metadata))
    }

    /// Parse bytes directly.
    ///
    /// Blank input is rejected as empty data rather than a JSON syntax error.
    pub fn load_slice(&self, bytes: &[u8]) -> Result<Dataset> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(LumenError::EmptyData("input contains no JSON".to_string()));
        }
        let json: serde_json::Value = serde_json::from_slice(bytes)?;
        self.load_json(json)
    }

    /// Convert an already-parsed JSON document.
    ///
    /// The document must be an array whose elements are objects. Anything
    /// else is rejected as invalid input.
    pub fn load_json(&self, json: serde_json::Value) -> Result<Dataset> {
        let items = match json {
            serde_json::Value::Array(items) => items,
            other => {
                return Err(LumenError::InvalidInput(format!(
                    "expected a JSON array of records, found {}",
                    json_kind(&other)
                )));
            }
        };

        let limit = self.config.max_rows.unwrap_or(usize::MAX);
        let mut rows = Vec::with_capacity(items.len().min(limit));

        for (index, item) in items.into_iter().take(limit).enumerate() {
            let map = match item {
                serde_json::Value::Object(map) => map,
                other => {
                    return Err(LumenError::InvalidInput(format!(
                        "record {} is {}, expected an object",
                        index,
                        json_kind(&other)
                    )));
                }
            };
            let row: Row = map.into_iter().map(|(k, v)| (k, Value::from(v))).collect();
            rows.push(row);
        }

        Ok(Dataset::new(rows))
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
