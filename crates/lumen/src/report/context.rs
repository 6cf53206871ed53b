//! Caller-supplied context for report prompts.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Background about a dataset that the numbers alone do not carry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportContext {
    /// Name of the dataset or project.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Business or research domain (e.g., "marketing", "operations").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,

    /// What each row represents (e.g., "one day of store sales").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_meaning: Option<String>,

    /// Short descriptions of individual fields.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub field_notes: IndexMap<String, String>,

    /// Free-form key/value notes.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub notes: IndexMap<String, String>,
}

impl ReportContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn with_row_meaning(mut self, meaning: impl Into<String>) -> Self {
        self.row_meaning = Some(meaning.into());
        self
    }

    /// Describe a field.
    pub fn with_field_note(mut self, field: impl Into<String>, note: impl Into<String>) -> Self {
        self.field_notes.insert(field.into(), note.into());
        self
    }

    pub fn with_note(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.notes.insert(key.into(), value.into());
        self
    }

    /// Check whether any context was given.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.domain.is_none()
            && self.row_meaning.is_none()
            && self.field_notes.is_empty()
            && self.notes.is_empty()
    }

    /// Render as prompt lines.
    pub fn to_prompt_string(&self) -> String {
        let mut parts = Vec::new();

        if let Some(ref title) = self.title {
            parts.push(format!("Dataset: {}", title));
        }
        if let Some(ref domain) = self.domain {
            parts.push(format!("Domain: {}", domain));
        }
        if let Some(ref meaning) = self.row_meaning {
            parts.push(format!("Each row: {}", meaning));
        }
        for (field, note) in &self.field_notes {
            parts.push(format!("Field '{}': {}", field, note));
        }
        for (key, value) in &self.notes {
            parts.push(format!("{}: {}", key, value));
        }

        if parts.is_empty() {
            "No additional context provided.".to_string()
        } else {
            parts.join("\n")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_context() {
        let ctx = ReportContext::new();
        assert!(ctx.is_empty());
        assert_eq!(ctx.to_prompt_string(), "No additional context provided.");
    }

    #[test]
    fn test_prompt_string_keeps_order() {
        let ctx = ReportContext::new()
            .with_title("Q3 campaigns")
            .with_domain("marketing")
            .with_field_note("spend", "daily ad spend in USD")
            .with_field_note("clicks", "paid clicks");

        assert!(!ctx.is_empty());
        let prompt = ctx.to_prompt_string();
        assert!(prompt.starts_with("Dataset: Q3 campaigns\nDomain: marketing"));
        let spend = prompt.find("Field 'spend'").unwrap();
        let clicks = prompt.find("Field 'clicks'").unwrap();
        assert!(spend < clicks);
    }

    #[test]
    fn test_deserialize_partial() {
        let ctx: ReportContext = serde_json::from_str(r#"{"domain": "retail"}"#).unwrap();
        assert_eq!(ctx.domain.as_deref(), Some("retail"));
        assert!(ctx.field_notes.is_empty());
    }
}
