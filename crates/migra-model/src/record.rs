use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Client record assembled from mapped and transformed values.
///
/// Candidate records produced by the transform stage have an empty `id` and
/// no `created_at`; both are assigned when the executor accepts the record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientRecord {
    pub id: String,
    pub name: String,
    pub cpf: String,
    pub email: String,
    pub phone: String,
    pub birth_date: String,
    pub gender: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub referral_source: String,
    pub tags: Vec<String>,
    /// Free text; medical inputs are rendered here as `field: value` lines.
    pub notes: String,
    /// Medical inputs keyed by field id.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub medical: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl ClientRecord {
    /// Append a line to `notes`.
    pub fn append_note(&mut self, line: &str) {
        if !self.notes.is_empty() {
            self.notes.push('\n');
        }
        self.notes.push_str(line);
    }

    /// Add a tag unless it is blank or already present.
    pub fn add_tag(&mut self, tag: &str) {
        let trimmed = tag.trim();
        if trimmed.is_empty() || self.tags.iter().any(|t| t == trimmed) {
            return;
        }
        self.tags.push(trimmed.to_string());
    }
}
