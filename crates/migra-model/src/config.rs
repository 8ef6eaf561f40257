//! Migration configuration authored once per import session.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Scope of an import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportType {
    /// Registration data only; medical fields are ignored.
    Basic,
    /// Registration data plus every enabled category.
    #[default]
    Complete,
}

impl ImportType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Complete => "complete",
        }
    }
}

impl fmt::Display for ImportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImportType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "basic" => Ok(Self::Basic),
            "complete" => Ok(Self::Complete),
            _ => Err(ModelError::UnknownImportType(s.to_string())),
        }
    }
}

/// Association between a source file column and a canonical field id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnMapping {
    /// Header name in the source file.
    pub source_column: String,
    /// Field catalog id (e.g. "name", "cpf").
    pub target_field: String,
    /// Whether an empty value makes the row invalid.
    #[serde(default)]
    pub required: bool,
    /// Optional transform id (e.g. "phone_format").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform: Option<String>,
}

impl ColumnMapping {
    pub fn new(source_column: impl Into<String>, target_field: impl Into<String>) -> Self {
        Self {
            source_column: source_column.into(),
            target_field: target_field.into(),
            required: false,
            transform: None,
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_transform(mut self, transform: impl Into<String>) -> Self {
        self.transform = Some(transform.into());
        self
    }
}

/// Options controlling what an import brings in and how it treats duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MigrationOptions {
    /// Has no effect: basic fields carry the required name and phone, so
    /// they are always imported.
    pub basic: bool,
    pub medical: bool,
    pub appointments: bool,
    pub treatments: bool,
    pub photos: bool,
    pub documents: bool,
    /// Skip candidates that match an existing record by CPF or email.
    pub skip_duplicates: bool,
    /// Carried for the caller; the pipeline never mutates existing records.
    pub update_existing: bool,
    /// Add `default_tags` to every imported record.
    pub create_tags: bool,
    pub default_tags: Vec<String>,
    /// Unit (clinic branch) assigned to every imported record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_id: Option<String>,
}

impl Default for MigrationOptions {
    fn default() -> Self {
        Self {
            basic: true,
            medical: true,
            appointments: true,
            treatments: true,
            photos: true,
            documents: true,
            skip_duplicates: true,
            update_existing: false,
            create_tags: true,
            default_tags: Vec::new(),
            unit_id: None,
        }
    }
}

/// Complete description of one import session.
///
/// A config is only ever borrowed by the pipeline, so it cannot change
/// during a preview/execute cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationConfig {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_system: Option<String>,
    #[serde(default)]
    pub import_type: ImportType,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub column_mapping: Vec<ColumnMapping>,
    #[serde(default)]
    pub options: MigrationOptions,
}

impl MigrationConfig {
    /// Create an empty config with a fresh id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            source_system: None,
            import_type: ImportType::default(),
            tags: Vec::new(),
            column_mapping: Vec::new(),
            options: MigrationOptions::default(),
        }
    }

    pub fn with_source_system(mut self, source_system: impl Into<String>) -> Self {
        self.source_system = Some(source_system.into());
        self
    }

    pub fn with_import_type(mut self, import_type: ImportType) -> Self {
        self.import_type = import_type;
        self
    }

    pub fn with_options(mut self, options: MigrationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_mapping(mut self, mapping: ColumnMapping) -> Self {
        self.set_mapping(mapping);
        self
    }

    /// Add a tag, ignoring blanks and repeats.
    pub fn add_tag(&mut self, tag: impl Into<String>) {
        let tag = tag.into();
        let trimmed = tag.trim();
        if trimmed.is_empty() || self.tags.iter().any(|t| t == trimmed) {
            return;
        }
        self.tags.push(trimmed.to_string());
    }

    /// Insert or replace the mapping for `mapping.target_field`.
    ///
    /// A field has at most one active mapping; a replacement keeps the
    /// position of the mapping it replaces.
    pub fn set_mapping(&mut self, mapping: ColumnMapping) {
        match self
            .column_mapping
            .iter_mut()
            .find(|m| m.target_field == mapping.target_field)
        {
            Some(existing) => *existing = mapping,
            None => self.column_mapping.push(mapping),
        }
    }

    /// Remove the mapping for a field. Returns the removed mapping.
    pub fn remove_mapping(&mut self, target_field: &str) -> Option<ColumnMapping> {
        let idx = self
            .column_mapping
            .iter()
            .position(|m| m.target_field == target_field)?;
        Some(self.column_mapping.remove(idx))
    }

    pub fn mapping_for(&self, target_field: &str) -> Option<&ColumnMapping> {
        self.column_mapping
            .iter()
            .find(|m| m.target_field == target_field)
    }

    /// Label used in provenance notes.
    pub fn source_label(&self) -> &str {
        self.source_system
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or("previous system")
    }

    /// Check invariants a hand-written config file may violate.
    pub fn validate(&self) -> Result<()> {
        let mut seen = BTreeSet::new();
        for mapping in &self.column_mapping {
            if mapping.source_column.trim().is_empty() {
                return Err(ModelError::InvalidConfig(format!(
                    "mapping for '{}' has an empty source column",
                    mapping.target_field
                )));
            }
            if !seen.insert(mapping.target_field.as_str()) {
                return Err(ModelError::InvalidConfig(format!(
                    "field '{}' is mapped more than once",
                    mapping.target_field
                )));
            }
        }
        Ok(())
    }
}
