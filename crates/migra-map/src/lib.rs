//! Field catalog, migration templates and column mapping.
//!
//! - [`catalog`]: the static list of importable client fields
//! - [`templates`]: pre-built mappings for known source systems
//! - [`suggest`]: header-driven template detection and fuzzy mapping hints

#![deny(unsafe_code)]

pub mod catalog;
mod error;
pub mod suggest;
pub mod templates;
mod utils;

pub use catalog::{FieldDef, FieldKind, FieldNamespace, all_fields, field, fields_in, namespace_of};
pub use error::MapError;
pub use suggest::{
    MIN_TEMPLATE_COVERAGE, MappingSuggestion, SuggestionResult, TemplateMatch, suggest_mappings,
    suggest_template,
};
pub use templates::{MigrationTemplate, apply_template, template, templates};
pub use utils::{map_column, normalize_text, unmapped_columns};
