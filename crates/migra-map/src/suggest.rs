//! Header-driven template detection and fuzzy mapping suggestions.
//!
//! Uses Jaro-Winkler similarity over normalized header text against each
//! field's id, label and known aliases.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use rapidfuzz::distance::jaro_winkler::similarity as jaro_similarity;
use serde::Serialize;

use migra_model::ColumnMapping;

use crate::catalog::{self, FieldDef, FieldKind};
use crate::templates::{self, MigrationTemplate};
use crate::utils::normalize_text;

/// Minimum share of the header's columns a template must account for.
pub const MIN_TEMPLATE_COVERAGE: f32 = 0.5;

/// A template that fits the header of an export.
#[derive(Debug, Clone, Copy)]
pub struct TemplateMatch {
    pub template: &'static MigrationTemplate,
    /// Template columns found in the header.
    pub matched: usize,
    /// Share of the header's columns the template reads.
    pub coverage: f32,
}

/// Pick the template that reads the most columns of the header.
///
/// A template is only a candidate when every required source column is in
/// the header and it reads at least [`MIN_TEMPLATE_COVERAGE`] of the header.
/// Ties on matched columns go to the template with fewer unmatched columns
/// of its own, then to the earlier template.
pub fn suggest_template(headers: &[String]) -> Option<TemplateMatch> {
    let normalized: BTreeSet<String> = headers
        .iter()
        .map(|h| normalize_text(h))
        .filter(|h| !h.is_empty())
        .collect();
    if normalized.is_empty() {
        return None;
    }
    let present = |column: &str| normalized.contains(&normalize_text(column));

    let mut best: Option<(TemplateMatch, f32)> = None;
    for template in templates::templates() {
        if template.is_empty() || !template.required_columns().all(present) {
            continue;
        }
        let matched = template.source_columns().filter(|c| present(c)).count();
        let coverage = matched as f32 / normalized.len() as f32;
        if coverage < MIN_TEMPLATE_COVERAGE {
            continue;
        }
        let template_share = matched as f32 / template.len() as f32;
        let better = match &best {
            None => true,
            Some((current, current_share)) => match matched.cmp(&current.matched) {
                Ordering::Greater => true,
                Ordering::Equal => template_share > *current_share,
                Ordering::Less => false,
            },
        };
        if better {
            let found = TemplateMatch {
                template,
                matched,
                coverage,
            };
            best = Some((found, template_share));
        }
    }
    let (found, _) = best?;
    tracing::debug!(
        template = found.template.key,
        matched = found.matched,
        coverage = found.coverage,
        "detected template"
    );
    Some(found)
}

/// A suggested mapping from a header column to a catalog field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingSuggestion {
    pub source_column: String,
    pub target_field: String,
    /// Confidence score (0.0 to 1.0).
    pub confidence: f32,
}

impl MappingSuggestion {
    /// Turn the suggestion into a mapping with the catalog's required flag and
    /// the customary transform for the field.
    pub fn into_mapping(self) -> ColumnMapping {
        let def = catalog::field(&self.target_field);
        let mut mapping = ColumnMapping::new(self.source_column, self.target_field)
            .required(def.is_some_and(|d| d.required));
        if let Some(transform) = def.and_then(default_transform) {
            mapping = mapping.with_transform(transform);
        }
        mapping
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionResult {
    pub mappings: Vec<MappingSuggestion>,
    pub unmapped_columns: Vec<String>,
}

fn default_transform(def: &FieldDef) -> Option<&'static str> {
    match (def.id, def.kind) {
        ("cpf", _) => Some("cpf_format"),
        ("state", _) => Some("uppercase"),
        (_, FieldKind::Phone) => Some("phone_format"),
        (_, FieldKind::Email) => Some("lowercase"),
        (_, FieldKind::Date) => Some("date_format"),
        _ => None,
    }
}

fn score(column: &str, def: &FieldDef) -> f32 {
    let candidates = [def.id, def.label]
        .into_iter()
        .chain(def.aliases.iter().copied());
    candidates
        .map(|candidate| {
            let target = normalize_text(candidate);
            if target == column {
                1.0
            } else {
                jaro_similarity(column.chars(), target.chars()) as f32
            }
        })
        .fold(0.0, f32::max)
}

/// Suggest a field for each header column.
///
/// Every pair scoring at least `min_confidence` is a candidate; candidates
/// are accepted greedily by score so each column and each field is used at
/// most once. Columns left over are reported as unmapped.
pub fn suggest_mappings(headers: &[String], min_confidence: f32) -> SuggestionResult {
    let mut candidates: Vec<(usize, &'static FieldDef, f32)> = Vec::new();
    for (idx, header) in headers.iter().enumerate() {
        let column = normalize_text(header);
        if column.is_empty() {
            continue;
        }
        for def in catalog::all_fields() {
            let value = score(&column, def);
            if value >= min_confidence {
                candidates.push((idx, def, value));
            }
        }
    }
    candidates.sort_by(|a, b| {
        b.2.partial_cmp(&a.2)
            .unwrap_or(Ordering::Equal)
            .then(a.0.cmp(&b.0))
    });

    let mut used_columns = BTreeSet::new();
    let mut used_fields = BTreeSet::new();
    let mut accepted: Vec<(usize, MappingSuggestion)> = Vec::new();
    for (idx, def, value) in candidates {
        if used_columns.contains(&idx) || used_fields.contains(def.id) {
            continue;
        }
        used_columns.insert(idx);
        used_fields.insert(def.id);
        accepted.push((
            idx,
            MappingSuggestion {
                source_column: headers[idx].clone(),
                target_field: def.id.to_string(),
                confidence: value.min(1.0),
            },
        ));
    }
    accepted.sort_by_key(|(idx, _)| *idx);

    let unmapped_columns = headers
        .iter()
        .enumerate()
        .filter(|(idx, _)| !used_columns.contains(idx))
        .map(|(_, h)| h.clone())
        .collect();

    SuggestionResult {
        mappings: accepted.into_iter().map(|(_, s)| s).collect(),
        unmapped_columns,
    }
}
