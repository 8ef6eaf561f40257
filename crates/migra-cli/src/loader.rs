//! Config and record store files.
//!
//! Configs are JSON or TOML, picked by extension. The record store is a JSON
//! array of client records; a missing store file is an empty store.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use migra_core::InMemoryStore;
use migra_map::{apply_template, suggest_mappings, suggest_template};
use migra_model::{ClientRecord, MigrationConfig};
use tracing::{debug, info};

/// Minimum Jaro-Winkler confidence for column suggestions when no template
/// fits the header.
pub const SUGGESTION_CONFIDENCE: f32 = 0.85;

/// Load a `MigrationConfig` from a `.json` or `.toml` file.
pub fn load_config(path: &Path) -> Result<MigrationConfig> {
    let text =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    let config: MigrationConfig = match extension.as_deref() {
        Some("toml") => {
            toml::from_str(&text).with_context(|| format!("parse TOML {}", path.display()))?
        }
        Some("json") => serde_json::from_str(&text)
            .with_context(|| format!("parse JSON {}", path.display()))?,
        _ => bail!(
            "unsupported config format for {} (expected .json or .toml)",
            path.display()
        ),
    };
    config
        .validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(config)
}

/// Build a config from a named template.
pub fn config_from_template(key: &str) -> Result<MigrationConfig> {
    let mut config = MigrationConfig::new(key);
    apply_template(&mut config, key)?;
    Ok(config)
}

/// Pick a config for a file header: the best-covering template, otherwise
/// fuzzy column suggestions.
pub fn detect_config(headers: &[String]) -> Result<MigrationConfig> {
    if let Some(found) = suggest_template(headers) {
        info!(
            template = found.template.key,
            coverage = found.coverage,
            "detected template"
        );
        return config_from_template(found.template.key);
    }
    let suggestions = suggest_mappings(headers, SUGGESTION_CONFIDENCE);
    if suggestions.mappings.is_empty() {
        bail!("could not detect a column layout; pass --config or --template");
    }
    debug!(
        mapped = suggestions.mappings.len(),
        unmapped = suggestions.unmapped_columns.len(),
        "using suggested mappings"
    );
    let mut config = MigrationConfig::new("detected");
    for suggestion in suggestions.mappings {
        config.set_mapping(suggestion.into_mapping());
    }
    Ok(config)
}

/// Load existing client records. A missing file yields an empty store.
pub fn load_store(path: &Path) -> Result<InMemoryStore> {
    Ok(read_records(path)?.into_iter().collect())
}

fn read_records(path: &Path) -> Result<Vec<ClientRecord>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let text =
        fs::read_to_string(path).with_context(|| format!("read store {}", path.display()))?;
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(&text).with_context(|| format!("parse store {}", path.display()))
}

/// Append records to the store file, keeping what is already there.
pub fn append_to_store(path: &Path, records: &[ClientRecord]) -> Result<usize> {
    let mut all = read_records(path)?;
    all.extend_from_slice(records);
    let json = serde_json::to_string_pretty(&all).context("encode store")?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    fs::write(path, json).with_context(|| format!("write store {}", path.display()))?;
    Ok(all.len())
}
