//! Utility functions for mapping operations.

use migra_model::{ColumnMapping, MigrationConfig};

use crate::catalog;
use crate::error::MapError;

fn fold_accent(ch: char) -> char {
    match ch {
        'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        other => other,
    }
}

/// Normalizes text for comparison: lowercase, accents folded, separators
/// replaced by single spaces.
pub fn normalize_text(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .chars()
        .map(fold_accent)
        .map(|ch| match ch {
            '_' | '-' | '.' | '/' | '\\' => ' ',
            other => other,
        })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Map a header column onto a catalog field, replacing any previous mapping
/// of that field. `required` follows the catalog.
pub fn map_column(
    config: &mut MigrationConfig,
    headers: &[String],
    source_column: &str,
    target_field: &str,
    transform: Option<&str>,
) -> Result<(), MapError> {
    let def = catalog::field(target_field)
        .ok_or_else(|| MapError::UnknownField(target_field.to_string()))?;
    let column = headers
        .iter()
        .find(|h| h.as_str() == source_column)
        .ok_or_else(|| MapError::ColumnNotFound(source_column.to_string()))?;
    let mut mapping = ColumnMapping::new(column.clone(), def.id).required(def.required);
    if let Some(transform) = transform {
        mapping = mapping.with_transform(transform);
    }
    config.set_mapping(mapping);
    Ok(())
}

/// Header columns no mapping reads from, in header order.
pub fn unmapped_columns(config: &MigrationConfig, headers: &[String]) -> Vec<String> {
    headers
        .iter()
        .filter(|h| {
            !config
                .column_mapping
                .iter()
                .any(|m| m.source_column.eq_ignore_ascii_case(h))
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn normalize_folds_accents_and_separators() {
        assert_eq!(normalize_text("  Endereço_Completo "), "endereco completo");
        assert_eq!(normalize_text("E-mail"), "e mail");
        assert_eq!(normalize_text("Data  de/Nascimento"), "data de nascimento");
    }

    #[test]
    fn map_column_uses_catalog_required_flag() {
        let mut config = MigrationConfig::new("import");
        let cols = headers(&["Cliente", "Fone"]);
        map_column(&mut config, &cols, "Cliente", "name", None).unwrap();
        map_column(&mut config, &cols, "Fone", "phone", Some("phone_format")).unwrap();

        assert!(config.mapping_for("name").unwrap().required);
        assert_eq!(
            config.mapping_for("phone").unwrap().transform.as_deref(),
            Some("phone_format")
        );
    }

    #[test]
    fn map_column_rejects_unknown_inputs() {
        let mut config = MigrationConfig::new("import");
        let cols = headers(&["Cliente"]);
        assert_eq!(
            map_column(&mut config, &cols, "Cliente", "nickname", None),
            Err(MapError::UnknownField("nickname".to_string()))
        );
        assert_eq!(
            map_column(&mut config, &cols, "Apelido", "name", None),
            Err(MapError::ColumnNotFound("Apelido".to_string()))
        );
        assert!(config.column_mapping.is_empty());
    }

    #[test]
    fn unmapped_columns_in_header_order() {
        let config = MigrationConfig::new("import")
            .with_mapping(ColumnMapping::new("nome", "name"));
        let cols = headers(&["extra", "NOME", "outra"]);
        assert_eq!(unmapped_columns(&config, &cols), vec!["extra", "outra"]);
    }
}
