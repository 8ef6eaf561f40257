//! In-file duplicate detection on normalized CPF and lowercased email.
//!
//! Every row sharing a key with another row is reported, each under its own
//! row number. Duplicates are informational and never invalidate a row.

use std::collections::HashMap;

use migra_model::{MigrationConfig, Row, ValidationError};

pub const MSG_DUPLICATE_CPF: &str = "duplicate CPF in file";
pub const MSG_DUPLICATE_EMAIL: &str = "duplicate email in file";

/// Strip everything but ASCII digits.
pub fn normalize_cpf(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

fn normalize_email(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Occurrence counts of every key across the whole file.
pub struct DuplicateIndex<'a> {
    cpf_column: Option<&'a str>,
    email_column: Option<&'a str>,
    cpf_counts: HashMap<String, usize>,
    email_counts: HashMap<String, usize>,
}

impl<'a> DuplicateIndex<'a> {
    pub fn build(rows: &[Row], config: &'a MigrationConfig) -> Self {
        let mut index = Self {
            cpf_column: config.mapping_for("cpf").map(|m| m.source_column.as_str()),
            email_column: config
                .mapping_for("email")
                .map(|m| m.source_column.as_str()),
            cpf_counts: HashMap::new(),
            email_counts: HashMap::new(),
        };
        for row in rows {
            if let Some(key) = index.cpf_key(row) {
                *index.cpf_counts.entry(key).or_default() += 1;
            }
            if let Some(key) = index.email_key(row) {
                *index.email_counts.entry(key).or_default() += 1;
            }
        }
        index
    }

    fn cpf_key(&self, row: &Row) -> Option<String> {
        let key = normalize_cpf(row.value(self.cpf_column?));
        (!key.is_empty()).then_some(key)
    }

    fn email_key(&self, row: &Row) -> Option<String> {
        let key = normalize_email(row.value(self.email_column?));
        (!key.is_empty()).then_some(key)
    }

    /// Duplicate findings for one row, CPF first.
    pub fn findings(&self, row: &Row, row_number: usize) -> Vec<ValidationError> {
        let mut found = Vec::new();
        if let (Some(column), Some(key)) = (self.cpf_column, self.cpf_key(row)) {
            if self.cpf_counts.get(&key).copied().unwrap_or(0) > 1 {
                found.push(ValidationError {
                    row: row_number,
                    field: "cpf".to_string(),
                    value: row.value(column).to_string(),
                    message: MSG_DUPLICATE_CPF.to_string(),
                });
            }
        }
        if let (Some(column), Some(key)) = (self.email_column, self.email_key(row)) {
            if self.email_counts.get(&key).copied().unwrap_or(0) > 1 {
                found.push(ValidationError {
                    row: row_number,
                    field: "email".to_string(),
                    value: row.value(column).to_string(),
                    message: MSG_DUPLICATE_EMAIL.to_string(),
                });
            }
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use migra_model::ColumnMapping;

    use super::*;

    fn config() -> MigrationConfig {
        MigrationConfig::new("import")
            .with_mapping(ColumnMapping::new("cpf", "cpf"))
            .with_mapping(ColumnMapping::new("email", "email"))
    }

    fn row(cpf: &str, email: &str) -> Row {
        [("cpf", cpf), ("email", email)].into_iter().collect()
    }

    #[test]
    fn normalize_cpf_keeps_digits() {
        assert_eq!(normalize_cpf("529.982.247-25"), "52998224725");
        assert_eq!(normalize_cpf(" abc "), "");
    }

    #[test]
    fn email_match_is_case_insensitive() {
        let config = config();
        let rows = vec![row("", "Ana@X.com"), row("", "ana@x.com ")];
        let index = DuplicateIndex::build(&rows, &config);
        assert_eq!(index.findings(&rows[0], 2).len(), 1);
        assert_eq!(index.findings(&rows[1], 3)[0].message, MSG_DUPLICATE_EMAIL);
    }

    #[test]
    fn empty_keys_never_collide() {
        let config = config();
        let rows = vec![row("", ""), row("", "")];
        let index = DuplicateIndex::build(&rows, &config);
        assert!(index.findings(&rows[0], 2).is_empty());
        assert!(index.findings(&rows[1], 3).is_empty());
    }

    #[test]
    fn unmapped_keys_are_ignored() {
        let config = MigrationConfig::new("import");
        let rows = vec![row("1", "a@b.c"), row("1", "a@b.c")];
        let index = DuplicateIndex::build(&rows, &config);
        assert!(index.findings(&rows[0], 2).is_empty());
    }
}
