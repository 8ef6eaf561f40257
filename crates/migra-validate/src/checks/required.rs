//! Required field population.

use migra_model::{ColumnMapping, ValidationError};

pub const MSG_REQUIRED_EMPTY: &str = "required field empty";

/// Flag an empty value under a required mapping.
pub fn check(mapping: &ColumnMapping, value: &str, row: usize) -> Option<ValidationError> {
    if !mapping.required || !value.trim().is_empty() {
        return None;
    }
    Some(ValidationError {
        row,
        field: mapping.target_field.clone(),
        value: value.to_string(),
        message: MSG_REQUIRED_EMPTY.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_required_mappings_are_checked() {
        let optional = ColumnMapping::new("cpf", "cpf");
        assert!(check(&optional, "", 2).is_none());

        let required = ColumnMapping::new("nome", "name").required(true);
        assert!(check(&required, "Ana", 2).is_none());
        let issue = check(&required, "  ", 4).expect("issue");
        assert_eq!(issue.row, 4);
        assert_eq!(issue.field, "name");
        assert_eq!(issue.message, MSG_REQUIRED_EMPTY);
    }
}
