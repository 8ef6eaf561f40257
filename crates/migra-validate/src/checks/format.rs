//! Email and CPF shape checks.
//!
//! Applied only when a value is present. The CPF rule is a shape check (11
//! digits, not all the same digit); it does not verify the check digits.

use std::sync::LazyLock;

use migra_model::{ColumnMapping, ValidationError};
use regex::Regex;

use super::duplicates::normalize_cpf;

pub const MSG_INVALID_EMAIL: &str = "invalid email format";
pub const MSG_INVALID_CPF: &str = "invalid CPF";

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email regex"));

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value)
}

/// Exactly 11 digits once punctuation is stripped, and not one digit
/// repeated eleven times.
pub fn is_valid_cpf_shape(value: &str) -> bool {
    let digits = normalize_cpf(value);
    if digits.len() != 11 {
        return false;
    }
    let first = digits.as_bytes()[0];
    !digits.bytes().all(|b| b == first)
}

/// Run the format rule for the mapping's target field, if it has one.
pub fn check(mapping: &ColumnMapping, value: &str, row: usize) -> Option<ValidationError> {
    if value.trim().is_empty() {
        return None;
    }
    let message = match mapping.target_field.as_str() {
        "email" if !is_valid_email(value.trim()) => MSG_INVALID_EMAIL,
        "cpf" if !is_valid_cpf_shape(value) => MSG_INVALID_CPF,
        _ => return None,
    };
    Some(ValidationError {
        row,
        field: mapping.target_field.clone(),
        value: value.to_string(),
        message: message.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("ana@clinica.com.br"));
        assert!(is_valid_email("a@b.c"));
        assert!(!is_valid_email("ana@clinica"));
        assert!(!is_valid_email("ana clinica@x.com"));
        assert!(!is_valid_email("@x.com"));
        assert!(!is_valid_email("ana@@x.com"));
    }

    #[test]
    fn cpf_shapes() {
        assert!(is_valid_cpf_shape("529.982.247-25"));
        assert!(is_valid_cpf_shape("52998224725"));
        // shape only: wrong check digits still pass
        assert!(is_valid_cpf_shape("123.456.789-00"));
        assert!(!is_valid_cpf_shape("000.000.000-00"));
        assert!(!is_valid_cpf_shape("11111111111"));
        assert!(!is_valid_cpf_shape("1234567890"));
        assert!(!is_valid_cpf_shape("123456789012"));
    }

    #[test]
    fn empty_values_are_not_format_checked() {
        let mapping = ColumnMapping::new("email", "email");
        assert!(check(&mapping, "", 2).is_none());
        let issue = check(&mapping, "nope", 3).expect("issue");
        assert_eq!(issue.message, MSG_INVALID_EMAIL);
    }

    #[test]
    fn other_fields_have_no_format_rule() {
        let mapping = ColumnMapping::new("nome", "name");
        assert!(check(&mapping, "@@@", 2).is_none());
    }
}
