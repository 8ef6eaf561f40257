//! CSV header normalization.

/// Normalizes a header token: trims whitespace, a leading BOM and any
/// surrounding quote characters.
pub fn normalize_header(value: &str) -> String {
    value
        .trim()
        .trim_start_matches('\u{feff}')
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .trim()
        .to_string()
}

/// Normalizes a data cell.
pub(crate) fn normalize_cell(value: &str) -> String {
    value.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("  nome  "), "nome");
        assert_eq!(normalize_header("\u{feff}nome"), "nome");
        assert_eq!(normalize_header("'E-mail'"), "E-mail");
        assert_eq!(normalize_header("\" CPF \""), "CPF");
    }
}
