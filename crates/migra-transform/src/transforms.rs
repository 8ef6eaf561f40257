//! Per-value transforms named by `ColumnMapping::transform`.

use std::fmt;
use std::str::FromStr;

use crate::error::TransformError;

/// A value transform applied to a mapped cell before assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transform {
    Uppercase,
    Lowercase,
    /// Brazilian phone layout: `(DD) DDDD-DDDD` or `(DD) DDDDD-DDDD`.
    PhoneFormat,
    /// Digits only.
    CpfFormat,
    /// Pass-through. Source exports use too many date layouts to normalize
    /// safely, so values are kept as written.
    DateFormat,
}

impl Transform {
    pub const ALL: [Transform; 5] = [
        Self::Uppercase,
        Self::Lowercase,
        Self::PhoneFormat,
        Self::CpfFormat,
        Self::DateFormat,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Self::Uppercase => "uppercase",
            Self::Lowercase => "lowercase",
            Self::PhoneFormat => "phone_format",
            Self::CpfFormat => "cpf_format",
            Self::DateFormat => "date_format",
        }
    }

    pub fn apply(&self, value: &str) -> String {
        match self {
            Self::Uppercase => value.to_uppercase(),
            Self::Lowercase => value.to_lowercase(),
            Self::PhoneFormat => format_phone(value),
            Self::CpfFormat => digits(value),
            Self::DateFormat => value.to_string(),
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Transform {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.id() == s)
            .ok_or_else(|| TransformError::UnknownTransform(s.to_string()))
    }
}

fn digits(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// Format a phone number by digit count; other lengths come back unchanged.
pub fn format_phone(value: &str) -> String {
    let d = digits(value);
    match d.len() {
        10 => format!("({}) {}-{}", &d[..2], &d[2..6], &d[6..]),
        11 => format!("({}) {}-{}", &d[..2], &d[2..7], &d[7..]),
        _ => value.to_string(),
    }
}

/// Apply an optional transform id to a value.
pub fn apply_transform(id: Option<&str>, value: &str) -> Result<String, TransformError> {
    match id {
        None => Ok(value.to_string()),
        Some(id) => Ok(id.parse::<Transform>()?.apply(value)),
    }
}
