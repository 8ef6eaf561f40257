//! A parsed input line: header name to raw value, in file column order.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    cells: Vec<(String, String)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cells: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, header: impl Into<String>, value: impl Into<String>) {
        self.cells.push((header.into(), value.into()));
    }

    /// Value for a header. Exact match first, then case-insensitive.
    pub fn get(&self, column: &str) -> Option<&str> {
        let column = column.trim();
        self.cells
            .iter()
            .find(|(h, _)| h == column)
            .or_else(|| {
                self.cells
                    .iter()
                    .find(|(h, _)| h.to_lowercase() == column.to_lowercase())
            })
            .map(|(_, v)| v.as_str())
    }

    /// Value for a header, or `""` when the column is absent.
    pub fn value(&self, column: &str) -> &str {
        self.get(column).unwrap_or("")
    }

    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(h, _)| h.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells.iter().map(|(h, v)| (h.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Row as a JSON object, header order preserved.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

impl<H, V> FromIterator<(H, V)> for Row
where
    H: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (H, V)>>(iter: I) -> Self {
        Self {
            cells: iter
                .into_iter()
                .map(|(h, v)| (h.into(), v.into()))
                .collect(),
        }
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (header, value) in &self.cells {
            map.serialize_entry(header, value)?;
        }
        map.end()
    }
}

struct RowVisitor;

impl<'de> Visitor<'de> for RowVisitor {
    type Value = Row;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of column names to string values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Row, A::Error> {
        let mut row = Row::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((header, value)) = access.next_entry::<String, String>()? {
            row.push(header, value);
        }
        Ok(row)
    }
}

impl<'de> Deserialize<'de> for Row {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RowVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_prefers_exact_then_case_insensitive() {
        let row: Row = [("Nome", "Ana"), ("nome", "Bia"), ("CPF", "123")]
            .into_iter()
            .collect();
        assert_eq!(row.get("nome"), Some("Bia"));
        assert_eq!(row.get("cpf"), Some("123"));
        assert_eq!(row.value("email"), "");
    }

    #[test]
    fn json_keeps_header_order() {
        let row: Row = [("b", "2"), ("a", "1")].into_iter().collect();
        assert_eq!(row.to_json(), r#"{"b":"2","a":"1"}"#);
    }
}
