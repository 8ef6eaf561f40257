//! Row parsing over any `io::Read`.

use std::io::Read;

use csv::{ReaderBuilder, StringRecord, StringRecordsIntoIter};
use migra_model::Row;

use crate::error::{IngestError, Result};

use super::header::{normalize_cell, normalize_header};

/// Options for reading delimited text.
#[derive(Debug, Clone, Copy)]
pub struct IngestOptions {
    /// Field delimiter. Defaults to `,`.
    pub delimiter: u8,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl IngestOptions {
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

/// Header plus data rows of a whole export.
#[derive(Debug, Clone, Default)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

/// Streaming row reader.
///
/// The first non-blank record is the header. Every later non-blank record
/// becomes a [`Row`] with value *i* under header *i*; short records are
/// padded with `""` and surplus values are dropped. Rows are yielded in file
/// order.
pub struct CsvRowReader<R: Read> {
    records: StringRecordsIntoIter<R>,
    headers: Option<Vec<String>>,
}

impl<R: Read> CsvRowReader<R> {
    pub fn new(reader: R) -> Self {
        Self::with_options(reader, IngestOptions::default())
    }

    pub fn with_options(reader: R, options: IngestOptions) -> Self {
        let reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(options.delimiter)
            .from_reader(reader);
        Self {
            records: reader.into_records(),
            headers: None,
        }
    }

    /// Header of the input, reading ahead to it if needed.
    ///
    /// Returns an empty slice for input without any non-blank line.
    pub fn headers(&mut self) -> Result<&[String]> {
        self.ensure_headers()?;
        Ok(self.headers.as_deref().unwrap_or(&[]))
    }

    fn ensure_headers(&mut self) -> Result<()> {
        while self.headers.is_none() {
            match self.records.next() {
                Some(record) => {
                    let record = record?;
                    if is_blank(&record) {
                        continue;
                    }
                    let headers: Vec<String> = record.iter().map(normalize_header).collect();
                    tracing::debug!(columns = headers.len(), "read header");
                    self.headers = Some(headers);
                }
                None => break,
            }
        }
        Ok(())
    }

    fn build_row(&self, record: &StringRecord) -> Row {
        let headers = self.headers.as_deref().unwrap_or(&[]);
        let mut row = Row::with_capacity(headers.len());
        for (idx, header) in headers.iter().enumerate() {
            let value = record.get(idx).map(normalize_cell).unwrap_or_default();
            row.push(header.clone(), value);
        }
        row
    }
}

impl<R: Read> Iterator for CsvRowReader<R> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Err(error) = self.ensure_headers() {
            return Some(Err(error));
        }
        self.headers.as_ref()?;
        loop {
            let record = match self.records.next()? {
                Ok(record) => record,
                Err(error) => return Some(Err(IngestError::from(error))),
            };
            if is_blank(&record) {
                continue;
            }
            return Some(Ok(self.build_row(&record)));
        }
    }
}

/// A record that came from a line holding nothing but whitespace.
fn is_blank(record: &StringRecord) -> bool {
    record.is_empty() || (record.len() == 1 && record[0].trim().is_empty())
}

/// Parse raw export text into rows.
pub fn parse_csv(text: &str) -> Result<Vec<Row>> {
    parse_csv_with_options(text, IngestOptions::default())
}

pub fn parse_csv_with_options(text: &str, options: IngestOptions) -> Result<Vec<Row>> {
    CsvRowReader::with_options(text.as_bytes(), options).collect()
}

/// Parse raw export text, keeping the header even when there are no rows.
pub fn read_csv_table(text: &str, options: IngestOptions) -> Result<CsvTable> {
    let mut reader = CsvRowReader::with_options(text.as_bytes(), options);
    let headers = reader.headers()?.to_vec();
    let rows = reader.collect::<Result<Vec<_>>>()?;
    Ok(CsvTable { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_row_per_data_line() {
        let rows = parse_csv("nome,cpf\nAna,1\nBia,2\nCaio,3\n").unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2].value("nome"), "Caio");
    }

    #[test]
    fn test_short_lines_are_padded() {
        let rows = parse_csv("a,b,c\n1\n1,2\n").unwrap();
        assert_eq!(rows[0].value("a"), "1");
        assert_eq!(rows[0].get("b"), Some(""));
        assert_eq!(rows[0].get("c"), Some(""));
        assert_eq!(rows[1].get("b"), Some("2"));
        assert_eq!(rows[1].get("c"), Some(""));
    }

    #[test]
    fn test_extra_values_are_dropped() {
        let rows = parse_csv("a,b\n1,2,3,4\n").unwrap();
        assert_eq!(rows[0].len(), 2);
        assert_eq!(rows[0].value("b"), "2");
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let rows = parse_csv("\n   \na,b\n\n1,2\n   \n3,4\n").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].value("a"), "3");
    }

    #[test]
    fn test_quoted_fields() {
        let text = "nome,endereco,obs\n\"Silva, Ana\",\"Rua A, 10\",\"disse \"\"oi\"\"\"\n";
        let rows = parse_csv(text).unwrap();
        assert_eq!(rows[0].value("nome"), "Silva, Ana");
        assert_eq!(rows[0].value("endereco"), "Rua A, 10");
        assert_eq!(rows[0].value("obs"), "disse \"oi\"");
    }

    #[test]
    fn test_embedded_newline() {
        let rows = parse_csv("nome,obs\nAna,\"linha 1\nlinha 2\"\nBia,x\n").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].value("obs"), "linha 1\nlinha 2");
    }

    #[test]
    fn test_quoted_headers_are_cleaned() {
        let rows = parse_csv("\"nome\", 'cpf' \nAna,1\n").unwrap();
        let headers: Vec<&str> = rows[0].headers().collect();
        assert_eq!(headers, vec!["nome", "cpf"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_csv("").unwrap().is_empty());
        assert!(parse_csv("\n  \n").unwrap().is_empty());
        let table = read_csv_table("a,b\n", IngestOptions::default()).unwrap();
        assert_eq!(table.headers, vec!["a", "b"]);
        assert!(table.rows.is_empty());
    }

    #[test]
    fn test_semicolon_delimiter() {
        let options = IngestOptions::default().with_delimiter(b';');
        let rows = parse_csv_with_options("nome;cidade\nAna;Recife, PE\n", options).unwrap();
        assert_eq!(rows[0].value("cidade"), "Recife, PE");
    }
}
