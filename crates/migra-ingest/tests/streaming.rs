//! Streaming reader behaviour over large and awkward inputs.

use std::io::Cursor;

use migra_ingest::{CsvRowReader, IngestError, parse_csv};

#[test]
fn header_plus_n_lines_yields_n_rows() {
    let mut text = String::from("nome,cpf,telefone\n");
    for idx in 0..250 {
        text.push_str(&format!("Cliente {idx},{idx:011},1199999{idx:04}\n"));
    }
    let rows = parse_csv(&text).expect("parse");
    assert_eq!(rows.len(), 250);
    assert_eq!(rows[0].value("nome"), "Cliente 0");
    assert_eq!(rows[249].value("nome"), "Cliente 249");
}

#[test]
fn reader_exposes_header_before_rows() {
    let mut reader = CsvRowReader::new(Cursor::new("\n\nnome,email\nAna,ana@x.com\n"));
    assert_eq!(reader.headers().expect("headers"), ["nome", "email"]);
    let rows: Vec<_> = reader.collect::<Result<_, _>>().expect("rows");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].value("email"), "ana@x.com");
}

#[test]
fn rows_keep_file_order() {
    let reader = CsvRowReader::new(Cursor::new("n\nc\na\nb\n"));
    let names: Vec<String> = reader
        .map(|row| row.expect("row").value("n").to_string())
        .collect();
    assert_eq!(names, vec!["c", "a", "b"]);
}

#[test]
fn invalid_utf8_is_a_parse_error() {
    let bytes: Vec<u8> = b"nome\n\xff\xfe\xfd\n".to_vec();
    let mut reader = CsvRowReader::new(Cursor::new(bytes));
    let first = reader.next().expect("an item");
    assert!(matches!(first, Err(IngestError::CsvParse { .. })));
}

#[test]
fn values_are_trimmed() {
    let rows = parse_csv("nome , cidade\n  Ana  ,  Recife \n").expect("parse");
    assert_eq!(rows[0].value("nome"), "Ana");
    assert_eq!(rows[0].value("cidade"), "Recife");
}
