//! Client export ingestion.
//!
//! Turns delimited text exported by another practice-management system into
//! ordered [`Row`](migra_model::Row)s. Quoted fields, embedded delimiters,
//! embedded line breaks and doubled-quote escapes are all honoured.
//!
//! # Example
//!
//! ```
//! use migra_ingest::parse_csv;
//!
//! let rows = parse_csv("nome,cidade\n\"Silva, Ana\",Recife\n").unwrap();
//! assert_eq!(rows[0].value("nome"), "Silva, Ana");
//! ```

mod error;
mod table;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use table::{
    CsvRowReader, CsvTable, IngestOptions, MAX_CSV_FILE_SIZE, check_file_size,
    check_file_size_with_limit, normalize_header, open_csv_file, parse_csv,
    parse_csv_with_options, read_csv_file, read_csv_table, validate_encoding,
};
