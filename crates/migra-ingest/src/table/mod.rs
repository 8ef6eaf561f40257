//! Delimited-text reading utilities.

mod header;
mod parser;
mod reader;

pub use header::normalize_header;
pub use parser::{
    CsvRowReader, CsvTable, IngestOptions, parse_csv, parse_csv_with_options, read_csv_table,
};
pub use reader::{
    MAX_CSV_FILE_SIZE, check_file_size, check_file_size_with_limit, open_csv_file, read_csv_file,
    validate_encoding,
};
