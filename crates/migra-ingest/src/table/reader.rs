//! Export file reading with size and encoding guards.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{IngestError, Result};

use super::parser::{CsvRowReader, CsvTable, IngestOptions};

/// Maximum file size for CSV loading (500 MB default).
pub const MAX_CSV_FILE_SIZE: u64 = 500 * 1024 * 1024;

fn open_error(path: &Path, e: std::io::Error) -> IngestError {
    if e.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        }
    }
}

/// Check file size before loading.
pub fn check_file_size(path: &Path) -> Result<()> {
    check_file_size_with_limit(path, MAX_CSV_FILE_SIZE)
}

/// Check file size against a custom limit.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| open_error(path, e))?;

    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }

    Ok(())
}

/// Detect encoding and validate it's supported (UTF-8 only).
///
/// Checks for UTF-16 BOM markers which are not supported.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| open_error(path, e))?;

    let mut buffer = [0u8; 4];
    let bytes_read = file.read(&mut buffer).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    if bytes_read >= 2 {
        if buffer[0..2] == [0xFF, 0xFE] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 LE",
            });
        }
        if buffer[0..2] == [0xFE, 0xFF] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 BE",
            });
        }
    }

    // UTF-8 BOM is acceptable (stripped from the header)
    Ok(())
}

/// Open an export for streaming, after the size and encoding checks.
pub fn open_csv_file(path: &Path, options: IngestOptions) -> Result<CsvRowReader<File>> {
    check_file_size(path)?;
    validate_encoding(path)?;
    let file = File::open(path).map_err(|e| open_error(path, e))?;
    Ok(CsvRowReader::with_options(file, options))
}

/// Read a whole export into memory.
pub fn read_csv_file(path: &Path, options: IngestOptions) -> Result<CsvTable> {
    let mut reader = open_csv_file(path, options)?;
    let headers = reader.headers()?.to_vec();
    let rows = reader.collect::<Result<Vec<_>>>()?;
    tracing::info!(
        path = %path.display(),
        columns = headers.len(),
        rows = rows.len(),
        "loaded export"
    );
    Ok(CsvTable { headers, rows })
}
