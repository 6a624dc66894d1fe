//! CSV export of the complete scan, one row per fingerprinted file.
//!
//! The export ignores the console display mode and always covers every file,
//! in the same order as the full listing (duplicates first). An existing file
//! at the target path is overwritten.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use time::UtcOffset;

use crate::duplicates::ListingRow;
use crate::utils::{bytes_to_kb, bytes_to_mb, format_timestamp};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to create '{}': {source}", .path.display())]
    Create { path: PathBuf, source: io::Error },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct CsvRow<'a> {
    status: String,
    duplicate_count: usize,
    file_name: &'a str,
    directory: String,
    full_path: String,
    size_bytes: u64,
    #[serde(rename = "SizeKB")]
    size_kb: String,
    #[serde(rename = "SizeMB")]
    size_mb: String,
    hash: &'a str,
    last_modified: String,
    created: String,
}

impl<'a> CsvRow<'a> {
    fn new(row: &ListingRow<'a>, offset: UtcOffset) -> Self {
        let record = row.record;
        Self {
            status: row.status.to_string(),
            duplicate_count: row.duplicate_count,
            file_name: &record.file_name,
            directory: record.directory.to_string_lossy().to_string(),
            full_path: record.full_path.to_string_lossy().to_string(),
            size_bytes: record.size_bytes,
            size_kb: format!("{:.2}", bytes_to_kb(record.size_bytes)),
            size_mb: format!("{:.2}", bytes_to_mb(record.size_bytes)),
            hash: &record.content_hash,
            last_modified: format_timestamp(record.last_modified, offset),
            created: record
                .created
                .map(|c| format_timestamp(c, offset))
                .unwrap_or_default(),
        }
    }
}

pub fn write_csv<W: io::Write>(
    writer: W,
    rows: &[ListingRow<'_>],
    offset: UtcOffset,
) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(CsvRow::new(row, offset))?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

pub fn export_csv(path: &Path, rows: &[ListingRow<'_>], offset: UtcOffset) -> Result<(), ExportError> {
    let file = File::create(path).map_err(|source| ExportError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    write_csv(BufWriter::new(file), rows, offset)
}
