//! CSV export functionality.
//!
//! Writes the retained records as one flat CSV: the header is the column set
//! of the first record and every row is projected onto that header.

use std::path::Path;

use csv::Writer;
use log::{debug, warn};

use crate::error_handling::OutputError;
use crate::record::PhotoRecord;

/// Header row for a record set: the columns of the first record.
pub fn header_for(records: &[PhotoRecord]) -> Vec<String> {
    records
        .first()
        .map(|first| first.keys().map(str::to_string).collect())
        .unwrap_or_default()
}

/// Writes `records` to `path`, creating parent directories as needed.
///
/// An empty record set produces an empty file.
///
/// # Returns
///
/// Returns the number of data rows written.
///
/// # Errors
///
/// Returns an `OutputError` if the directory, the file, or any row cannot be
/// written.
pub fn write_csv(path: &Path, records: &[PhotoRecord]) -> Result<usize, OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|source| OutputError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    let csv_err = |source| OutputError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = Writer::from_path(path).map_err(csv_err)?;
    let header = header_for(records);

    if header.is_empty() {
        warn!("No photos retained, writing empty file {}", path.display());
    } else {
        writer.write_record(&header).map_err(csv_err)?;
    }

    let mut mismatched = 0usize;
    for record in records {
        if !record.has_keys(&header) {
            mismatched += 1;
        }
        writer
            .write_record(record.values_for(&header))
            .map_err(csv_err)?;
    }
    if mismatched > 0 {
        debug!(
            "{} record(s) had columns differing from the header, projected onto it",
            mismatched
        );
    }

    writer.flush().map_err(|source| OutputError::Flush {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(records.len())
}
