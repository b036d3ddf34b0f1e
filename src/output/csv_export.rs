//! CSV export
//!
//! Records are written with a fixed header row (see [`EXPORT_COLUMNS`]) and one
//! row per record. Missing fields become empty cells. The file starts with a
//! UTF-8 byte-order mark so spreadsheet tools pick the right encoding.

use crate::output::traits::{OutputError, OutputResult, RecordExporter};
use crate::record::{JobRecord, EXPORT_COLUMNS};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Writes records as CSV to any writer
///
/// No byte-order mark is written here; see [`CsvExporter`] for file output.
///
/// # Returns
///
/// The number of data rows written
pub fn write_records<W: Write>(records: &[JobRecord], writer: W) -> OutputResult<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(EXPORT_COLUMNS)?;
    for record in records {
        csv_writer.write_record(record.to_row())?;
    }

    csv_writer.flush()?;
    Ok(records.len())
}

/// Exports records to a CSV file
#[derive(Debug, Clone)]
pub struct CsvExporter {
    path: PathBuf,
}

impl CsvExporter {
    /// Creates an exporter writing to `path`
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordExporter for CsvExporter {
    /// Writes the CSV file, replacing any existing one
    ///
    /// Refuses to create a file for an empty record set.
    fn export(&self, records: &[JobRecord]) -> OutputResult<usize> {
        if records.is_empty() {
            return Err(OutputError::Empty);
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut file = BufWriter::new(File::create(&self.path)?);
        file.write_all(UTF8_BOM)?;
        let written = write_records(records, &mut file)?;
        file.flush()?;

        Ok(written)
    }

    fn destination(&self) -> String {
        self.path.display().to_string()
    }
}
