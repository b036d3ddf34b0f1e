//! Output traits and error types
//!
//! This module defines the trait interface for record exporters and the
//! errors they report.

use crate::record::JobRecord;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Nothing to export")]
    Empty,
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Trait for record exporters
///
/// An exporter receives the full accumulation of a finished crawl and writes it
/// to its destination, normalizing every record to the fixed column schema.
pub trait RecordExporter {
    /// Writes all records
    ///
    /// # Returns
    ///
    /// The number of records written
    fn export(&self, records: &[JobRecord]) -> OutputResult<usize>;

    /// Human-readable description of where records go
    fn destination(&self) -> String;
}
