//! Output module for exporting crawl results
//!
//! This module handles:
//! - Normalizing records to the fixed export columns
//! - Writing the CSV export
//! - Summarizing field coverage of a finished crawl

mod csv_export;
pub mod stats;
mod traits;

pub use csv_export::{write_records, CsvExporter};
pub use stats::{compute_statistics, log_statistics, CrawlStatistics};
pub use traits::{OutputError, OutputResult, RecordExporter};

use crate::crawler::CrawlOutcome;

/// Exports a crawl outcome through `exporter`
///
/// An empty outcome is not an error: nothing is written and `Ok(0)` is
/// returned, with a warning in the log.
pub fn export_outcome(
    outcome: &CrawlOutcome,
    exporter: &dyn RecordExporter,
) -> OutputResult<usize> {
    if outcome.records.is_empty() {
        tracing::warn!("No job data was scraped; skipping export");
        return Ok(0);
    }

    let written = exporter.export(&outcome.records)?;
    tracing::info!(
        "Data successfully saved to {} ({} rows)",
        exporter.destination(),
        written
    );
    Ok(written)
}
