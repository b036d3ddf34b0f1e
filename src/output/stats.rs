//! Statistics over a finished crawl
//!
//! This module summarizes how complete the harvested records are, column by
//! column, so a run that silently lost a page region stands out in the log.

use crate::crawler::CrawlOutcome;
use crate::record::EXPORT_COLUMNS;

/// Crawl statistics summary
#[derive(Debug, Clone)]
pub struct CrawlStatistics {
    /// Total number of records
    pub total_records: usize,

    /// Listing pages fetched
    pub pages_visited: u32,

    /// Records holding only URL and title
    pub degraded_records: usize,

    /// Non-empty value count per export column, in column order
    pub column_coverage: Vec<(&'static str, usize)>,
}

impl CrawlStatistics {
    /// Percentage of records with a non-empty value for `column`
    pub fn coverage_percent(&self, column: &str) -> f64 {
        if self.total_records == 0 {
            return 0.0;
        }

        let filled = self
            .column_coverage
            .iter()
            .find(|(name, _)| *name == column)
            .map(|(_, count)| *count)
            .unwrap_or(0);

        (filled as f64 / self.total_records as f64) * 100.0
    }
}

/// Computes statistics for a crawl outcome
pub fn compute_statistics(outcome: &CrawlOutcome) -> CrawlStatistics {
    let column_coverage = EXPORT_COLUMNS
        .iter()
        .map(|column| {
            let filled = outcome
                .records
                .iter()
                .filter(|record| record.get(column).is_some_and(|v| !v.is_empty()))
                .count();
            (*column, filled)
        })
        .collect();

    CrawlStatistics {
        total_records: outcome.records.len(),
        pages_visited: outcome.pages_visited,
        degraded_records: outcome.degraded_records,
        column_coverage,
    }
}

/// Logs statistics at info level
pub fn log_statistics(stats: &CrawlStatistics) {
    tracing::info!(
        "Records: {} from {} listing pages ({} without details)",
        stats.total_records,
        stats.pages_visited,
        stats.degraded_records
    );

    for (column, filled) in &stats.column_coverage {
        tracing::info!(
            "  {:<20} {:>5} ({:.1}%)",
            column,
            filled,
            stats.coverage_percent(column)
        );
    }
}
