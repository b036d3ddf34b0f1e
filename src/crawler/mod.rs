//! Crawler module for listing traversal and detail extraction
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with failure classification
//! - Listing page walking (entries and pagination)
//! - Detail page field extraction
//! - Overall crawl coordination

mod coordinator;
mod extractor;
mod fetcher;
mod listing;

pub use coordinator::{run_crawl, Coordinator, CrawlOutcome};
pub use extractor::{extract_fields, extract_sections, extract_structured_fields};
pub use fetcher::{build_http_client, fetch_document, fetch_url, FetchResult};
pub use listing::{parse_listing, ListingEntry, ListingPage};

use crate::config::Config;
use crate::ScrapeError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP client
/// 2. Walk listing pages from the start URL until a stop condition
/// 3. Fetch and extract every listed job's detail page
/// 4. Return the accumulated records for export
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(CrawlOutcome)` - Crawl ran to a stop condition
/// * `Err(ScrapeError)` - The crawl could not be set up
pub async fn crawl(config: &Config) -> Result<CrawlOutcome, ScrapeError> {
    run_crawl(config).await
}
