//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the crawl loop that:
//! - Walks the paginated search results one listing page at a time
//! - Visits every entry's detail page and extracts its fields
//! - Stamps each record with its URL and listing title
//! - Paces requests toward the remote server
//!
//! The loop is driven by [`CrawlState`]: [`Coordinator::step`] performs one
//! transition, [`Coordinator::run`] steps until the state is terminal.

use crate::config::Config;
use crate::crawler::extractor::extract_fields;
use crate::crawler::listing::{parse_listing, ListingEntry};
use crate::crawler::{build_http_client, fetch_document};
use crate::record::JobRecord;
use crate::state::{CrawlState, StopReason};
use crate::ScrapeError;
use reqwest::Client;
use std::time::Duration;
use tracing::Instrument;
use url::Url;

/// Everything a finished crawl hands to the exporter
#[derive(Debug, Clone)]
pub struct CrawlOutcome {
    /// Accumulated records in discovery order
    pub records: Vec<JobRecord>,

    /// Listing pages successfully fetched
    pub pages_visited: u32,

    /// Records whose detail page could not be fetched
    pub degraded_records: usize,

    /// Termination condition
    pub stop_reason: StopReason,
}

/// Main crawler coordinator structure
pub struct Coordinator {
    client: Client,
    base_url: Url,
    start_url: Url,
    pacing_delay: Duration,
    max_pages: Option<u32>,
    records: Vec<JobRecord>,
    pages_visited: u32,
    degraded_records: usize,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(ScrapeError)` - Invalid site URLs or HTTP client construction failed
    pub fn new(config: &Config) -> Result<Self, ScrapeError> {
        let base_url = config.base_url()?;
        let start_url = config.start_url()?;
        let client = build_http_client(&config.user_agent, &config.crawler)?;

        Ok(Self {
            client,
            base_url,
            start_url,
            pacing_delay: Duration::from_millis(config.crawler.pacing_delay_ms),
            max_pages: config.crawler.max_pages,
            records: Vec::new(),
            pages_visited: 0,
            degraded_records: 0,
        })
    }

    /// The state a fresh crawl begins in
    pub fn initial_state(&self) -> CrawlState {
        CrawlState::start(self.start_url.clone())
    }

    /// Records accumulated so far
    pub fn records(&self) -> &[JobRecord] {
        &self.records
    }

    /// Runs the crawl loop to completion
    ///
    /// Never fails: every transport problem is absorbed into a state transition
    /// or a degraded record.
    pub async fn run(mut self) -> CrawlOutcome {
        let span = tracing::info_span!("crawl", start = %self.start_url);

        async move {
            let mut state = self.initial_state();
            while !state.is_done() {
                state = self.step(state).await;
            }

            // Loop exits only on Done
            let stop_reason = state.stop_reason().unwrap_or(StopReason::LastPage);
            self.finish(stop_reason)
        }
        .instrument(span)
        .await
    }

    /// Performs one transition of the crawl state machine
    ///
    /// A `Done` state is returned unchanged.
    pub async fn step(&mut self, state: CrawlState) -> CrawlState {
        let CrawlState::Running { url, page_index } = state else {
            return state;
        };

        tracing::info!("Scraping page {}: {}", page_index, url);

        let listing = match fetch_document(&self.client, url.as_str()).await {
            Some(document) => parse_listing(&document, &self.base_url),
            None => {
                tracing::warn!("Stopping crawl: listing page {} could not be fetched", page_index);
                return CrawlState::Done(StopReason::ListingFetchFailed);
            }
        };
        self.pages_visited += 1;

        if !listing.table_found {
            tracing::info!("Could not find job table on page {}", page_index);
            return CrawlState::Done(StopReason::NoListingTable);
        }

        if listing.is_empty() {
            tracing::info!("No more job listings found on page {}", page_index);
            return CrawlState::Done(StopReason::NoEntries);
        }

        tracing::info!(
            "Found {} listings on page {}",
            listing.entries.len(),
            page_index
        );

        for entry in &listing.entries {
            let record = self.scrape_detail(entry).await;
            self.records.push(record);
            self.pause().await;
        }

        if let Some(max) = self.max_pages.filter(|max| page_index >= *max) {
            tracing::info!("Page limit of {} reached", max);
            return CrawlState::Done(StopReason::PageLimitReached);
        }

        match listing.next_page {
            Some(next_url) => {
                self.pause().await;
                CrawlState::Running {
                    url: next_url,
                    page_index: page_index + 1,
                }
            }
            None => {
                tracing::info!("No 'Next' page link found. Reached the last page.");
                CrawlState::Done(StopReason::LastPage)
            }
        }
    }

    /// Fetches one detail page and builds its record
    ///
    /// A failed fetch degrades the record to URL and title only.
    async fn scrape_detail(&mut self, entry: &ListingEntry) -> JobRecord {
        let detail_url = entry.detail_url.as_str();
        tracing::info!("  -> Scraping details from: {}", detail_url);

        match fetch_document(&self.client, detail_url).await {
            Some(document) => JobRecord::new(detail_url, &entry.title, extract_fields(&document)),
            None => {
                self.degraded_records += 1;
                tracing::warn!(
                    "Keeping metadata only for '{}' ({})",
                    entry.title,
                    detail_url
                );
                JobRecord::metadata_only(detail_url, &entry.title)
            }
        }
    }

    /// Observes the pacing delay between requests
    async fn pause(&self) {
        if !self.pacing_delay.is_zero() {
            tokio::time::sleep(self.pacing_delay).await;
        }
    }

    fn finish(self, stop_reason: StopReason) -> CrawlOutcome {
        if stop_reason.is_failure() {
            tracing::warn!(
                "Crawl ended early ({}): {} pages, {} jobs, {} without details",
                stop_reason,
                self.pages_visited,
                self.records.len(),
                self.degraded_records
            );
        } else {
            tracing::info!(
                "Crawl finished ({}): {} pages, {} jobs, {} without details",
                stop_reason,
                self.pages_visited,
                self.records.len(),
                self.degraded_records
            );
        }

        CrawlOutcome {
            records: self.records,
            pages_visited: self.pages_visited,
            degraded_records: self.degraded_records,
            stop_reason,
        }
    }
}

/// Runs a complete crawl from the configured start URL
///
/// # Example
///
/// ```no_run
/// use careers_crawl::config::Config;
/// use careers_crawl::crawler::run_crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let outcome = run_crawl(&Config::default()).await?;
/// println!("{} jobs", outcome.records.len());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: &Config) -> Result<CrawlOutcome, ScrapeError> {
    let coordinator = Coordinator::new(config)?;
    Ok(coordinator.run().await)
}
