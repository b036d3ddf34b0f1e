//! Crawl state definitions
//!
//! The crawl loop is a two-state machine: it is either working on a listing page
//! or finished, and a finished crawl records why it stopped.

use std::fmt;
use url::Url;

/// Why a crawl reached its terminal state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StopReason {
    /// A listing page could not be fetched
    ListingFetchFailed,

    /// A listing page had no results table body
    NoListingTable,

    /// A listing page's table held no usable entries
    NoEntries,

    /// The last listing page had no next-page link
    LastPage,

    /// The configured page limit was reached
    PageLimitReached,
}

impl StopReason {
    /// Returns true if the crawl ended because of a transport failure
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::ListingFetchFailed)
    }

    /// Short machine-friendly name used in log lines
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ListingFetchFailed => "listing_fetch_failed",
            Self::NoListingTable => "no_listing_table",
            Self::NoEntries => "no_entries",
            Self::LastPage => "last_page",
            Self::PageLimitReached => "page_limit_reached",
        }
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Position of the crawl loop
///
/// # Transitions
///
/// | From | Condition | To |
/// |------|-----------|----|
/// | `Running(url, n)` | listing fetch fails | `Done(ListingFetchFailed)` |
/// | `Running(url, n)` | no table body | `Done(NoListingTable)` |
/// | `Running(url, n)` | no entries | `Done(NoEntries)` |
/// | `Running(url, n)` | page limit hit | `Done(PageLimitReached)` |
/// | `Running(url, n)` | next link present | `Running(next, n + 1)` |
/// | `Running(url, n)` | no next link | `Done(LastPage)` |
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlState {
    /// Working on the listing page at `url`; `page_index` starts at 1
    Running { url: Url, page_index: u32 },

    /// Terminal state
    Done(StopReason),
}

impl CrawlState {
    /// Initial state for a crawl starting at `url`
    pub fn start(url: Url) -> Self {
        Self::Running { url, page_index: 1 }
    }

    /// Returns true if this is the terminal state
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done(_))
    }

    /// The stop reason, once the crawl is done
    pub fn stop_reason(&self) -> Option<StopReason> {
        match self {
            Self::Done(reason) => Some(*reason),
            Self::Running { .. } => None,
        }
    }

}

impl fmt::Display for CrawlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Running { url, page_index } => write!(f, "running(page {}: {})", page_index, url),
            Self::Done(reason) => write!(f, "done({})", reason),
        }
    }
}
