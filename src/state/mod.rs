//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlState`: where the crawl loop is (working on a listing page, or done)
//! - `StopReason`: which termination condition ended the crawl

mod crawl_state;

// Re-export main types
pub use crawl_state::{CrawlState, StopReason};
