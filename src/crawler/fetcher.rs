//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the HTTP client with the browser User-Agent
//! - GET requests for listing and detail pages
//! - Error classification
//!
//! Transport problems never escape as errors: they come back as a
//! [`FetchResult`] failure variant and are logged here.

use crate::config::{CrawlerConfig, UserAgentConfig};
use reqwest::Client;
use scraper::Html;
use std::time::Duration;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success {
        /// Final URL after redirects
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// Page body content
        body: String,
    },

    /// Server answered with a status outside 2xx/3xx
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (connection refused, timeout, body read failure)
    NetworkError {
        /// Error description
        error: String,
    },
}

impl FetchResult {
    /// Returns true if the page body was retrieved
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Describes why the fetch failed, or None on success
    pub fn failure_reason(&self) -> Option<String> {
        match self {
            Self::Success { .. } => None,
            Self::HttpError { status_code } => Some(format!("HTTP {}", status_code)),
            Self::NetworkError { error } => Some(error.clone()),
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - The User-Agent header to send
/// * `crawler` - Crawler settings; supplies the request timeout
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use careers_crawl::config::{CrawlerConfig, UserAgentConfig};
/// use careers_crawl::crawler::build_http_client;
///
/// let client =
///     build_http_client(&UserAgentConfig::default(), &CrawlerConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    crawler: &CrawlerConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.value.as_str())
        .timeout(Duration::from_secs(crawler.request_timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Issues a single GET for `url` and classifies the outcome
///
/// No retries. Any 2xx or 3xx status is treated as success; redirects are
/// followed by the client before the status is seen.
pub async fn fetch_url(client: &Client, url: &str) -> FetchResult {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            let error = if e.is_timeout() {
                "Request timeout".to_string()
            } else if e.is_connect() {
                format!("Connection failed: {}", e)
            } else {
                e.to_string()
            };
            return FetchResult::NetworkError { error };
        }
    };

    let status = response.status();
    if !(status.is_success() || status.is_redirection()) {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    let final_url = response.url().to_string();
    match response.text().await {
        Ok(body) => FetchResult::Success {
            final_url,
            status_code: status.as_u16(),
            body,
        },
        Err(e) => FetchResult::NetworkError {
            error: format!("Failed to read body: {}", e),
        },
    }
}

/// Fetches `url` and parses it into a queryable document
///
/// Returns None on any transport failure after logging the cause. Callers decide
/// what a missing page means for them.
pub async fn fetch_document(client: &Client, url: &str) -> Option<Html> {
    match fetch_url(client, url).await {
        FetchResult::Success {
            final_url,
            status_code,
            body,
        } => {
            tracing::debug!(
                "Fetched {} (status {}, {} bytes)",
                final_url,
                status_code,
                body.len()
            );
            Some(Html::parse_document(&body))
        }
        failure => {
            tracing::error!(
                "Error fetching URL {}: {}",
                url,
                failure.failure_reason().unwrap_or_default()
            );
            None
        }
    }
}
