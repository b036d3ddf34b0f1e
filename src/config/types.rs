use crate::url::{parse_base_url, start_url};
use crate::UrlResult;
use serde::Deserialize;
use url::Url;

/// Desktop browser identity sent with every request
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Main configuration structure for careers-crawl
///
/// Every table and key is optional; an empty file yields [`Config::default`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default, rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// The site origin that relative links are resolved against
    pub fn base_url(&self) -> UrlResult<Url> {
        parse_base_url(&self.site.base_url)
    }

    /// The first listing page of the crawl
    pub fn start_url(&self) -> UrlResult<Url> {
        start_url(&self.base_url()?, &self.site.start_path)
    }
}

/// Target site configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Base origin of the careers site
    #[serde(rename = "base-url", default = "default_base_url")]
    pub base_url: String,

    /// Path of the first search results page
    #[serde(rename = "start-path", default = "default_start_path")]
    pub start_path: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            start_path: default_start_path(),
        }
    }
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Pause after every detail page fetch and every listing page (milliseconds)
    #[serde(rename = "pacing-delay-ms", default = "default_pacing_delay_ms")]
    pub pacing_delay_ms: u64,

    /// Whole-request timeout (seconds)
    #[serde(
        rename = "request-timeout-secs",
        default = "default_request_timeout_secs"
    )]
    pub request_timeout_secs: u64,

    /// Stop after this many listing pages; unlimited when unset
    #[serde(rename = "max-pages", default)]
    pub max_pages: Option<u32>,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            pacing_delay_ms: default_pacing_delay_ms(),
            request_timeout_secs: default_request_timeout_secs(),
            max_pages: None,
        }
    }
}

/// User agent configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Full User-Agent header value
    #[serde(default = "default_user_agent")]
    pub value: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            value: default_user_agent(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path of the CSV export
    #[serde(rename = "csv-path", default = "default_csv_path")]
    pub csv_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: default_csv_path(),
        }
    }
}

/// Log sink configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Directory holding the log file
    #[serde(rename = "log-dir", default = "default_log_dir")]
    pub log_dir: String,

    /// Log file name; truncated at startup
    #[serde(rename = "log-file", default = "default_log_file")]
    pub log_file: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_dir: default_log_dir(),
            log_file: default_log_file(),
        }
    }
}

fn default_base_url() -> String {
    "https://careers.boozallen.com".to_string()
}

fn default_start_path() -> String {
    "/jobs/search".to_string()
}

fn default_pacing_delay_ms() -> u64 {
    1000
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_csv_path() -> String {
    "booz_allen_jobs.csv".to_string()
}

fn default_log_dir() -> String {
    "logs".to_string()
}

fn default_log_file() -> String {
    "scraper.log".to_string()
}
