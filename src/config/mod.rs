//! Configuration module for careers-crawl
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key has a default, so running without a file crawls the built-in site.
//!
//! # Example
//!
//! ```no_run
//! use careers_crawl::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("crawl.toml")).unwrap();
//! println!("Pacing delay: {}ms", config.crawler.pacing_delay_ms);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, LoggingConfig, OutputConfig, SiteConfig, UserAgentConfig,
    DEFAULT_USER_AGENT,
};

// Re-export parser functions
pub use parser::{load_config, load_config_or_default, parse_config};
pub use validation::validate;
