//! Logging setup
//!
//! Components log through `tracing` macros and never configure a sink
//! themselves. The binary calls [`init_logging`] once at startup, which installs
//! a subscriber writing to the console and to a log file that is truncated on
//! every run. Tests may install their own subscriber instead.

use crate::config::LoggingConfig;
use crate::ScrapeError;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Builds the event filter for a verbosity level
///
/// `RUST_LOG`, when set, takes precedence.
pub fn build_filter(verbose: u8, quiet: bool) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    if quiet {
        // Only show errors
        return EnvFilter::new("error");
    }

    match verbose {
        0 => EnvFilter::new("careers_crawl=info,warn"),
        1 => EnvFilter::new("careers_crawl=debug,info"),
        2 => EnvFilter::new("careers_crawl=trace,debug"),
        _ => EnvFilter::new("trace"),
    }
}

/// Path of the log file for a logging configuration
pub fn log_file_path(config: &LoggingConfig) -> PathBuf {
    Path::new(&config.log_dir).join(&config.log_file)
}

/// Installs the process-wide console + file subscriber
///
/// The returned guard flushes the file writer when dropped; keep it alive until
/// the process exits.
///
/// # Errors
///
/// Fails if the log directory or file cannot be created, or if a global
/// subscriber is already installed.
pub fn init_logging(
    config: &LoggingConfig,
    verbose: u8,
    quiet: bool,
) -> Result<WorkerGuard, ScrapeError> {
    std::fs::create_dir_all(&config.log_dir)?;
    let file = File::create(log_file_path(config))?;
    let (file_writer, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::registry()
        .with(build_filter(verbose, quiet))
        .with(
            fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false),
        )
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(file_writer),
        )
        .try_init()
        .map_err(|e| ScrapeError::Logging(e.to_string()))?;

    Ok(guard)
}
