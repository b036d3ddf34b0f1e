//! careers-crawl main entry point
//!
//! This is the command-line interface for the careers-crawl job harvester.

use careers_crawl::config::{load_config_or_default, Config};
use careers_crawl::crawler::crawl;
use careers_crawl::logging::{init_logging, log_file_path};
use careers_crawl::output::{compute_statistics, export_outcome, log_statistics, CsvExporter};
use clap::Parser;
use std::path::PathBuf;

/// careers-crawl: a polite job-listing harvester
///
/// Walks the paginated job search of a careers site, visits every listing's
/// detail page, and writes the extracted fields to a CSV file.
#[derive(Parser, Debug)]
#[command(name = "careers-crawl")]
#[command(version = "1.0.0")]
#[command(about = "A polite job-listing harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Write the CSV export here instead of the configured path
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Override the site base URL (e.g. for a staging mirror)
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Stop after this many listing pages
    #[arg(long, value_name = "N")]
    max_pages: Option<u32>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Show the resolved configuration and exit without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match load_config_or_default(cli.config.as_deref()) {
        Ok(config) => apply_overrides(config, &cli)?,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if cli.dry_run {
        handle_dry_run(&config)?;
        return Ok(());
    }

    // Held until exit so the file sink is flushed
    let _log_guard = init_logging(&config.logging, cli.verbose, cli.quiet)?;

    tracing::info!("Starting the job scraper");
    match handle_crawl(&config).await {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::error!("A critical error occurred: {}", e);
            Err(e.into())
        }
    }
}

/// Applies command-line overrides and re-validates the result
fn apply_overrides(mut config: Config, cli: &Cli) -> Result<Config, Box<dyn std::error::Error>> {
    if let Some(output) = &cli.output {
        config.output.csv_path = output.display().to_string();
    }
    if let Some(base_url) = &cli.base_url {
        config.site.base_url = base_url.clone();
    }
    if let Some(max_pages) = cli.max_pages {
        config.crawler.max_pages = Some(max_pages);
    }

    careers_crawl::config::validate(&config)?;
    Ok(config)
}

/// Handles the --dry-run mode: shows what would be crawled
fn handle_dry_run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    println!("=== careers-crawl Dry Run ===\n");

    println!("Site:");
    println!("  Base URL: {}", config.base_url()?);
    println!("  Start URL: {}", config.start_url()?);

    println!("\nCrawler Configuration:");
    println!("  Pacing delay: {}ms", config.crawler.pacing_delay_ms);
    println!("  Request timeout: {}s", config.crawler.request_timeout_secs);
    match config.crawler.max_pages {
        Some(max) => println!("  Max pages: {}", max),
        None => println!("  Max pages: unlimited"),
    }

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.value);

    println!("\nOutput:");
    println!("  CSV: {}", config.output.csv_path);
    println!("  Log: {}", log_file_path(&config.logging).display());

    println!("\n✓ Configuration is valid");

    Ok(())
}

/// Handles the main crawl operation and export
async fn handle_crawl(config: &Config) -> careers_crawl::Result<()> {
    tracing::info!("Start URL: {}", config.start_url()?);

    let outcome = crawl(config).await?;
    log_statistics(&compute_statistics(&outcome));

    let exporter = CsvExporter::new(&config.output.csv_path);
    export_outcome(&outcome, &exporter)?;

    Ok(())
}
