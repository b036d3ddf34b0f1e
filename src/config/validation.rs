use crate::config::types::{Config, CrawlerConfig, LoggingConfig, OutputConfig, SiteConfig, UserAgentConfig};
use crate::url::parse_base_url;
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    validate_logging_config(&config.logging)?;
    Ok(())
}

/// Validates the target site
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let base = parse_base_url(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    if !config.start_path.starts_with('/') {
        return Err(ConfigError::Validation(format!(
            "start-path must begin with '/', got '{}'",
            config.start_path
        )));
    }

    base.join(&config.start_path)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid start-path: {}", e)))?;

    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.pacing_delay_ms < 100 {
        return Err(ConfigError::Validation(format!(
            "pacing-delay-ms must be >= 100ms, got {}ms",
            config.pacing_delay_ms
        )));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "request-timeout-secs must be >= 1, got {}",
            config.request_timeout_secs
        )));
    }

    if config.max_pages == Some(0) {
        return Err(ConfigError::Validation(
            "max-pages must be >= 1 when set".to_string(),
        ));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.value.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent value cannot be empty".to_string(),
        ));
    }

    if config.value.chars().any(|c| c.is_control()) {
        return Err(ConfigError::Validation(
            "user-agent value cannot contain control characters".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.csv_path.is_empty() {
        return Err(ConfigError::Validation(
            "csv-path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates log sink configuration
fn validate_logging_config(config: &LoggingConfig) -> Result<(), ConfigError> {
    if config.log_dir.is_empty() {
        return Err(ConfigError::Validation("log-dir cannot be empty".to_string()));
    }

    if config.log_file.is_empty() || config.log_file.contains(['/', '\\']) {
        return Err(ConfigError::Validation(format!(
            "log-file must be a plain file name, got '{}'",
            config.log_file
        )));
    }

    Ok(())
}
