use crate::app_config::AppConfig;
use crate::ConfigError;

const DEFAULT_GEOCODING_BASE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can feed a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        parse_flag(&or_default(var, default)).ok_or_else(|| {
            invalid(
                var,
                "expected one of true/false/1/0/yes/no".to_string(),
            )
        })
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let log_level = or_default("LIIIST_LOG_LEVEL", "info");
    let geocoding_api_key = optional("LIIIST_GEOCODING_API_KEY");
    let geocoding_base_url = or_default("LIIIST_GEOCODING_BASE_URL", DEFAULT_GEOCODING_BASE_URL);

    let scraper_request_timeout_secs = parse_u64("LIIIST_SCRAPER_REQUEST_TIMEOUT_SECS", "30")?;
    if scraper_request_timeout_secs == 0 {
        return Err(invalid(
            "LIIIST_SCRAPER_REQUEST_TIMEOUT_SECS",
            "must be greater than zero".to_string(),
        ));
    }
    let scraper_user_agent = or_default("LIIIST_SCRAPER_USER_AGENT", "liiist/0.1 (store-locator)");
    let scraper_max_retries = parse_u32("LIIIST_SCRAPER_MAX_RETRIES", "2")?;
    let scraper_retry_backoff_base_ms = parse_u64("LIIIST_SCRAPER_RETRY_BACKOFF_BASE_MS", "500")?;

    let webdriver_url = or_default("LIIIST_WEBDRIVER_URL", "http://localhost:4444");
    let browser_headless = parse_bool("LIIIST_BROWSER_HEADLESS", "true")?;
    let browser_wait_timeout_secs = parse_u64("LIIIST_BROWSER_WAIT_TIMEOUT_SECS", "10")?;
    let browser_poll_interval_ms = parse_u64("LIIIST_BROWSER_POLL_INTERVAL_MS", "100")?;
    if browser_poll_interval_ms == 0 {
        return Err(invalid(
            "LIIIST_BROWSER_POLL_INTERVAL_MS",
            "must be greater than zero".to_string(),
        ));
    }

    let catalog_location = or_default("LIIIST_CATALOG_LOCATION", "Roma");
    let taxonomy_path = optional("LIIIST_TAXONOMY_PATH").map(PathBuf::from);

    Ok(AppConfig {
        log_level,
        geocoding_api_key,
        geocoding_base_url,
        scraper_request_timeout_secs,
        scraper_user_agent,
        scraper_max_retries,
        scraper_retry_backoff_base_ms,
        webdriver_url,
        browser_headless,
        browser_wait_timeout_secs,
        browser_poll_interval_ms,
        catalog_location,
        taxonomy_path,
    })
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
