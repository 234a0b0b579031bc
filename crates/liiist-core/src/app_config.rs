use std::path::PathBuf;

#[derive(Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub geocoding_api_key: Option<String>,
    pub geocoding_base_url: String,
    pub scraper_request_timeout_secs: u64,
    pub scraper_user_agent: String,
    pub scraper_max_retries: u32,
    pub scraper_retry_backoff_base_ms: u64,
    pub webdriver_url: String,
    pub browser_headless: bool,
    pub browser_wait_timeout_secs: u64,
    pub browser_poll_interval_ms: u64,
    pub catalog_location: String,
    pub taxonomy_path: Option<PathBuf>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field(
                "geocoding_api_key",
                &self.geocoding_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("geocoding_base_url", &self.geocoding_base_url)
            .field(
                "scraper_request_timeout_secs",
                &self.scraper_request_timeout_secs,
            )
            .field("scraper_user_agent", &self.scraper_user_agent)
            .field("scraper_max_retries", &self.scraper_max_retries)
            .field(
                "scraper_retry_backoff_base_ms",
                &self.scraper_retry_backoff_base_ms,
            )
            .field("webdriver_url", &self.webdriver_url)
            .field("browser_headless", &self.browser_headless)
            .field("browser_wait_timeout_secs", &self.browser_wait_timeout_secs)
            .field("browser_poll_interval_ms", &self.browser_poll_interval_ms)
            .field("catalog_location", &self.catalog_location)
            .field("taxonomy_path", &self.taxonomy_path)
            .finish()
    }
}
