//! Shared HTTP client for the shop scrapers.

use std::time::Duration;

use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ScraperError;
use crate::rate_limit::retry_with_backoff;

/// Upper bound on how much of an error response body is kept in
/// [`ScraperError::UnexpectedStatus`].
const MAX_ERROR_BODY_CHARS: usize = 512;

/// HTTP client used by every shop scraper.
///
/// Non-2xx responses become typed errors; 429 and network failures are
/// retried with exponential backoff up to `max_retries` additional attempts.
#[derive(Clone)]
pub struct ScrapeClient {
    client: Client,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl ScrapeClient {
    /// Creates a client with the configured timeout, `User-Agent` and retry policy.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            max_retries,
            backoff_base_ms,
        })
    }

    /// Builds a client from the application config.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn from_config(config: &liiist_core::AppConfig) -> Result<Self, ScraperError> {
        Self::new(
            config.scraper_request_timeout_secs,
            &config.scraper_user_agent,
            config.scraper_max_retries,
            config.scraper_retry_backoff_base_ms,
        )
    }

    /// GET `url` and return the response body as text.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::RateLimited`] — HTTP 429 after all retries.
    /// - [`ScraperError::NotFound`] — HTTP 404 (not retried).
    /// - [`ScraperError::UnexpectedStatus`] — any other non-2xx status.
    /// - [`ScraperError::Http`] — network or TLS failure after all retries.
    pub async fn get_text(&self, url: &str) -> Result<String, ScraperError> {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || async move {
            let response = self
                .client
                .get(url)
                .header(reqwest::header::ACCEPT, "*/*")
                .send()
                .await?;
            let response = check_status(response, url).await?;
            Ok(response.text().await?)
        })
        .await
    }

    /// GET `url` and decode the JSON body into `T`.
    ///
    /// # Errors
    ///
    /// Same as [`ScrapeClient::get_text`], plus [`ScraperError::Deserialize`]
    /// when the body does not match `T`.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &Url,
        context: &str,
    ) -> Result<T, ScraperError> {
        let body = self.get_text(url.as_str()).await?;
        serde_json::from_str(&body).map_err(|e| ScraperError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }

    /// POST `payload` as JSON to `url` and decode the JSON response into `T`.
    ///
    /// # Errors
    ///
    /// Same as [`ScrapeClient::get_text`], plus [`ScraperError::Deserialize`]
    /// when the body does not match `T`.
    pub async fn post_json<B, T>(&self, url: &str, payload: &B) -> Result<T, ScraperError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = retry_with_backoff(self.max_retries, self.backoff_base_ms, || async move {
            let response = self
                .client
                .post(url)
                .header(reqwest::header::ACCEPT, "*/*")
                .json(payload)
                .send()
                .await?;
            let response = check_status(response, url).await?;
            Ok(response.text().await?)
        })
        .await?;

        serde_json::from_str(&body).map_err(|e| ScraperError::Deserialize {
            context: format!("POST {url}"),
            source: e,
        })
    }
}

async fn check_status(response: Response, url: &str) -> Result<Response, ScraperError> {
    let status = response.status();

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        let retry_after_secs = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(60);
        return Err(ScraperError::RateLimited {
            domain: extract_domain(url),
            retry_after_secs,
        });
    }

    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(ScraperError::NotFound {
            url: url.to_owned(),
        });
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ScraperError::UnexpectedStatus {
            status: status.as_u16(),
            url: url.to_owned(),
            body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
        });
    }

    Ok(response)
}

/// Host part of `url`, or the input unchanged when it does not parse.
pub(crate) fn extract_domain(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_owned))
        .unwrap_or_else(|| url.to_owned())
}
