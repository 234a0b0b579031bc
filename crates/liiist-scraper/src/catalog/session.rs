//! Browser session abstraction and polling waits.
//!
//! The crawler talks to the browser only through [`BrowserSession`], so the
//! page walk can run against [`super::WebDriverSession`] in production and an
//! in-memory page in tests.

use std::fmt;
use std::time::Duration;

use tokio::time::Instant;

use super::error::CatalogError;

/// Longest single sleep between two polls.
const MAX_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// How an element is addressed on the page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Locator {
    XPath(String),
    Css(String),
}

impl Locator {
    pub fn xpath(xpath: impl Into<String>) -> Self {
        Self::XPath(xpath.into())
    }

    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Matches elements carrying the given class name.
    #[must_use]
    pub fn class(name: &str) -> Self {
        Self::Css(format!(".{name}"))
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::XPath(xpath) => write!(f, "xpath:{xpath}"),
            Self::Css(selector) => write!(f, "css:{selector}"),
        }
    }
}

/// The browser operations the catalog crawler needs.
///
/// Element-targeting methods act on the first element matching the locator
/// and fail with [`CatalogError::WebDriver`] when nothing matches. None of
/// them wait: waiting is layered on top with [`wait_for_element`].
#[allow(async_fn_in_trait)]
pub trait BrowserSession {
    async fn goto(&mut self, url: &str) -> Result<(), CatalogError>;

    /// Number of elements currently matching `locator`.
    async fn count(&mut self, locator: &Locator) -> Result<usize, CatalogError>;

    async fn text(&mut self, locator: &Locator) -> Result<String, CatalogError>;

    async fn attr(&mut self, locator: &Locator, name: &str)
        -> Result<Option<String>, CatalogError>;

    async fn click(&mut self, locator: &Locator) -> Result<(), CatalogError>;

    async fn scroll_into_view(&mut self, locator: &Locator) -> Result<(), CatalogError>;

    async fn send_keys(&mut self, locator: &Locator, text: &str) -> Result<(), CatalogError>;

    async fn press_enter(&mut self, locator: &Locator) -> Result<(), CatalogError>;

    /// End the browser session.
    async fn close(self) -> Result<(), CatalogError>;
}

/// Bounded polling schedule: the first poll waits `initial_poll`, each
/// following poll doubles the delay, and the whole wait never exceeds
/// `timeout`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitPolicy {
    pub timeout: Duration,
    pub initial_poll: Duration,
}

impl WaitPolicy {
    #[must_use]
    pub fn new(timeout: Duration, initial_poll: Duration) -> Self {
        Self {
            timeout,
            initial_poll,
        }
    }

    #[must_use]
    pub fn from_config(config: &liiist_core::AppConfig) -> Self {
        Self::new(
            Duration::from_secs(config.browser_wait_timeout_secs),
            Duration::from_millis(config.browser_poll_interval_ms),
        )
    }

    /// Same poll schedule with a different overall bound.
    #[must_use]
    pub fn with_timeout(self, timeout: Duration) -> Self {
        Self { timeout, ..self }
    }
}

impl Default for WaitPolicy {
    fn default() -> Self {
        Self::new(Duration::from_secs(10), Duration::from_millis(100))
    }
}

/// Wait until at least one element matches `locator`.
///
/// The session is left open on timeout; the caller decides whether the
/// absence is fatal.
///
/// # Errors
///
/// Returns [`CatalogError::ElementTimeout`] when nothing matched within the
/// policy timeout, or the session error if a lookup itself failed.
pub async fn wait_for_element<S: BrowserSession>(
    session: &mut S,
    locator: &Locator,
    policy: WaitPolicy,
) -> Result<(), CatalogError> {
    wait_for_count(session, locator, policy, |n| n > 0)
        .await
        .map(|_| ())
}

/// Number of elements matching `locator` right now, without waiting.
///
/// # Errors
///
/// Propagates session errors; an empty match is `Ok(0)`.
pub async fn count_elements<S: BrowserSession>(
    session: &mut S,
    locator: &Locator,
) -> Result<usize, CatalogError> {
    let count = session.count(locator).await?;
    if count == 0 {
        tracing::debug!(%locator, "no elements found");
    }
    Ok(count)
}

/// Poll the match count of `locator` until `ready` accepts it.
///
/// Returns the accepted count.
///
/// # Errors
///
/// Returns [`CatalogError::ElementTimeout`] if `ready` never accepts a count
/// within the policy timeout.
pub(crate) async fn wait_for_count<S, F>(
    session: &mut S,
    locator: &Locator,
    policy: WaitPolicy,
    ready: F,
) -> Result<usize, CatalogError>
where
    S: BrowserSession,
    F: Fn(usize) -> bool,
{
    let started = Instant::now();
    let mut delay = policy.initial_poll;

    loop {
        let count = session.count(locator).await?;
        if ready(count) {
            return Ok(count);
        }

        let elapsed = started.elapsed();
        if elapsed >= policy.timeout {
            #[allow(clippy::cast_possible_truncation)]
            let waited_ms = elapsed.as_millis() as u64;
            return Err(CatalogError::ElementTimeout {
                locator: locator.to_string(),
                waited_ms,
            });
        }

        tokio::time::sleep(delay.min(policy.timeout - elapsed)).await;
        delay = (delay * 2).min(MAX_POLL_INTERVAL);
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
