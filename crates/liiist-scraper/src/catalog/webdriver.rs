//! [`BrowserSession`] backed by a WebDriver server through `fantoccini`.

use fantoccini::elements::Element;
use fantoccini::key::Key;
use fantoccini::{Client, ClientBuilder};
use serde_json::{json, Map, Value};

use super::error::CatalogError;
use super::session::{BrowserSession, Locator};

const SCROLL_INTO_VIEW: &str = "arguments[0].scrollIntoView(true)";

pub struct WebDriverSession {
    client: Client,
}

impl WebDriverSession {
    /// Open a new browser session on the WebDriver server at `webdriver_url`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::WebDriver`] if the server is unreachable or
    /// refuses the session.
    pub async fn connect(webdriver_url: &str, headless: bool) -> Result<Self, CatalogError> {
        let client = ClientBuilder::native()
            .capabilities(capabilities(headless))
            .connect(webdriver_url)
            .await?;
        tracing::debug!(webdriver_url, headless, "browser session opened");
        Ok(Self { client })
    }

    /// # Errors
    ///
    /// Same as [`WebDriverSession::connect`].
    pub async fn from_config(config: &liiist_core::AppConfig) -> Result<Self, CatalogError> {
        Self::connect(&config.webdriver_url, config.browser_headless).await
    }

    async fn find(&self, locator: &Locator) -> Result<Element, CatalogError> {
        Ok(self.client.find(to_fantoccini(locator)).await?)
    }
}

/// Both Firefox and Chrome options are sent; each driver ignores the other.
fn capabilities(headless: bool) -> Map<String, Value> {
    let args: Vec<&str> = if headless { vec!["--headless"] } else { Vec::new() };
    let mut caps = Map::new();
    caps.insert("moz:firefoxOptions".to_string(), json!({ "args": args }));
    caps.insert("goog:chromeOptions".to_string(), json!({ "args": args }));
    caps
}

fn to_fantoccini(locator: &Locator) -> fantoccini::Locator<'_> {
    match locator {
        Locator::XPath(xpath) => fantoccini::Locator::XPath(xpath),
        Locator::Css(selector) => fantoccini::Locator::Css(selector),
    }
}

impl BrowserSession for WebDriverSession {
    async fn goto(&mut self, url: &str) -> Result<(), CatalogError> {
        tracing::debug!(url, "navigating");
        Ok(self.client.goto(url).await?)
    }

    async fn count(&mut self, locator: &Locator) -> Result<usize, CatalogError> {
        Ok(self.client.find_all(to_fantoccini(locator)).await?.len())
    }

    async fn text(&mut self, locator: &Locator) -> Result<String, CatalogError> {
        Ok(self.find(locator).await?.text().await?)
    }

    async fn attr(
        &mut self,
        locator: &Locator,
        name: &str,
    ) -> Result<Option<String>, CatalogError> {
        Ok(self.find(locator).await?.attr(name).await?)
    }

    async fn click(&mut self, locator: &Locator) -> Result<(), CatalogError> {
        Ok(self.find(locator).await?.click().await?)
    }

    async fn scroll_into_view(&mut self, locator: &Locator) -> Result<(), CatalogError> {
        let element = self.find(locator).await?;
        let arg = serde_json::to_value(&element)
            .map_err(|e| CatalogError::WebDriver(format!("element reference: {e}")))?;
        self.client.execute(SCROLL_INTO_VIEW, vec![arg]).await?;
        Ok(())
    }

    async fn send_keys(&mut self, locator: &Locator, text: &str) -> Result<(), CatalogError> {
        Ok(self.find(locator).await?.send_keys(text).await?)
    }

    async fn press_enter(&mut self, locator: &Locator) -> Result<(), CatalogError> {
        let enter = char::from(Key::Enter).to_string();
        Ok(self.find(locator).await?.send_keys(&enter).await?)
    }

    async fn close(self) -> Result<(), CatalogError> {
        self.client.close().await?;
        tracing::debug!("browser session closed");
        Ok(())
    }
}
