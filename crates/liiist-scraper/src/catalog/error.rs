use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("webdriver error: {0}")]
    WebDriver(String),

    #[error("element {locator} not present after {waited_ms}ms")]
    ElementTimeout { locator: String, waited_ms: u64 },

    #[error("no shops found for location {location:?}")]
    NoShopsFound { location: String },

    #[error("gave up paginating {url} after {max_pages} load-more clicks")]
    PaginationLimit { url: String, max_pages: u32 },
}

impl From<fantoccini::error::CmdError> for CatalogError {
    fn from(e: fantoccini::error::CmdError) -> Self {
        Self::WebDriver(e.to_string())
    }
}

impl From<fantoccini::error::NewSessionError> for CatalogError {
    fn from(e: fantoccini::error::NewSessionError) -> Self {
        Self::WebDriver(e.to_string())
    }
}
