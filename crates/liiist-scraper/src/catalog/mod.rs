//! Browser-driven crawler for the Oasi Tigre online shop catalog.
//!
//! The crawl selects a pickup store, then walks each `(category,
//! sub-category)` page of a [`liiist_core::CategoryTaxonomy`] and reads every
//! product card it finds. Everything runs on a single browser session, one
//! command at a time.

mod crawl;
mod error;
mod layout;
#[cfg(test)]
mod mock;
mod session;
mod store;
mod webdriver;

pub use crawl::{
    crawl_catalog, run_catalog, CrawlOptions, CrawlReport, PageFailure, StoreChoice,
    DEFAULT_MAX_LOAD_MORE,
};
pub use error::CatalogError;
pub use layout::{CardField, CatalogLayout};
pub use session::{count_elements, wait_for_element, BrowserSession, Locator, WaitPolicy};
pub use store::{reselect_store, select_store};
pub use webdriver::WebDriverSession;
