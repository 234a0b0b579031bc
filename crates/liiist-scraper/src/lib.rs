pub mod catalog;
pub mod client;
pub mod error;
pub mod geocode;
pub mod ipertriscount;
mod rate_limit;
pub mod report;
pub mod tigre;

pub use catalog::{CatalogError, CatalogLayout, CrawlReport, WebDriverSession};
pub use client::ScrapeClient;
pub use error::ScraperError;
pub use geocode::{Geocoded, GeocodingClient};
pub use report::{ShopScrapeReport, StoreFailure};
