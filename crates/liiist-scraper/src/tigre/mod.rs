//! Oasi Tigre shop list, fetched from the chain's store-locator API.
//!
//! One POST returns every store within a large radius of the chain's home
//! region; the pickup filter and numeric coercion happen in [`parse`].

mod parse;

pub use parse::{
    is_pickup_shop, parse_coordinate, select_pickup_shops, LocatorEntry, LocatorStore,
};

use serde::Serialize;

use crate::client::ScrapeClient;
use crate::error::ScraperError;
use crate::report::ShopScrapeReport;

pub const CHAIN_NAME: &str = "tigre";

pub const DEFAULT_LOCATOR_URL: &str = "https://storegabrielli.retailtune.com/store/locator.php";

// Search centre and radius that cover the whole chain.
const SEARCH_LATITUDE: f64 = 42.852_862_4;
const SEARCH_LONGITUDE: f64 = 13.538_975_9;
const SEARCH_RADIUS_M: u32 = 200_000;
const SEARCH_LANG: &str = "it";

#[derive(Debug, Serialize)]
struct LocatorRequest<'a> {
    user: LocatorQuery<'a>,
}

#[derive(Debug, Serialize)]
struct LocatorQuery<'a> {
    latitude: f64,
    longitude: f64,
    lang: &'a str,
    radius: u32,
}

impl LocatorRequest<'static> {
    fn whole_chain() -> Self {
        Self {
            user: LocatorQuery {
                latitude: SEARCH_LATITUDE,
                longitude: SEARCH_LONGITUDE,
                lang: SEARCH_LANG,
                radius: SEARCH_RADIUS_M,
            },
        }
    }
}

/// Fetch the Oasi Tigre store list and keep the pickup stores.
///
/// `locator_url` is normally [`DEFAULT_LOCATOR_URL`].
///
/// # Errors
///
/// Fails the whole run on a non-2xx response (status and body are carried in
/// [`ScraperError::UnexpectedStatus`]), an undecodable body, or a selected
/// store with a non-numeric coordinate.
pub async fn fetch_shops(
    http: &ScrapeClient,
    locator_url: &str,
) -> Result<ShopScrapeReport, ScraperError> {
    let entries: Vec<LocatorEntry> = http
        .post_json(locator_url, &LocatorRequest::whole_chain())
        .await?;
    let shops = select_pickup_shops(&entries)?;

    tracing::info!(
        locator_url,
        returned = entries.len(),
        selected = shops.len(),
        "fetched oasi tigre store list"
    );
    Ok(ShopScrapeReport::from_shops(shops))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn request_payload_matches_locator_contract() {
        let payload = serde_json::to_value(LocatorRequest::whole_chain()).unwrap();
        assert_eq!(
            payload,
            json!({
                "user": {
                    "latitude": 42.8528624,
                    "longitude": 13.5389759,
                    "lang": "it",
                    "radius": 200000
                }
            })
        );
    }
}
