//! Ipertriscount store scraper.
//!
//! Walks the Cedigros store directory, parses each store page, and geocodes
//! the scraped address. A store that fails to fetch or parse is recorded in
//! the report and skipped; the remaining stores are still processed.

mod parse;

pub use parse::{
    extract_store_urls, filter_working_hours, has_surface_marker, is_phone_number,
    parse_store_page, StorePage,
};

use liiist_core::ShopRecord;
use reqwest::Url;

use crate::client::ScrapeClient;
use crate::error::ScraperError;
use crate::geocode::{Geocoded, GeocodingClient};
use crate::report::{ShopScrapeReport, StoreFailure};

pub const CHAIN_NAME: &str = "ipertriscount";

const DEFAULT_SITE_BASE: &str = "https://www.cedigros.com";
const LISTING_PATH: &str = "/insegne/itemlist/filter.html?category=26&moduleId=219&Itemid=701&abb249e6156b7eea4b28c92fb743caa0=1&format=raw";

/// Separator used when flattening opening-hours lines into one string.
const HOURS_SEPARATOR: &str = "; ";

/// Where the store directory lives.
#[derive(Debug, Clone)]
pub struct IpertriscountSource {
    pub listing_url: String,
    /// Base that relative store links are resolved against.
    pub site_base: String,
}

impl IpertriscountSource {
    /// Points the scraper at another host, keeping the listing path.
    #[must_use]
    pub fn with_site_base(site_base: &str) -> Self {
        let site_base = site_base.trim_end_matches('/');
        Self {
            listing_url: format!("{site_base}{LISTING_PATH}"),
            site_base: site_base.to_string(),
        }
    }
}

impl Default for IpertriscountSource {
    fn default() -> Self {
        Self::with_site_base(DEFAULT_SITE_BASE)
    }
}

/// Scrape every Ipertriscount store listed in the directory.
///
/// # Errors
///
/// Returns [`ScraperError`] only when the site base is not a URL or the
/// directory listing itself cannot be fetched. Per-store failures land in [`ShopScrapeReport::failures`].
pub async fn scrape_shops(
    http: &ScrapeClient,
    geocoder: &GeocodingClient,
    source: &IpertriscountSource,
) -> Result<ShopScrapeReport, ScraperError> {
    let site_base = Url::parse(&source.site_base).map_err(|e| ScraperError::InvalidUrl {
        url: source.site_base.clone(),
        reason: e.to_string(),
    })?;
    let listing = http.get_text(&source.listing_url).await?;
    let store_urls = extract_store_urls(&listing, &site_base);
    tracing::info!(
        listing_url = %source.listing_url,
        count = store_urls.len(),
        "discovered store pages"
    );

    let mut report = ShopScrapeReport::default();
    for url in &store_urls {
        match scrape_store(http, geocoder, url).await {
            Ok(shop) => report.shops.push(shop),
            Err(error) => {
                tracing::warn!(url = %url, %error, "store skipped");
                report.failures.push(StoreFailure {
                    url: url.clone(),
                    reason: error.to_string(),
                });
            }
        }
    }

    Ok(report)
}

async fn scrape_store(
    http: &ScrapeClient,
    geocoder: &GeocodingClient,
    url: &str,
) -> Result<ShopRecord, ScraperError> {
    let html = http.get_text(url).await?;
    let page = parse_store_page(&html, url)?;

    let geocoded = if page.city_name.is_empty() {
        tracing::debug!(url, "no city heading; skipping geocoding");
        Geocoded::default()
    } else {
        match geocoder.geocode(&page.address).await {
            Ok(geocoded) => geocoded,
            Err(error) => {
                tracing::warn!(url, address = %page.address, %error, "geocoding request failed");
                Geocoded::default()
            }
        }
    };

    Ok(build_shop_record(page, geocoded))
}

fn build_shop_record(page: StorePage, geocoded: Geocoded) -> ShopRecord {
    ShopRecord {
        name: CHAIN_NAME.to_string(),
        street: page.address,
        lat: geocoded.lat,
        long: geocoded.lng,
        city: geocoded.city,
        zip_code: geocoded.postal_code,
        working_hours: page.working_hours.join(HOURS_SEPARATOR),
        picks_up_in_shop: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> StorePage {
        StorePage {
            city_name: "Guidonia".to_string(),
            address: "Via Maremmana Inferiore 1".to_string(),
            working_hours: vec!["Lun-Sab 8-20".to_string(), "Dom 9-13".to_string()],
        }
    }

    #[test]
    fn shop_record_uses_geocoded_fields() {
        let shop = build_shop_record(
            page(),
            Geocoded {
                lat: Some(41.99),
                lng: Some(12.72),
                city: Some("Guidonia Montecelio".to_string()),
                postal_code: Some("00012".to_string()),
            },
        );
        assert_eq!(shop.name, "ipertriscount");
        assert_eq!(shop.street, "Via Maremmana Inferiore 1");
        assert_eq!(shop.lat, Some(41.99));
        assert_eq!(shop.long, Some(12.72));
        assert_eq!(shop.city.as_deref(), Some("Guidonia Montecelio"));
        assert_eq!(shop.zip_code.as_deref(), Some("00012"));
        assert_eq!(shop.working_hours, "Lun-Sab 8-20; Dom 9-13");
        assert!(shop.picks_up_in_shop);
    }

    #[test]
    fn failed_geocoding_keeps_record_with_null_coordinates() {
        let shop = build_shop_record(page(), Geocoded::default());
        assert!(shop.lat.is_none());
        assert!(shop.long.is_none());
        assert!(shop.zip_code.is_none());
        assert!(shop.city.is_none(), "city comes from the geocoder only");
        assert_eq!(shop.street, "Via Maremmana Inferiore 1");
    }

    #[test]
    fn default_source_points_at_cedigros() {
        let source = IpertriscountSource::default();
        assert_eq!(source.site_base, "https://www.cedigros.com");
        assert!(source.listing_url.contains("category=26"));
    }

    #[test]
    fn with_site_base_keeps_listing_path_and_query() {
        let source = IpertriscountSource::with_site_base("http://127.0.0.1:9000/");
        assert_eq!(
            source.listing_url,
            "http://127.0.0.1:9000/insegne/itemlist/filter.html?category=26&moduleId=219&Itemid=701&abb249e6156b7eea4b28c92fb743caa0=1&format=raw"
        );
    }
}
