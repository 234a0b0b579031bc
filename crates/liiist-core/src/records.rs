//! Normalized records produced by the scrapers.

use serde::{Deserialize, Serialize};

/// A store entry as emitted by the shop scrapers.
///
/// Coordinates, city and postal code are optional because geocoding may fail
/// or the upstream source may not provide them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopRecord {
    pub name: String,
    /// Raw address string, exactly as scraped.
    pub street: String,
    pub lat: Option<f64>,
    pub long: Option<f64>,
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub zip_code: Option<String>,
    pub working_hours: String,
    pub picks_up_in_shop: bool,
}

/// A product card extracted by the catalog crawler.
///
/// No identity key is captured, so the same product seen twice is reported
/// twice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub new_price: String,
    pub old_price: String,
}

impl std::fmt::Display for ProductRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.name, self.description, self.new_price, self.old_price
        )
    }
}
