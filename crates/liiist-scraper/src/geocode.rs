//! Address geocoding through the Google Geocoding API.
//!
//! The API key is supplied by configuration. A response whose `status` is not
//! `"OK"` is not an error: it yields a [`Geocoded`] with every field unset so
//! the caller can still emit the shop record.

use reqwest::Url;
use serde::Deserialize;

use crate::client::ScrapeClient;
use crate::error::ScraperError;

/// Coordinates and administrative fields resolved for one address.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Geocoded {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
    #[serde(default)]
    address_components: Vec<AddressComponent>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct AddressComponent {
    long_name: String,
    #[serde(default)]
    types: Vec<String>,
}

pub struct GeocodingClient {
    http: ScrapeClient,
    api_key: String,
    base_url: Url,
}

impl GeocodingClient {
    /// Creates a geocoding client pointed at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        http: ScrapeClient,
        api_key: &str,
        base_url: &str,
    ) -> Result<Self, ScraperError> {
        let base_url = Url::parse(base_url).map_err(|e| ScraperError::InvalidUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            http,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Resolve `address` to coordinates, locality and postal code.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError`] on transport failure, non-2xx status, or an
    /// undecodable body. A well-formed non-`OK` answer is `Ok` with every
    /// field unset.
    pub async fn geocode(&self, address: &str) -> Result<Geocoded, ScraperError> {
        let url = self.build_url(address);
        let response: GeocodeResponse = self
            .http
            .get_json(&url, &format!("geocode(address={address})"))
            .await?;

        if response.status != "OK" {
            tracing::warn!(address, status = %response.status, "geocoding failed");
        }
        Ok(geocoded_from_response(&response))
    }

    fn build_url(&self, address: &str) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("address", address)
            .append_pair("key", &self.api_key);
        url
    }
}

pub(crate) fn geocoded_from_response(response: &GeocodeResponse) -> Geocoded {
    if response.status != "OK" {
        return Geocoded::default();
    }
    let Some(first) = response.results.first() else {
        return Geocoded::default();
    };

    let mut city = None;
    let mut postal_code = None;
    for component in &first.address_components {
        if component.types.iter().any(|t| t == "locality") {
            city = Some(component.long_name.clone());
        } else if component.types.iter().any(|t| t == "postal_code") {
            postal_code = Some(component.long_name.clone());
        }
    }

    Geocoded {
        lat: Some(first.geometry.location.lat),
        lng: Some(first.geometry.location.lng),
        city,
        postal_code,
    }
}
