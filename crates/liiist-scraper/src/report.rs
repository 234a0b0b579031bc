//! Run reports returned by the shop scrapers.

use liiist_core::ShopRecord;
use serde::Serialize;

/// A store page that could not be turned into a [`ShopRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreFailure {
    pub url: String,
    /// Display form of the error that ended processing for this store.
    pub reason: String,
}

/// Records produced by one scraper run, plus the stores that were skipped.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ShopScrapeReport {
    pub shops: Vec<ShopRecord>,
    pub failures: Vec<StoreFailure>,
}

impl ShopScrapeReport {
    /// Report with no failures, used by scrapers that either fully succeed
    /// or abort.
    #[must_use]
    pub fn from_shops(shops: Vec<ShopRecord>) -> Self {
        Self {
            shops,
            failures: Vec::new(),
        }
    }

    /// Stores attempted in this run, successful or not.
    #[must_use]
    pub fn attempted(&self) -> usize {
        self.shops.len() + self.failures.len()
    }

    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shop(street: &str) -> ShopRecord {
        ShopRecord {
            name: "tigre".to_string(),
            street: street.to_string(),
            lat: None,
            long: None,
            city: None,
            zip_code: None,
            working_hours: String::new(),
            picks_up_in_shop: true,
        }
    }

    #[test]
    fn attempted_counts_shops_and_failures() {
        let report = ShopScrapeReport {
            shops: vec![shop("Via Roma 1"), shop("Via Po 2")],
            failures: vec![StoreFailure {
                url: "https://x/y".to_string(),
                reason: "missing address".to_string(),
            }],
        };
        assert_eq!(report.attempted(), 3);
        assert!(report.has_failures());
    }

    #[test]
    fn from_shops_has_no_failures() {
        let report = ShopScrapeReport::from_shops(vec![shop("Via Roma 1")]);
        assert_eq!(report.attempted(), 1);
        assert!(!report.has_failures());
    }
}
