//! `shops` command handlers.
//!
//! Each handler runs one chain scraper, writes the records as JSON, and
//! prints a run summary to stderr. Per-store failures are summarised, not
//! fatal; a failure to reach the chain's listing or locator ends the run.

use std::path::Path;

use anyhow::Context;
use liiist_scraper::ipertriscount::{self, IpertriscountSource};
use liiist_scraper::{tigre, GeocodingClient, ScrapeClient, ShopScrapeReport};

use crate::output::write_json;

pub(crate) async fn run_ipertriscount(
    config: &liiist_core::AppConfig,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let Some(api_key) = config.geocoding_api_key.as_deref() else {
        anyhow::bail!("LIIIST_GEOCODING_API_KEY must be set to scrape Ipertriscount stores");
    };

    let http = ScrapeClient::from_config(config).context("failed to build HTTP client")?;
    let geocoder = GeocodingClient::with_base_url(http.clone(), api_key, &config.geocoding_base_url)?;

    let report = ipertriscount::scrape_shops(&http, &geocoder, &IpertriscountSource::default())
        .await
        .context("failed to fetch the Ipertriscount store directory")?;

    write_json(&report.shops, output)?;
    print_summary(ipertriscount::CHAIN_NAME, &report);
    Ok(())
}

pub(crate) async fn run_tigre(
    config: &liiist_core::AppConfig,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let http = ScrapeClient::from_config(config).context("failed to build HTTP client")?;

    let report = tigre::fetch_shops(&http, tigre::DEFAULT_LOCATOR_URL)
        .await
        .context("failed to fetch the Oasi Tigre store list")?;

    write_json(&report.shops, output)?;
    print_summary(tigre::CHAIN_NAME, &report);
    Ok(())
}

fn print_summary(chain: &str, report: &ShopScrapeReport) {
    for line in summary_lines(chain, report) {
        eprintln!("{line}");
    }
}

fn summary_lines(chain: &str, report: &ShopScrapeReport) -> Vec<String> {
    let mut lines: Vec<String> = report
        .failures
        .iter()
        .map(|f| format!("  FAILED {}: {}", f.url, f.reason))
        .collect();
    lines.push(format!(
        "{chain}: {} shops from {} stores ({} failed)",
        report.shops.len(),
        report.attempted(),
        report.failures.len()
    ));
    lines
}
