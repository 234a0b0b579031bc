//! HTML parsing for the Cedigros store directory and store detail pages.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use reqwest::Url;
use scraper::{ElementRef, Html, Selector};

use crate::error::ScraperError;

const E: &str = "valid selector";

static ANCHOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a[href]").expect(E));
static INFO_PANEL: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"div[class="fwTableCell span_7 fwPad1x mainInfos"]"#).expect(E)
});
static INFO_TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"h3[class="tpl-ItemTitle text-left itemAnim"]"#).expect(E));
static SMALL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("small").expect(E));
static HOURS_PANEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"div[class="fwPad1x itemAnim"]"#).expect(E));
static HOURS_SPAN: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"span[style="float:left; min-height:1.2em; line-height:1.2em"]"#).expect(E)
});

/// Italian landline and North-American style phone layouts seen in the
/// hours panel.
static PHONE_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\d{2}\.\d{2}\s\d{2}\s\d{2}\s\d{2}|\d{2}\.\s\d{2}\s\d{2}\s\d{2}\s\d{2}|\d{2}\s\d{7}|\d{3}-\d{3}-\d{4}|\(\d{3}\)\s\d{3}-\d{4}|\d{3}\s\d{3}\s\d{4}",
    )
    .expect("valid regex")
});

/// Marker used by the site for the store floor-area annotation.
const SURFACE_MARKER: &str = "Superficie";

/// Fields scraped from one store detail page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorePage {
    pub city_name: String,
    pub address: String,
    pub working_hours: Vec<String>,
}

/// Collect the distinct store detail URLs linked from the directory listing.
///
/// Relative `href`s are resolved against `site_base`; fragment-only and
/// non-HTTP links are ignored.
#[must_use]
pub fn extract_store_urls(listing_html: &str, site_base: &Url) -> BTreeSet<String> {
    let document = Html::parse_document(listing_html);

    document
        .select(&ANCHOR)
        .filter_map(|a| a.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty() && !href.starts_with('#'))
        .filter_map(|href| site_base.join(href).ok())
        .filter(|url| matches!(url.scheme(), "http" | "https"))
        .map(String::from)
        .collect()
}

/// Parse a store detail page into city, address and opening-hours lines.
///
/// # Errors
///
/// Returns [`ScraperError::MissingField`] when the info panel, its heading,
/// the address, or the hours panel is absent.
pub fn parse_store_page(html: &str, url: &str) -> Result<StorePage, ScraperError> {
    let document = Html::parse_document(html);
    let missing = |field: &str| ScraperError::MissingField {
        context: url.to_owned(),
        field: field.to_owned(),
    };

    let title = document
        .select(&INFO_PANEL)
        .next()
        .ok_or_else(|| missing("info panel"))?
        .select(&INFO_TITLE)
        .next()
        .ok_or_else(|| missing("info heading"))?;

    let address = title
        .select(&SMALL)
        .next()
        .map(|small| small.text().collect::<String>().trim().to_owned())
        .filter(|address| !address.is_empty())
        .ok_or_else(|| missing("address"))?;

    let city_name = leading_text(title);

    let hours_panel = document
        .select(&HOURS_PANEL)
        .next()
        .ok_or_else(|| missing("hours panel"))?;
    let spans = hours_panel
        .select(&HOURS_SPAN)
        .map(|span| span.text().collect::<String>().trim().to_owned());

    Ok(StorePage {
        city_name,
        address,
        working_hours: filter_working_hours(spans),
    })
}

/// Text of the first child node when it is a text node, trimmed.
fn leading_text(element: ElementRef<'_>) -> String {
    element
        .children()
        .next()
        .and_then(|node| node.value().as_text().map(|t| t.trim().to_owned()))
        .unwrap_or_default()
}

/// Whether `text` contains a phone number in one of the known layouts.
#[must_use]
pub fn is_phone_number(text: &str) -> bool {
    PHONE_NUMBER.is_match(text)
}

/// Whether `text` is the store floor-area annotation.
#[must_use]
pub fn has_surface_marker(text: &str) -> bool {
    text.contains(SURFACE_MARKER)
}

/// Keep the hours-panel lines that are neither phone numbers nor the
/// floor-area annotation, preserving order.
pub fn filter_working_hours<I>(lines: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    lines
        .into_iter()
        .map(Into::into)
        .filter(|line| !(is_phone_number(line) || has_surface_marker(line)))
        .collect()
}
