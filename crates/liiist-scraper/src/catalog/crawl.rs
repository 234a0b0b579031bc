//! Category walk over the online shop catalog.
//!
//! For every `(category, sub-category)` page the crawler counts the
//! micro-category panels, scrolls each one into view, reads every product
//! card, and keeps clicking the panel's "load more" control until it stops
//! producing new cards. A card with a missing field is skipped; a page that
//! cannot be walked is recorded in the report. Only a failed navigation
//! ends the crawl.

use std::ops::RangeInclusive;

use liiist_core::{CategoryTaxonomy, ProductRecord};

use super::error::CatalogError;
use super::layout::{CardField, CatalogLayout};
use super::session::{
    count_elements, wait_for_count, wait_for_element, BrowserSession, WaitPolicy,
};
use super::store::{reselect_store, select_store};

/// Load-more clicks allowed per panel before the panel is abandoned.
pub const DEFAULT_MAX_LOAD_MORE: u32 = 50;

#[derive(Debug, Clone)]
pub struct CrawlOptions {
    pub policy: WaitPolicy,
    pub max_load_more: u32,
}

impl CrawlOptions {
    #[must_use]
    pub fn new(policy: WaitPolicy) -> Self {
        Self {
            policy,
            max_load_more: DEFAULT_MAX_LOAD_MORE,
        }
    }
}

/// A category page the crawler could not fully walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFailure {
    pub url: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct CrawlReport {
    pub products: Vec<ProductRecord>,
    /// Cards whose fields were all read.
    pub total_processed: usize,
    /// Cards abandoned because a field did not render.
    pub skipped_cards: usize,
    pub page_failures: Vec<PageFailure>,
}

/// How to pick the store whose catalog is crawled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreChoice {
    /// First-time selection from the landing page.
    Select(String),
    /// Change the store already attached to the browser profile.
    Reselect(String),
}

/// Select a store, crawl the taxonomy, and close the session.
///
/// The session is closed exactly once, whether the crawl finished or
/// stopped on a fatal error.
///
/// # Errors
///
/// Returns the first fatal [`CatalogError`]: a failed store selection or a
/// failed page navigation. A failure to close the session is returned only
/// when the crawl itself succeeded.
pub async fn run_catalog<S: BrowserSession>(
    mut session: S,
    layout: &CatalogLayout,
    taxonomy: &CategoryTaxonomy,
    store: &StoreChoice,
    options: &CrawlOptions,
) -> Result<CrawlReport, CatalogError> {
    let outcome = async {
        match store {
            StoreChoice::Select(location) => {
                select_store(&mut session, layout, location, options.policy).await?;
            }
            StoreChoice::Reselect(location) => {
                reselect_store(&mut session, layout, location, options.policy).await?;
            }
        }
        crawl_catalog(&mut session, layout, taxonomy, options).await
    }
    .await;

    let closed = session.close().await;
    match (outcome, closed) {
        (Ok(report), Ok(())) => Ok(report),
        (Ok(_), Err(close_error)) => Err(close_error),
        (Err(error), Ok(())) => Err(error),
        (Err(error), Err(close_error)) => {
            tracing::warn!(%close_error, "failed to close browser session");
            Err(error)
        }
    }
}

/// Walk every page of `taxonomy` with an already prepared session.
///
/// # Errors
///
/// Returns a [`CatalogError`] only when navigating to a category page fails.
pub async fn crawl_catalog<S: BrowserSession>(
    session: &mut S,
    layout: &CatalogLayout,
    taxonomy: &CategoryTaxonomy,
    options: &CrawlOptions,
) -> Result<CrawlReport, CatalogError> {
    let mut report = CrawlReport::default();

    for (category, item) in taxonomy.pairs() {
        let url = layout.category_url(category, item);
        session.goto(&url).await?;

        if let Err(error) = crawl_page(session, layout, options, &url, &mut report).await {
            tracing::warn!(url = %url, %error, "category page abandoned");
            report.page_failures.push(PageFailure {
                url,
                reason: error.to_string(),
            });
        }
    }

    tracing::info!(
        total_processed = report.total_processed,
        skipped_cards = report.skipped_cards,
        failed_pages = report.page_failures.len(),
        "catalog crawl finished"
    );
    Ok(report)
}

async fn crawl_page<S: BrowserSession>(
    session: &mut S,
    layout: &CatalogLayout,
    options: &CrawlOptions,
    url: &str,
    report: &mut CrawlReport,
) -> Result<(), CatalogError> {
    let panels = layout.panels();
    if let Err(error) = wait_for_element(session, &panels, options.policy).await {
        tracing::warn!(url, %error, "no panels rendered");
        return Ok(());
    }
    let panel_count = count_elements(session, &panels).await?;
    tracing::debug!(url, panel_count, "category page loaded");

    for panel in layout.first_panel_index..=panel_count {
        if let Err(error) = session.scroll_into_view(&layout.panel(panel)).await {
            tracing::debug!(url, panel, %error, "panel not scrollable; ending page");
            break;
        }
        match crawl_panel(session, layout, options, url, panel, report).await {
            Err(error @ CatalogError::PaginationLimit { .. }) => {
                tracing::warn!(url, panel, %error, "panel truncated");
                report.page_failures.push(PageFailure {
                    url: url.to_owned(),
                    reason: error.to_string(),
                });
            }
            result => result?,
        }
    }
    Ok(())
}

async fn crawl_panel<S: BrowserSession>(
    session: &mut S,
    layout: &CatalogLayout,
    options: &CrawlOptions,
    url: &str,
    panel: usize,
    report: &mut CrawlReport,
) -> Result<(), CatalogError> {
    let cards = layout.cards(panel);
    let load_more = layout.load_more(panel);
    let mut available = count_elements(session, &cards).await?;
    let mut seen = 0;
    let mut clicks = 0;

    loop {
        read_cards(session, layout, options.policy, url, panel, seen + 1..=available, report)
            .await;
        seen = seen.max(available);

        if clicks >= options.max_load_more {
            if count_elements(session, &load_more).await? == 0 {
                return Ok(());
            }
            return Err(CatalogError::PaginationLimit {
                url: url.to_owned(),
                max_pages: options.max_load_more,
            });
        }

        if session.click(&load_more).await.is_err() {
            return Ok(());
        }
        clicks += 1;

        match wait_for_count(session, &cards, options.policy, |n| n > seen).await {
            Ok(grown) => available = grown,
            Err(CatalogError::ElementTimeout { .. }) => return Ok(()),
            Err(other) => return Err(other),
        }
    }
}

async fn read_cards<S: BrowserSession>(
    session: &mut S,
    layout: &CatalogLayout,
    policy: WaitPolicy,
    url: &str,
    panel: usize,
    indices: RangeInclusive<usize>,
    report: &mut CrawlReport,
) {
    for card in indices {
        match read_card(session, layout, policy, panel, card).await {
            Ok(product) => {
                tracing::info!(
                    name = %product.name,
                    description = %product.description,
                    new_price = %product.new_price,
                    old_price = %product.old_price,
                    "product"
                );
                report.products.push(product);
                report.total_processed += 1;
            }
            Err(error) => {
                tracing::warn!(url, panel, card, %error, "card skipped");
                report.skipped_cards += 1;
            }
        }
    }
}

async fn read_card<S: BrowserSession>(
    session: &mut S,
    layout: &CatalogLayout,
    policy: WaitPolicy,
    panel: usize,
    card: usize,
) -> Result<ProductRecord, CatalogError> {
    let mut product = ProductRecord {
        name: String::new(),
        description: String::new(),
        image_url: String::new(),
        new_price: String::new(),
        old_price: String::new(),
    };

    for field in CardField::ALL {
        let locator = layout.card_field(panel, card, field);
        wait_for_element(session, &locator, policy).await?;
        match field {
            CardField::Name => product.name = session.text(&locator).await?,
            CardField::Image => {
                product.image_url = session
                    .attr(&locator, &layout.image_attr)
                    .await?
                    .unwrap_or_default();
            }
            CardField::Description => product.description = session.text(&locator).await?,
            CardField::NewPrice => product.new_price = session.text(&locator).await?,
            CardField::OldPrice => product.old_price = session.text(&locator).await?,
        }
    }
    Ok(product)
}

#[cfg(test)]
#[path = "crawl_test.rs"]
mod tests;
