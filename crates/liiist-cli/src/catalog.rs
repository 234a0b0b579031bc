//! `catalog` command handler.

use std::path::PathBuf;

use anyhow::Context;
use liiist_core::{load_taxonomy, CategoryTaxonomy};
use liiist_scraper::catalog::{
    self, CatalogLayout, CrawlOptions, StoreChoice, WaitPolicy, WebDriverSession,
};

use crate::output::write_json;
use crate::CatalogArgs;

pub(crate) async fn run_catalog(
    config: &liiist_core::AppConfig,
    args: CatalogArgs,
) -> anyhow::Result<()> {
    let taxonomy = resolve_taxonomy(args.taxonomy.or_else(|| config.taxonomy_path.clone()))?;
    let location = args
        .location
        .unwrap_or_else(|| config.catalog_location.clone());
    let store = if args.reselect {
        StoreChoice::Reselect(location)
    } else {
        StoreChoice::Select(location)
    };
    let options = CrawlOptions {
        policy: WaitPolicy::from_config(config),
        max_load_more: args.max_load_more,
    };

    tracing::info!(
        pages = taxonomy.page_count(),
        webdriver_url = %config.webdriver_url,
        ?store,
        "starting catalog crawl"
    );

    let session = WebDriverSession::from_config(config)
        .await
        .with_context(|| format!("failed to open a browser session at {}", config.webdriver_url))?;
    let report = catalog::run_catalog(
        session,
        &CatalogLayout::oasi_tigre(),
        &taxonomy,
        &store,
        &options,
    )
    .await?;

    if let Some(path) = args.output.as_deref() {
        write_json(&report.products, Some(path))?;
    }
    for failure in &report.page_failures {
        eprintln!("  INCOMPLETE {}: {}", failure.url, failure.reason);
    }
    if report.skipped_cards > 0 {
        eprintln!("  skipped {} cards with missing fields", report.skipped_cards);
    }
    println!("Total items processed: {}", report.total_processed);
    Ok(())
}

fn resolve_taxonomy(path: Option<PathBuf>) -> anyhow::Result<CategoryTaxonomy> {
    match path {
        Some(path) => load_taxonomy(&path)
            .with_context(|| format!("failed to load taxonomy from {}", path.display())),
        None => Ok(CategoryTaxonomy::oasi_tigre()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_taxonomy_without_path() {
        let taxonomy = resolve_taxonomy(None).unwrap();
        assert_eq!(taxonomy, CategoryTaxonomy::oasi_tigre());
    }

    #[test]
    fn missing_taxonomy_file_is_an_error() {
        let err = resolve_taxonomy(Some(PathBuf::from("/nonexistent/taxonomy.yaml"))).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/taxonomy.yaml"));
    }
}
