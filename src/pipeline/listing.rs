// src/pipeline/listing.rs

//! Listing phase: fetch the catalog page and persist the snapshot.

use crate::error::{AppError, Result};
use crate::models::{Config, Listing};
use crate::services::{CatalogParser, keyword_filter, match_all};
use crate::storage::CatalogStorage;
use crate::utils::http::Fetch;

/// Fetch the calendar page and overwrite the listing snapshot.
///
/// A non-2xx status aborts the phase before anything is written, so a
/// previously persisted listing survives a bad run. The snapshot is always
/// regenerated whole, never merged.
pub async fn run_listing(
    config: &Config,
    fetcher: &dyn Fetch,
    storage: &dyn CatalogStorage,
) -> Result<Listing> {
    let url = &config.site.calendar_url;
    log::info!("Fetching catalog page: {url}");

    let response = fetcher.fetch(url).await?;
    if !response.is_success() {
        return Err(AppError::fetch(url, response.status));
    }

    let parser = CatalogParser::new(config.selectors.clone(), config.crawler.strict_anchors);
    let filter: Box<dyn Fn(&str) -> bool> = match &config.site.filter_keyword {
        Some(keyword) => Box::new(keyword_filter(keyword)),
        None => Box::new(match_all),
    };

    let listing = parser.parse(&response.body, &config.site.base_url, |title| {
        filter(title)
    })?;

    storage.save_listing(&listing).await?;
    log::info!(
        "Listing saved: {} items ({} posters)",
        listing.total_count(),
        listing.posters.len()
    );

    Ok(listing)
}
