// src/pipeline/details.rs

//! Detail phase: fetch author and abstract for each poster.

use crate::error::{AppError, Result};
use crate::models::{Config, PosterRecord};
use crate::pipeline::{PhaseOutcome, RunMode};
use crate::services::{PosterDetail, PosterParser};
use crate::storage::{CatalogStorage, FailureKind, ReconciliationStore};
use crate::utils::http::Fetch;
use crate::utils::key::{record_key, split_key};

/// Fetch and parse every poster detail page, reconciling results into the
/// success and detail-failure mappings.
///
/// `Fresh` mode walks the persisted listing's posters; `Resume` walks only
/// the keys currently in the failure mapping. Every per-item error is
/// recorded and iteration continues; only a missing listing snapshot aborts
/// the phase. Both mappings are flushed once at the end.
pub async fn run_details(
    config: &Config,
    fetcher: &dyn Fetch,
    storage: &dyn CatalogStorage,
    mode: RunMode,
) -> Result<PhaseOutcome> {
    let mut store = ReconciliationStore::load(storage, FailureKind::Detail).await?;

    // (key, url, display title) per poster to process
    let jobs: Vec<(String, String, String)> = match mode {
        RunMode::Fresh => {
            let listing = storage.load_listing().await?.ok_or_else(|| {
                AppError::config("listing snapshot not found; run the listing phase first")
            })?;
            listing
                .posters
                .iter()
                .map(|item| {
                    (
                        record_key(&item.title, &item.url),
                        item.url.clone(),
                        item.title.clone(),
                    )
                })
                .collect()
        }
        RunMode::Resume => store
            .keys_to_retry()
            .into_iter()
            .map(|(key, url)| {
                let title = split_key(&key).to_string();
                (key, url, title)
            })
            .collect(),
    };

    let parser = PosterParser::new(&config.selectors);
    let mut outcome = PhaseOutcome {
        total: jobs.len(),
        ..PhaseOutcome::default()
    };

    for (key, url, title) in jobs {
        log::info!("Retrieving poster: {title} ({url})");

        match fetch_detail(fetcher, &parser, &url).await {
            Ok(detail) => {
                store.upsert_success(
                    &key,
                    PosterRecord {
                        title,
                        author: detail.author,
                        abstract_text: detail.abstract_text,
                        abstract_translated: None,
                        url,
                    },
                );
                outcome.succeeded += 1;
            }
            Err(error) => {
                log::warn!("Failed to retrieve poster {title} ({url}): {error}");
                store.record_failure(&key, error.to_string(), &url);
                outcome.failed += 1;
            }
        }
    }

    store.flush().await?;
    log::info!(
        "Detail phase done: {}/{} succeeded, {} pending retry",
        outcome.succeeded,
        outcome.total,
        store.failure_count()
    );

    Ok(outcome)
}

async fn fetch_detail(
    fetcher: &dyn Fetch,
    parser: &PosterParser,
    url: &str,
) -> Result<PosterDetail> {
    let response = fetcher.fetch(url).await?;
    if !response.is_success() {
        return Err(AppError::fetch(url, response.status));
    }
    parser.parse(&response.body)
}
