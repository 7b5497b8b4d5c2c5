//! Pipeline entry points for crawler operations.
//!
//! - `run_listing`: Fetch and persist the categorized catalog listing
//! - `run_details`: Fetch author/abstract for each poster
//! - `run_translate`: Machine-translate stored abstracts
//! - `run_export`: Render the success mapping as a markdown digest
//! - `run_pipeline`: All of the above in order
//!
//! The detail and translation phases run in one of two modes: `Fresh`
//! (iterate the newly fetched listing / all stored records) or `Resume`
//! (iterate only the keys currently in the phase's failure mapping).

pub mod details;
pub mod export;
pub mod listing;
pub mod translate;

use chrono::Utc;

use crate::error::Result;
use crate::models::{Config, RunStats};
use crate::services::Translate;
use crate::storage::{CatalogStorage, LocalStorage};
use crate::utils::http::Fetch;

pub use details::run_details;
pub use export::{render_markdown, run_export};
pub use listing::run_listing;
pub use translate::run_translate;


/// Iteration mode for a resumable phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Iterate the full input set
    Fresh,
    /// Iterate only the current failure mapping
    Resume,
}

/// Per-phase item counters.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhaseOutcome {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

/// Run the full pipeline: listing, details, optional translation, export.
pub async fn run_pipeline(
    config: &Config,
    fetcher: &dyn Fetch,
    translator: Option<&dyn Translate>,
    storage: &LocalStorage,
) -> Result<()> {
    let start_time = Utc::now();

    log::info!("Step 1/4: Listing - fetching catalog page");
    let listing = run_listing(config, fetcher, storage).await?;

    log::info!("Step 2/4: Details - fetching poster pages");
    let details = run_details(config, fetcher, storage, RunMode::Fresh).await?;

    let translation = match translator {
        Some(translator) => {
            log::info!("Step 3/4: Translation - translating abstracts");
            Some(run_translate(translator, storage, RunMode::Fresh).await?)
        }
        None => {
            log::info!("Step 3/4: Translation - skipped (no endpoint configured)");
            None
        }
    };

    log::info!("Step 4/4: Export - writing markdown digest");
    let poster_count = run_export(storage, &storage.markdown_path()).await?;

    let stats = RunStats {
        start_time,
        end_time: Utc::now(),
        listing_count: listing.total_count(),
        poster_count,
        detail_failures: details.failed,
        translation_failures: translation.map_or(0, |outcome| outcome.failed),
    };
    storage.save_stats(&stats).await?;

    log::info!(
        "Pipeline complete: {} posters, {} detail failures, {} translation failures",
        stats.poster_count,
        stats.detail_failures,
        stats.translation_failures
    );

    Ok(())
}
