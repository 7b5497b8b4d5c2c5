//! Storage abstractions for crawl state persistence.
//!
//! Four JSON files live under the storage directory:
//! - listing snapshot (regenerated whole on every listing run)
//! - poster records (the accumulating success mapping)
//! - detail-fetch failures and translation failures (one file per phase,
//!   so a key can be succeeded for extraction and still pending for
//!   translation)
//!
//! All writes are whole-file overwrites; per-phase flushing is handled by
//! [`ReconciliationStore`].

pub mod local;
pub mod reconcile;

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{FailureEntry, Listing, PosterRecord, RunStats};

// Re-export for convenience
pub use local::LocalStorage;
pub use reconcile::ReconciliationStore;

/// Which failure mapping a store operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Detail-page fetch/parse failures
    Detail,
    /// Translation failures
    Translation,
}

/// Trait for crawl state storage backends.
#[async_trait]
pub trait CatalogStorage: Send + Sync {
    /// Load the listing snapshot, if one has been written.
    async fn load_listing(&self) -> Result<Option<Listing>>;

    /// Overwrite the listing snapshot.
    async fn save_listing(&self, listing: &Listing) -> Result<()>;

    /// Load the success mapping (empty when no file exists yet).
    async fn load_records(&self) -> Result<BTreeMap<String, PosterRecord>>;

    /// Overwrite the success mapping.
    async fn save_records(&self, records: &BTreeMap<String, PosterRecord>) -> Result<()>;

    /// Load one failure mapping (empty when no file exists yet).
    async fn load_failures(&self, kind: FailureKind) -> Result<BTreeMap<String, FailureEntry>>;

    /// Overwrite one failure mapping.
    async fn save_failures(
        &self,
        kind: FailureKind,
        failures: &BTreeMap<String, FailureEntry>,
    ) -> Result<()>;

    /// Overwrite the pipeline run statistics.
    async fn save_stats(&self, stats: &RunStats) -> Result<()>;
}
