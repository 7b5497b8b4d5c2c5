//! Reconciliation of per-item successes and failures across retry passes.
//!
//! A [`ReconciliationStore`] pairs the success mapping with one
//! phase-specific failure mapping. A pass mutates both in memory and
//! persists them together with a single [`flush`](ReconciliationStore::flush)
//! at phase end. A success always supersedes a prior failure for the same
//! key within the store's own phase; failures accumulate and never evict a
//! success entry.

use std::collections::BTreeMap;

use crate::error::Result;
use crate::models::{FailureEntry, PosterRecord};
use crate::storage::{CatalogStorage, FailureKind};

/// In-memory view of the success mapping plus one failure mapping.
pub struct ReconciliationStore<'a> {
    storage: &'a dyn CatalogStorage,
    kind: FailureKind,
    records: BTreeMap<String, PosterRecord>,
    failures: BTreeMap<String, FailureEntry>,
}

impl<'a> ReconciliationStore<'a> {
    /// Load both mappings for the given failure kind.
    pub async fn load(storage: &'a dyn CatalogStorage, kind: FailureKind) -> Result<Self> {
        let records = storage.load_records().await?;
        let failures = storage.load_failures(kind).await?;
        Ok(Self {
            storage,
            kind,
            records,
            failures,
        })
    }

    /// Insert or overwrite a success entry; drops any pending failure for
    /// the same key.
    pub fn upsert_success(&mut self, key: impl Into<String>, record: PosterRecord) {
        let key = key.into();
        self.failures.remove(&key);
        self.records.insert(key, record);
    }

    /// Insert or overwrite a failure entry. Success entries are untouched:
    /// a key can be succeeded for one phase and failed for another.
    pub fn record_failure(
        &mut self,
        key: impl Into<String>,
        error: impl Into<String>,
        url: impl Into<String>,
    ) {
        self.failures.insert(
            key.into(),
            FailureEntry {
                error: error.into(),
                url: url.into(),
            },
        );
    }

    /// One-shot snapshot of the failure mapping as `(key, url)` pairs.
    ///
    /// Taken once at phase start; successes recorded mid-pass do not shrink
    /// a snapshot the caller is already iterating.
    pub fn keys_to_retry(&self) -> Vec<(String, String)> {
        self.failures
            .iter()
            .map(|(key, entry)| (key.clone(), entry.url.clone()))
            .collect()
    }

    /// Current success mapping.
    pub fn records(&self) -> &BTreeMap<String, PosterRecord> {
        &self.records
    }

    /// Look up a success entry.
    pub fn record(&self, key: &str) -> Option<&PosterRecord> {
        self.records.get(key)
    }

    /// Number of pending failures.
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// Atomically overwrite both persisted mappings with in-memory state.
    /// Called once per phase, not per item.
    pub async fn flush(&self) -> Result<()> {
        self.storage.save_records(&self.records).await?;
        self.storage.save_failures(self.kind, &self.failures).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PathsConfig;
    use crate::storage::LocalStorage;
    use tempfile::TempDir;

    fn record(title: &str, url: &str) -> PosterRecord {
        PosterRecord {
            title: title.to_string(),
            author: "Author".to_string(),
            abstract_text: "Text".to_string(),
            abstract_translated: None,
            url: url.to_string(),
        }
    }

    #[tokio::test]
    async fn test_success_supersedes_failure() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path(), PathsConfig::default());

        let mut store = ReconciliationStore::load(&storage, FailureKind::Detail)
            .await
            .unwrap();
        store.record_failure("k1", "boom", "https://example.com/1");
        assert_eq!(store.failure_count(), 1);

        store.upsert_success("k1", record("Paper", "https://example.com/1"));
        assert_eq!(store.failure_count(), 0);
        assert!(store.record("k1").is_some());
    }

    #[tokio::test]
    async fn test_failure_does_not_evict_success() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path(), PathsConfig::default());

        let mut store = ReconciliationStore::load(&storage, FailureKind::Translation)
            .await
            .unwrap();
        store.upsert_success("k1", record("Paper", "https://example.com/1"));
        store.record_failure("k1", "translate boom", "https://example.com/1");

        assert!(store.record("k1").is_some());
        assert_eq!(store.failure_count(), 1);
    }

    #[tokio::test]
    async fn test_failures_accumulate_within_a_pass() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path(), PathsConfig::default());

        let mut store = ReconciliationStore::load(&storage, FailureKind::Detail)
            .await
            .unwrap();
        store.record_failure("k1", "boom 1", "https://example.com/1");
        store.record_failure("k2", "boom 2", "https://example.com/2");

        let retries = store.keys_to_retry();
        assert_eq!(retries.len(), 2);
        assert_eq!(retries[0].0, "k1");
        assert_eq!(retries[1].0, "k2");
    }

    #[tokio::test]
    async fn test_snapshot_is_not_live() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path(), PathsConfig::default());

        let mut store = ReconciliationStore::load(&storage, FailureKind::Detail)
            .await
            .unwrap();
        store.record_failure("k1", "boom", "https://example.com/1");
        store.record_failure("k2", "boom", "https://example.com/2");

        let snapshot = store.keys_to_retry();
        store.upsert_success("k1", record("Paper", "https://example.com/1"));

        // Already-taken snapshot still lists both keys
        assert_eq!(snapshot.len(), 2);
        assert_eq!(store.keys_to_retry().len(), 1);
    }

    #[tokio::test]
    async fn test_flush_persists_and_reloads() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path(), PathsConfig::default());

        let mut store = ReconciliationStore::load(&storage, FailureKind::Detail)
            .await
            .unwrap();
        store.upsert_success("ok", record("Good", "https://example.com/1"));
        store.record_failure("bad", "boom", "https://example.com/2");
        store.flush().await.unwrap();

        let reloaded = ReconciliationStore::load(&storage, FailureKind::Detail)
            .await
            .unwrap();
        assert!(reloaded.record("ok").is_some());
        assert_eq!(reloaded.keys_to_retry(), vec![(
            "bad".to_string(),
            "https://example.com/2".to_string()
        )]);
    }

    #[tokio::test]
    async fn test_retry_overwrites_error_message() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path(), PathsConfig::default());

        let mut store = ReconciliationStore::load(&storage, FailureKind::Detail)
            .await
            .unwrap();
        store.record_failure("k1", "first failure", "https://example.com/1");
        store.record_failure("k1", "second failure", "https://example.com/1");
        store.flush().await.unwrap();

        let failures = storage.load_failures(FailureKind::Detail).await.unwrap();
        assert_eq!(failures["k1"].error, "second failure");
    }
}
