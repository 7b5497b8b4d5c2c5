//! Local filesystem storage implementation.
//!
//! Every mapping is a single JSON file under the storage root, written
//! atomically (temp file + rename) so a crash mid-write never leaves a
//! truncated snapshot. Missing files read back as empty state.

use std::collections::BTreeMap;
use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::{FailureEntry, Listing, PathsConfig, PosterRecord, RunStats};
use crate::storage::{CatalogStorage, FailureKind};

/// Local filesystem storage backend.
#[derive(Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
    paths: PathsConfig,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>, paths: PathsConfig) -> Self {
        Self {
            root_dir: root_dir.into(),
            paths,
        }
    }

    /// Get the full path for a relative key.
    fn path(&self, key: &str) -> PathBuf {
        self.root_dir.join(key)
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let path = self.path(key);
        self.ensure_dir(&path).await?;

        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    /// Write JSON data.
    async fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(value)?;
        self.write_bytes(key, &bytes).await
    }

    /// Read bytes, returning None if file doesn't exist.
    async fn read_bytes(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path(key);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    /// Read JSON data.
    async fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.read_bytes(key).await? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    fn failure_file(&self, kind: FailureKind) -> &str {
        match kind {
            FailureKind::Detail => &self.paths.failed_details_file,
            FailureKind::Translation => &self.paths.failed_translations_file,
        }
    }

    /// Full path of the markdown export file.
    pub fn markdown_path(&self) -> PathBuf {
        self.path(&self.paths.markdown_file)
    }

    /// Full path of the listing snapshot file.
    pub fn listing_path(&self) -> PathBuf {
        self.path(&self.paths.listing_file)
    }
}

#[async_trait]
impl CatalogStorage for LocalStorage {
    async fn load_listing(&self) -> Result<Option<Listing>> {
        self.read_json(&self.paths.listing_file).await
    }

    async fn save_listing(&self, listing: &Listing) -> Result<()> {
        self.write_json(&self.paths.listing_file, listing).await
    }

    async fn load_records(&self) -> Result<BTreeMap<String, PosterRecord>> {
        Ok(self
            .read_json(&self.paths.records_file)
            .await?
            .unwrap_or_default())
    }

    async fn save_records(&self, records: &BTreeMap<String, PosterRecord>) -> Result<()> {
        self.write_json(&self.paths.records_file, records).await
    }

    async fn load_failures(&self, kind: FailureKind) -> Result<BTreeMap<String, FailureEntry>> {
        Ok(self
            .read_json(self.failure_file(kind))
            .await?
            .unwrap_or_default())
    }

    async fn save_failures(
        &self,
        kind: FailureKind,
        failures: &BTreeMap<String, FailureEntry>,
    ) -> Result<()> {
        self.write_json(self.failure_file(kind), failures).await
    }

    async fn save_stats(&self, stats: &RunStats) -> Result<()> {
        self.write_json(&self.paths.stats_file, stats).await
    }
}
