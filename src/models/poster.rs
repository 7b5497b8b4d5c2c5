//! Poster record and failure bookkeeping structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A fully extracted poster, keyed in the success mapping.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PosterRecord {
    /// Display title (the mapping key carries a hash suffix, see `utils::key`)
    pub title: String,

    /// Author line, whitespace-trimmed
    pub author: String,

    /// Abstract text with any leading "Abstract:" label stripped
    #[serde(rename = "abstract")]
    pub abstract_text: String,

    /// Machine translation of the abstract, if the translation phase ran
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abstract_translated: Option<String>,

    /// URL of the poster detail page
    pub url: String,
}

/// A recorded per-item failure, keyed like the success record would be.
///
/// Holds everything a retry pass needs: a human-readable cause and the URL.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FailureEntry {
    /// Human-readable cause
    pub error: String,

    /// URL to retry
    pub url: String,
}

/// Summary of a full pipeline run, persisted as stats.json.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStats {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub listing_count: usize,
    pub poster_count: usize,
    pub detail_failures: usize,
    pub translation_failures: usize,
}
