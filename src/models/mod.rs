// src/models/mod.rs

//! Domain models for the crawler application.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod listing;
mod poster;
mod selectors;

// Re-export all public types
pub use config::{Config, CrawlerConfig, PathsConfig, SiteConfig, TranslatorConfig};
pub use listing::{Listing, ListingItem};
pub use poster::{FailureEntry, PosterRecord, RunStats};
pub use selectors::CatalogSelectors;
