//! Catalog listing data structures.

use serde::{Deserialize, Serialize};

/// A single catalog entry scraped from the index page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListingItem {
    /// Absolute URL of the entry's page
    pub url: String,

    /// Entry title, whitespace-trimmed
    pub title: String,
}

/// Categorized listing scraped from a conference index page.
///
/// Each category preserves document order; empty categories are valid.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Listing {
    /// Expo talks
    pub talks: Vec<ListingItem>,

    /// Expo workshops
    pub expo_workshops: Vec<ListingItem>,

    /// Regular workshops
    pub workshops: Vec<ListingItem>,

    /// Competitions
    pub competitions: Vec<ListingItem>,

    /// Posters (each has a detail page with author and abstract)
    pub posters: Vec<ListingItem>,
}

impl Listing {
    /// Total number of items across all categories.
    pub fn total_count(&self) -> usize {
        self.talks.len()
            + self.expo_workshops.len()
            + self.workshops.len()
            + self.competitions.len()
            + self.posters.len()
    }
}
