// src/models/selectors.rs

//! CSS selectors for scraping the catalog and poster pages.

use serde::{Deserialize, Serialize};

/// CSS selectors for the index page categories and the poster detail page.
///
/// Defaults match the NIPS virtual-site markup; override in config for
/// conferences with different panel classes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSelectors {
    /// Selector for expo talk panels
    #[serde(default = "default_talks")]
    pub talks: String,

    /// Selector for expo workshop panels
    #[serde(default = "default_expo_workshops")]
    pub expo_workshops: String,

    /// Selector for workshop panels
    #[serde(default = "default_workshops")]
    pub workshops: String,

    /// Selector for competition panels
    #[serde(default = "default_competitions")]
    pub competitions: String,

    /// Selector for poster panels
    #[serde(default = "default_posters")]
    pub posters: String,

    /// Selector for the abstract container on a poster detail page
    #[serde(default = "default_abstract")]
    pub abstract_container: String,

    /// Selector for the author subtitle on a poster detail page
    #[serde(default = "default_author")]
    pub author_subtitle: String,
}

fn default_talks() -> String {
    ".expo-talk-panel".to_string()
}

fn default_expo_workshops() -> String {
    ".expo-workshop".to_string()
}

fn default_workshops() -> String {
    ".workshop".to_string()
}

fn default_competitions() -> String {
    ".competition".to_string()
}

fn default_posters() -> String {
    ".content.poster".to_string()
}

fn default_abstract() -> String {
    "#abstractExample".to_string()
}

fn default_author() -> String {
    ".card-subtitle".to_string()
}

impl Default for CatalogSelectors {
    fn default() -> Self {
        Self {
            talks: default_talks(),
            expo_workshops: default_expo_workshops(),
            workshops: default_workshops(),
            competitions: default_competitions(),
            posters: default_posters(),
            abstract_container: default_abstract(),
            author_subtitle: default_author(),
        }
    }
}
