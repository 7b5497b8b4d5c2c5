// src/services/catalog.rs

//! Index page parser.
//!
//! Applies the five category selectors to a fetched calendar page and
//! aggregates the matching anchors into a [`Listing`].

use scraper::Html;

use crate::error::Result;
use crate::models::{CatalogSelectors, Listing};
use crate::services::extract::extract_items;

/// Filter that keeps every title.
pub fn match_all(_title: &str) -> bool {
    true
}

/// Filter by case-insensitive substring match on the title.
pub fn keyword_filter(keyword: &str) -> impl Fn(&str) -> bool {
    let needle = keyword.to_lowercase();
    move |title: &str| title.to_lowercase().contains(&needle)
}

/// Parser for the conference index page.
pub struct CatalogParser {
    selectors: CatalogSelectors,
    strict: bool,
}

impl CatalogParser {
    /// Create a parser with the given selector set.
    pub fn new(selectors: CatalogSelectors, strict: bool) -> Self {
        Self { selectors, strict }
    }

    /// Parse the index page into a categorized listing.
    ///
    /// The document is parsed once; each category runs the shared filter
    /// and url base. Empty categories are valid.
    pub fn parse<F>(&self, html: &str, base_url: &str, filter: F) -> Result<Listing>
    where
        F: Fn(&str) -> bool,
    {
        let document = Html::parse_document(html);
        let s = &self.selectors;

        Ok(Listing {
            talks: extract_items(&document, &s.talks, base_url, &filter, self.strict)?,
            expo_workshops: extract_items(
                &document,
                &s.expo_workshops,
                base_url,
                &filter,
                self.strict,
            )?,
            workshops: extract_items(&document, &s.workshops, base_url, &filter, self.strict)?,
            competitions: extract_items(
                &document,
                &s.competitions,
                base_url,
                &filter,
                self.strict,
            )?,
            posters: extract_items(&document, &s.posters, base_url, &filter, self.strict)?,
        })
    }
}

impl Default for CatalogParser {
    fn default() -> Self {
        Self::new(CatalogSelectors::default(), false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CALENDAR: &str = r#"
        <html><body>
        <div class="expo-talk-panel"><a href="/talk/1">Deep Reinforcement Learning at Scale</a></div>
        <div class="expo-workshop"><a href="/expo-workshop/1">Vision Workshop</a></div>
        <div class="workshop"><a href="/workshop/1">Reinforcement Learning Theory Workshop</a></div>
        <div class="competition"><a href="/competition/1">Robot Challenge</a></div>
        <div class="content poster"><a href="/poster/1">Offline Reinforcement Learning Benchmarks</a></div>
        <div class="content poster"><a href="/poster/2">Graph Transformers</a></div>
        </body></html>
    "#;

    #[test]
    fn test_parse_all_categories_present() {
        let listing = CatalogParser::default()
            .parse(CALENDAR, "https://example.com", match_all)
            .unwrap();

        assert_eq!(listing.talks.len(), 1);
        assert_eq!(listing.expo_workshops.len(), 1);
        assert_eq!(listing.workshops.len(), 1);
        assert_eq!(listing.competitions.len(), 1);
        assert_eq!(listing.posters.len(), 2);
        assert_eq!(
            listing.posters[0].url,
            "https://example.com/poster/1"
        );
    }

    #[test]
    fn test_parse_empty_document_yields_empty_listing() {
        let listing = CatalogParser::default()
            .parse("<html><body></body></html>", "https://example.com", match_all)
            .unwrap();
        assert_eq!(listing.total_count(), 0);
    }

    #[test]
    fn test_every_returned_title_passes_the_filter() {
        let filter = keyword_filter("reinforcement learning");
        let listing = CatalogParser::default()
            .parse(CALENDAR, "https://example.com", &filter)
            .unwrap();

        assert_eq!(listing.total_count(), 3);
        for item in listing
            .talks
            .iter()
            .chain(&listing.expo_workshops)
            .chain(&listing.workshops)
            .chain(&listing.competitions)
            .chain(&listing.posters)
        {
            assert!(filter(&item.title), "filter rejected {}", item.title);
        }
    }

    #[test]
    fn test_keyword_filter_is_case_insensitive() {
        let filter = keyword_filter("Reinforcement Learning");
        assert!(filter("deep REINFORCEMENT learning methods"));
        assert!(!filter("graph transformers"));
    }
}
