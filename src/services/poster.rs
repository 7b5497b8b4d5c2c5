// src/services/poster.rs

//! Poster detail page parser.

use scraper::Html;

use crate::error::{AppError, Result};
use crate::models::CatalogSelectors;
use crate::services::extract::parse_selector;

const ABSTRACT_LABEL: &str = "Abstract:";

/// Author and abstract extracted from a poster detail page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PosterDetail {
    pub author: String,
    pub abstract_text: String,
}

/// Parser for poster detail pages.
pub struct PosterParser {
    abstract_selector: String,
    author_selector: String,
}

impl PosterParser {
    /// Create a parser using the detail-page selectors from the set.
    pub fn new(selectors: &CatalogSelectors) -> Self {
        Self {
            abstract_selector: selectors.abstract_container.clone(),
            author_selector: selectors.author_subtitle.clone(),
        }
    }

    /// Parse a poster detail page into author and abstract.
    ///
    /// The abstract comes from the first `<p>` inside the container, or the
    /// container's own text when no paragraph is nested. Either node missing
    /// is an extraction error for the caller to record.
    pub fn parse(&self, html: &str) -> Result<PosterDetail> {
        let document = Html::parse_document(html);

        let abstract_sel = parse_selector(&self.abstract_selector)?;
        let container = document.select(&abstract_sel).next().ok_or_else(|| {
            AppError::extraction(&self.abstract_selector, "abstract container not found")
        })?;

        let p_sel = parse_selector("p")?;
        let raw_abstract: String = match container.select(&p_sel).next() {
            Some(paragraph) => paragraph.text().collect(),
            None => container.text().collect(),
        };

        let author_sel = parse_selector(&self.author_selector)?;
        let author_node = document.select(&author_sel).next().ok_or_else(|| {
            AppError::extraction(&self.author_selector, "author subtitle not found")
        })?;
        let author = author_node.text().collect::<String>().trim().to_string();

        Ok(PosterDetail {
            author,
            abstract_text: strip_abstract_label(&raw_abstract),
        })
    }
}

impl Default for PosterParser {
    fn default() -> Self {
        Self::new(&CatalogSelectors::default())
    }
}

/// Drop a literal "Abstract:" label and surrounding whitespace.
fn strip_abstract_label(text: &str) -> String {
    let trimmed = text.trim();
    trimmed
        .strip_prefix(ABSTRACT_LABEL)
        .unwrap_or(trimmed)
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const POSTER_PAGE: &str = r#"
        <html><body>
        <h2 class="card-title">Offline Reinforcement Learning Benchmarks</h2>
        <h3 class="card-subtitle"> Jane Doe · John Smith </h3>
        <div id="abstractExample">
            <p>Abstract: We study offline reinforcement learning.</p>
        </div>
        </body></html>
    "#;

    #[test]
    fn test_parse_author_and_abstract() {
        let detail = PosterParser::default().parse(POSTER_PAGE).unwrap();
        assert_eq!(detail.author, "Jane Doe · John Smith");
        assert_eq!(detail.abstract_text, "We study offline reinforcement learning.");
    }

    #[test]
    fn test_abstract_from_container_text_without_paragraph() {
        let html = r#"
            <html><body>
            <h3 class="card-subtitle">Jane Doe</h3>
            <div id="abstractExample">  Abstract: Plain container text.  </div>
            </body></html>
        "#;
        let detail = PosterParser::default().parse(html).unwrap();
        assert_eq!(detail.abstract_text, "Plain container text.");
    }

    #[test]
    fn test_abstract_without_label_kept_whole() {
        let html = r#"
            <html><body>
            <h3 class="card-subtitle">Jane Doe</h3>
            <div id="abstractExample"><p>  No label here.  </p></div>
            </body></html>
        "#;
        let detail = PosterParser::default().parse(html).unwrap();
        assert_eq!(detail.abstract_text, "No label here.");
    }

    #[test]
    fn test_missing_abstract_container_is_extraction_error() {
        let html = r#"<html><body><h3 class="card-subtitle">Jane Doe</h3></body></html>"#;
        let result = PosterParser::default().parse(html);
        assert!(matches!(result, Err(AppError::Extraction { .. })));
    }

    #[test]
    fn test_missing_author_subtitle_is_extraction_error() {
        let html = r#"
            <html><body>
            <div id="abstractExample"><p>Abstract: Text.</p></div>
            </body></html>
        "#;
        let result = PosterParser::default().parse(html);
        assert!(matches!(result, Err(AppError::Extraction { .. })));
    }

    #[test]
    fn test_strip_label_is_case_sensitive() {
        assert_eq!(strip_abstract_label("Abstract: Foo bar."), "Foo bar.");
        assert_eq!(strip_abstract_label("ABSTRACT: Foo bar."), "ABSTRACT: Foo bar.");
    }
}
