// src/services/extract.rs

//! Anchor extraction from index-page panels.

use scraper::{Html, Selector};

use crate::error::{AppError, Result};
use crate::models::ListingItem;
use crate::utils::url::resolve;

/// Extract `(url, title)` items from every node matching `selector`.
///
/// Each matched node contributes its first descendant anchor. Nodes without
/// an anchor or an `href` are skipped unless `strict` is set, in which case
/// they fail the whole extraction. Titles are trimmed, filtered through
/// `filter`, and hrefs absolutized against `base_url`. Document order is
/// preserved.
pub fn extract_items<F>(
    document: &Html,
    selector: &str,
    base_url: &str,
    filter: F,
    strict: bool,
) -> Result<Vec<ListingItem>>
where
    F: Fn(&str) -> bool,
{
    let panel_sel = parse_selector(selector)?;
    let anchor_sel = parse_selector("a")?;

    let mut items = Vec::new();
    for panel in document.select(&panel_sel) {
        let Some(anchor) = panel.select(&anchor_sel).next() else {
            if strict {
                return Err(AppError::extraction(selector, "panel has no anchor"));
            }
            continue;
        };

        let Some(href) = anchor.value().attr("href") else {
            if strict {
                return Err(AppError::extraction(selector, "anchor has no href"));
            }
            continue;
        };

        let title = anchor.text().collect::<String>().trim().to_string();
        if !filter(&title) {
            continue;
        }

        items.push(ListingItem {
            url: resolve(base_url, href),
            title,
        });
    }
    Ok(items)
}

pub(crate) fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}
