// src/utils/url.rs

//! URL manipulation utilities.

use url::Url;

/// Resolve a potentially relative URL against a base URL.
///
/// Absolute hrefs pass through unchanged; unparseable input falls back to
/// the raw href.
///
/// # Examples
/// ```
/// use confcrawl::utils::url::resolve;
///
/// assert_eq!(
///     resolve("https://example.com", "/virtual/2023/poster/1"),
///     "https://example.com/virtual/2023/poster/1"
/// );
/// ```
pub fn resolve(base: &str, href: &str) -> String {
    match Url::parse(base).and_then(|b| b.join(href)) {
        Ok(joined) => joined.to_string(),
        Err(_) => href.to_string(),
    }
}
