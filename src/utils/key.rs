// src/utils/key.rs

//! Compound record keys for the success/failure mappings.
//!
//! Titles are not unique across poster pages, so mappings are keyed by
//! `"{title}#{hash}"` where the hash is the first eight hex characters of
//! the URL's SHA-256 digest. The bare title stays recoverable for display.

use sha2::{Digest, Sha256};

const HASH_LEN: usize = 8;

/// Build the mapping key for an item.
pub fn record_key(title: &str, url: &str) -> String {
    let digest = Sha256::digest(url.as_bytes());
    let mut tag = hex::encode(digest);
    tag.truncate(HASH_LEN);
    format!("{title}#{tag}")
}

/// Recover the display title from a mapping key.
///
/// Keys written by older runs may lack the hash suffix; those come back
/// unchanged.
pub fn split_key(key: &str) -> &str {
    match key.rsplit_once('#') {
        Some((title, tag)) if tag.len() == HASH_LEN && tag.chars().all(|c| c.is_ascii_hexdigit()) => {
            title
        }
        _ => key,
    }
}
