// src/services/mod.rs

//! Parsing and translation services.

mod catalog;
mod extract;
mod poster;
mod translate;

pub use catalog::{CatalogParser, keyword_filter, match_all};
pub use extract::extract_items;
pub use poster::{PosterDetail, PosterParser};
pub use translate::{HttpTranslator, Translate};
