//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::CatalogSelectors;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP and crawling behavior settings
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Target site settings
    #[serde(default)]
    pub site: SiteConfig,

    /// CSS selectors for the catalog and poster pages
    #[serde(default)]
    pub selectors: CatalogSelectors,

    /// Translation service settings
    #[serde(default)]
    pub translator: TranslatorConfig,

    /// Persisted file names within the storage directory
    #[serde(default)]
    pub paths: PathsConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::config("crawler.user_agent is empty"));
        }
        if self.crawler.timeout_secs == 0 {
            return Err(AppError::config("crawler.timeout_secs must be > 0"));
        }
        if self.site.base_url.trim().is_empty() {
            return Err(AppError::config("site.base_url is empty"));
        }
        if self.site.calendar_url.trim().is_empty() {
            return Err(AppError::config("site.calendar_url is empty"));
        }
        if let Some(keyword) = &self.site.filter_keyword {
            if keyword.trim().is_empty() {
                return Err(AppError::config("site.filter_keyword is empty"));
            }
        }
        Ok(())
    }
}

/// HTTP client and crawling behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Treat an index panel without an anchor as an error instead of skipping it
    #[serde(default)]
    pub strict_anchors: bool,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            strict_anchors: false,
        }
    }
}

/// Target site settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site root used to absolutize relative hrefs
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// Full URL of the virtual-event calendar page
    #[serde(default = "defaults::calendar_url")]
    pub calendar_url: String,

    /// Case-insensitive substring filter on titles; absent = keep everything
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_keyword: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            calendar_url: defaults::calendar_url(),
            filter_keyword: None,
        }
    }
}

/// Translation service settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TranslatorConfig {
    /// Translation endpoint; absent = translation phase disabled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Source language code
    #[serde(default = "defaults::source_lang")]
    pub source_lang: String,

    /// Target language code
    #[serde(default = "defaults::target_lang")]
    pub target_lang: String,
}

/// File names for persisted state, relative to the storage directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Listing snapshot
    #[serde(default = "defaults::listing_file")]
    pub listing_file: String,

    /// Success mapping of poster records
    #[serde(default = "defaults::records_file")]
    pub records_file: String,

    /// Detail-fetch failure mapping
    #[serde(default = "defaults::failed_details_file")]
    pub failed_details_file: String,

    /// Translation failure mapping
    #[serde(default = "defaults::failed_translations_file")]
    pub failed_translations_file: String,

    /// Markdown digest of the success mapping
    #[serde(default = "defaults::markdown_file")]
    pub markdown_file: String,

    /// Pipeline run statistics
    #[serde(default = "defaults::stats_file")]
    pub stats_file: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            listing_file: defaults::listing_file(),
            records_file: defaults::records_file(),
            failed_details_file: defaults::failed_details_file(),
            failed_translations_file: defaults::failed_translations_file(),
            markdown_file: defaults::markdown_file(),
            stats_file: defaults::stats_file(),
        }
    }
}

mod defaults {
    // Crawler defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; confcrawl/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }

    // Site defaults
    pub fn base_url() -> String {
        "https://nips.cc".into()
    }
    pub fn calendar_url() -> String {
        "https://nips.cc/virtual/2023/calendar".into()
    }

    // Translator defaults
    pub fn source_lang() -> String {
        "en".into()
    }
    pub fn target_lang() -> String {
        "zh".into()
    }

    // Path defaults
    pub fn listing_file() -> String {
        "listing.json".into()
    }
    pub fn records_file() -> String {
        "posters.json".into()
    }
    pub fn failed_details_file() -> String {
        "failed_posters.json".into()
    }
    pub fn failed_translations_file() -> String {
        "failed_translations.json".into()
    }
    pub fn markdown_file() -> String {
        "posters.md".into()
    }
    pub fn stats_file() -> String {
        "stats.json".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.crawler.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.crawler.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_blank_filter_keyword() {
        let mut config = Config::default();
        config.site.filter_keyword = Some("   ".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn parse_partial_toml_fills_defaults() {
        let raw = r#"
            [site]
            filter_keyword = "reinforcement learning"

            [translator]
            endpoint = "https://translate.example.com/translate"
        "#;

        let config: Config = toml::from_str(raw).unwrap();
        assert_eq!(config.site.base_url, "https://nips.cc");
        assert_eq!(
            config.site.filter_keyword.as_deref(),
            Some("reinforcement learning")
        );
        assert_eq!(config.translator.target_lang, "zh");
        assert_eq!(config.paths.records_file, "posters.json");
        assert_eq!(config.selectors.posters, ".content.poster");
    }
}
