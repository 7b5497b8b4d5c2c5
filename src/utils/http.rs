// src/utils/http.rs

//! HTTP fetch collaborator.
//!
//! The pipeline never talks to reqwest directly; it goes through the
//! [`Fetch`] trait so tests can substitute canned responses.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::CrawlerConfig;

/// Raw fetch result: status code plus body text.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

impl FetchResponse {
    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait for fetching pages.
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Fetch a URL. Transport failures are errors; non-2xx statuses are
    /// returned to the caller, which decides whether they are fatal.
    async fn fetch(&self, url: &str) -> Result<FetchResponse>;
}

/// HTTP fetcher backed by a configured reqwest client.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Create a fetcher with the configured user agent and timeout.
    pub fn new(config: &CrawlerConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchResponse> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(FetchResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_success_range() {
        let ok = FetchResponse {
            status: 200,
            body: String::new(),
        };
        let redirect = FetchResponse {
            status: 301,
            body: String::new(),
        };
        let missing = FetchResponse {
            status: 404,
            body: String::new(),
        };
        assert!(ok.is_success());
        assert!(!redirect.is_success());
        assert!(!missing.is_success());
    }

    #[test]
    fn test_build_fetcher_from_default_config() {
        assert!(HttpFetcher::new(&CrawlerConfig::default()).is_ok());
    }
}
