// src/services/translate.rs

//! Translation collaborator.
//!
//! Built once from config and reused for the whole phase; the pipeline only
//! sees the [`Translate`] trait so tests can substitute a stub.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::{CrawlerConfig, TranslatorConfig};

/// Trait for translating abstract text.
#[async_trait]
pub trait Translate: Send + Sync {
    async fn translate(&self, text: &str) -> Result<String>;
}

#[derive(Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
}

#[derive(Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

/// Translator speaking the LibreTranslate JSON protocol.
pub struct HttpTranslator {
    client: reqwest::Client,
    endpoint: String,
    source_lang: String,
    target_lang: String,
}

impl HttpTranslator {
    /// Create a translator for the configured endpoint.
    ///
    /// Fails with a configuration error when no endpoint is set.
    pub fn new(crawler: &CrawlerConfig, translator: &TranslatorConfig) -> Result<Self> {
        let endpoint = translator
            .endpoint
            .clone()
            .ok_or_else(|| AppError::config("translator.endpoint is not set"))?;

        let client = reqwest::Client::builder()
            .user_agent(&crawler.user_agent)
            .timeout(Duration::from_secs(crawler.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint,
            source_lang: translator.source_lang.clone(),
            target_lang: translator.target_lang.clone(),
        })
    }
}

#[async_trait]
impl Translate for HttpTranslator {
    async fn translate(&self, text: &str) -> Result<String> {
        let request = TranslateRequest {
            q: text,
            source: &self.source_lang,
            target: &self.target_lang,
            format: "text",
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .body(serde_json::to_string(&request)?)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(AppError::translation(format!(
                "translation service returned status {status}"
            )));
        }

        let parsed: TranslateResponse = serde_json::from_str(&body)
            .map_err(|e| AppError::translation(format!("unexpected response body: {e}")))?;
        Ok(parsed.translated_text)
    }
}
