//! Google Translate API v2 client
//!
//! Loads the API key from `GOOGLE_TRANSLATE_API_KEY`. The gateway detects
//! the source language automatically by omitting `source` from the request,
//! so only the target language is sent.

use async_trait::async_trait;
use serde_json::json;

use crate::translate::TranslationProvider;
use crate::{Error, Result};

const DEFAULT_BASE_URL: &str = "https://translation.googleapis.com/language/translate/v2";

/// Google Translate API v2 provider
#[derive(Clone)]
pub struct GoogleTranslate {
    api_key: String,
    client: reqwest::Client,
    base_url: String,
}

impl GoogleTranslate {
    /// Create a new provider with an explicit API key
    ///
    /// # Errors
    ///
    /// Returns error if the API key is empty or the HTTP client cannot
    /// be built
    pub fn new(api_key: String) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(Error::Config("API key cannot be empty".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| Error::Config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            api_key,
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Create a provider from the `GOOGLE_TRANSLATE_API_KEY` environment variable
    ///
    /// # Errors
    ///
    /// Returns error if the variable is not set
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GOOGLE_TRANSLATE_API_KEY").map_err(|_| {
            Error::Config("GOOGLE_TRANSLATE_API_KEY environment variable not set".to_string())
        })?;

        Self::new(api_key)
    }

    /// Override the API base URL (used by tests)
    #[must_use]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }
}

impl std::fmt::Debug for GoogleTranslate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleTranslate")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl TranslationProvider for GoogleTranslate {
    async fn translate(&self, text: &str, target: &str) -> Result<String> {
        tracing::debug!(target_lang = %target, chars = text.len(), "starting translation");

        let url = format!("{}?key={}", self.base_url, self.api_key);
        let body = json!({
            "q": [text],
            "target": target,
            "format": "text"
        });

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "translation request failed");
                e
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "translation API error");
            return Err(Error::Translation(format!(
                "translation API error {status}: {body}"
            )));
        }

        let json: serde_json::Value = response.json().await.map_err(|e| {
            tracing::error!(error = %e, "failed to parse translation response");
            e
        })?;

        let translated = json["data"]["translations"][0]["translatedText"]
            .as_str()
            .ok_or_else(|| {
                Error::Translation(
                    "invalid API response: missing 'data.translations' text".to_string(),
                )
            })?;

        tracing::info!(target_lang = %target, "translation complete");
        Ok(translated.to_string())
    }

    fn name(&self) -> &str {
        "Google Translate"
    }
}
