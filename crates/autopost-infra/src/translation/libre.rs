use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::TranslationError;

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslateResponse {
    translated_text: String,
}

/// Client for a LibreTranslate-compatible `/translate` endpoint.
pub struct LibreTranslateClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

impl LibreTranslateClient {
    pub fn new(http: Client, base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        }
    }

    /// Translate `text` from an auto-detected language into `target`.
    pub async fn translate(&self, text: &str, target: &str) -> Result<String, TranslationError> {
        let response = self
            .http
            .post(format!("{}/translate", self.base_url))
            .json(&TranslateRequest {
                q: text,
                source: "auto",
                target,
                format: "text",
                api_key: self.api_key.as_deref(),
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(TranslationError::Status(response.status().as_u16()));
        }

        let body: TranslateResponse = response.json().await?;
        let translated = body.translated_text.trim();
        if translated.is_empty() {
            return Err(TranslationError::EmptyResult);
        }
        Ok(translated.to_string())
    }
}
