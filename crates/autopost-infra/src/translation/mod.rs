//! Keyword translation: LibreTranslate client behind a cache, an outbound
//! throttle and a circuit breaker.

mod circuit_breaker;
mod libre;

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota};
use reqwest::Client;

use autopost_core::ports::{Cache, IdentityTranslator, Translator};

pub use circuit_breaker::{CircuitBreaker, CircuitBreakerConfig, CircuitState};
pub use libre::LibreTranslateClient;

#[derive(Debug, thiserror::Error)]
pub enum TranslationError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Translation service answered with status {0}")]
    Status(u16),

    #[error("Translation service returned no text")]
    EmptyResult,
}

/// Translation settings.
#[derive(Debug, Clone)]
pub struct TranslationConfig {
    pub enabled: bool,
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    pub target_language: String,
    pub breaker: CircuitBreakerConfig,
    pub requests_per_sec: u32,
    pub cache_ttl: Duration,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_url: None,
            api_key: None,
            target_language: "en".to_string(),
            breaker: CircuitBreakerConfig::default(),
            requests_per_sec: 2,
            cache_ttl: Duration::from_secs(7 * 24 * 60 * 60),
        }
    }
}

impl TranslationConfig {
    /// Translation is on when `TRANSLATION_API_URL` is set, unless
    /// `TRANSLATION_ENABLED` says otherwise.
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());
        let parse = |name: &str| var(name).and_then(|v| v.parse::<u64>().ok());
        let defaults = Self::default();

        let api_url = var("TRANSLATION_API_URL");
        let enabled = var("TRANSLATION_ENABLED")
            .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
            .unwrap_or(api_url.is_some());

        Self {
            enabled,
            api_url,
            api_key: var("TRANSLATION_API_KEY"),
            target_language: defaults.target_language,
            breaker: CircuitBreakerConfig {
                failure_threshold: parse("TRANSLATION_FAILURE_THRESHOLD")
                    .and_then(|n| u32::try_from(n).ok())
                    .unwrap_or(defaults.breaker.failure_threshold),
                cooldown: parse("TRANSLATION_COOLDOWN_SECS")
                    .map(Duration::from_secs)
                    .unwrap_or(defaults.breaker.cooldown),
            },
            requests_per_sec: parse("TRANSLATION_REQUESTS_PER_SEC")
                .and_then(|n| u32::try_from(n).ok())
                .unwrap_or(defaults.requests_per_sec),
            cache_ttl: defaults.cache_ttl,
        }
    }
}

/// Build the configured translator: identity when disabled or when no
/// backend URL is known.
pub fn build_translator(
    config: TranslationConfig,
    http: Client,
    cache: Arc<dyn Cache>,
) -> Arc<dyn Translator> {
    match (config.enabled, config.api_url.clone()) {
        (true, Some(url)) => {
            tracing::info!(url = %url, "Keyword translation enabled");
            let client = LibreTranslateClient::new(http, url, config.api_key.clone());
            Arc::new(ResilientTranslator::new(client, cache, config))
        }
        _ => {
            tracing::info!("Keyword translation disabled");
            Arc::new(IdentityTranslator)
        }
    }
}

/// [`Translator`] that never fails: any problem yields the input text.
pub struct ResilientTranslator {
    client: LibreTranslateClient,
    cache: Arc<dyn Cache>,
    breaker: CircuitBreaker,
    throttle: DefaultDirectRateLimiter,
    target_language: String,
    cache_ttl: Duration,
}

impl ResilientTranslator {
    pub fn new(client: LibreTranslateClient, cache: Arc<dyn Cache>, config: TranslationConfig) -> Self {
        let per_second = NonZeroU32::new(config.requests_per_sec).unwrap_or(NonZeroU32::MIN);
        Self {
            client,
            cache,
            breaker: CircuitBreaker::new(config.breaker),
            throttle: DefaultDirectRateLimiter::direct(Quota::per_second(per_second)),
            target_language: config.target_language,
            cache_ttl: config.cache_ttl,
        }
    }

    fn cache_key(&self, text: &str) -> String {
        format!("translation:{}:{}", self.target_language, text)
    }

    pub async fn circuit_state(&self) -> CircuitState {
        self.breaker.state().await
    }
}

#[async_trait]
impl Translator for ResilientTranslator {
    async fn translate(&self, text: &str) -> String {
        if text.trim().is_empty() {
            return text.to_string();
        }

        let key = self.cache_key(text);
        if let Some(hit) = self.cache.get(&key).await {
            return hit;
        }

        if !self.breaker.try_acquire().await {
            tracing::debug!("Translation circuit open, keeping original keywords");
            return text.to_string();
        }

        self.throttle.until_ready().await;
        match self.client.translate(text, &self.target_language).await {
            Ok(translated) => {
                self.breaker.on_success().await;
                if let Err(e) = self.cache.set(&key, &translated, Some(self.cache_ttl)).await {
                    tracing::warn!(error = %e, "Caching translation failed");
                }
                tracing::debug!(original = %text, translated = %translated, "Keywords translated");
                translated
            }
            Err(e) => {
                self.breaker.on_failure().await;
                tracing::warn!(error = %e, "Translation failed, keeping original keywords");
                text.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::InMemoryCache;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn translator(server: &MockServer, cache: Arc<dyn Cache>) -> ResilientTranslator {
        let config = TranslationConfig {
            enabled: true,
            api_url: Some(server.uri()),
            api_key: Some("secret".to_string()),
            requests_per_sec: 100,
            breaker: CircuitBreakerConfig {
                failure_threshold: 3,
                cooldown: Duration::from_secs(60),
            },
            ..Default::default()
        };
        let client = LibreTranslateClient::new(Client::new(), server.uri(), config.api_key.clone());
        ResilientTranslator::new(client, cache, config)
    }

    #[tokio::test]
    async fn test_translates_and_caches() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/translate"))
            .and(body_partial_json(json!({
                "q": "deniz kenarı",
                "source": "auto",
                "target": "en",
                "format": "text",
                "api_key": "secret"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"translatedText": "seaside"})))
            .expect(1)
            .mount(&server)
            .await;

        let cache = Arc::new(InMemoryCache::new());
        let translator = translator(&server, cache.clone());

        assert_eq!(translator.translate("deniz kenarı").await, "seaside");
        assert_eq!(translator.translate("deniz kenarı").await, "seaside");
        assert_eq!(
            cache.get("translation:en:deniz kenarı").await.as_deref(),
            Some("seaside")
        );
    }

    #[tokio::test]
    async fn test_breaker_stops_calls_after_three_failures() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .expect(3)
            .mount(&server)
            .await;

        let translator = translator(&server, Arc::new(InMemoryCache::new()));
        for _ in 0..5 {
            assert_eq!(translator.translate("kedi").await, "kedi");
        }
        assert_eq!(translator.circuit_state().await, CircuitState::Open);
    }

    #[tokio::test]
    async fn test_blank_text_is_not_sent() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let translator = translator(&server, Arc::new(InMemoryCache::new()));
        assert_eq!(translator.translate("  ").await, "  ");
    }

    #[tokio::test]
    async fn test_disabled_config_builds_identity() {
        let translator = build_translator(
            TranslationConfig::default(),
            Client::new(),
            Arc::new(InMemoryCache::new()),
        );
        assert_eq!(translator.translate("kedi").await, "kedi");
    }
}
