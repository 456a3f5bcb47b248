//! Application state - long-lived service handles shared across all handlers.

use std::sync::Arc;

use autopost_core::ports::{
    Cache, HistoryStore, ImageSearch, Publisher, RateLimiter, StoreError, TemplateStore,
    Translator,
};
use autopost_core::{PipelineSettings, SubmissionPipeline};
use autopost_infra::{
    FileTemplateStore, InMemoryCache, InMemoryHistoryStore, InMemoryRateLimiter, RateLimitConfig,
    StockPhotoClient, StockPhotoConfig, TemplateStoreConfig, TranslationConfig, WordPressConfig,
    WordPressPublisher, build_translator, http,
};

use crate::config::AppConfig;

/// Errors that keep the server from starting.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Failed to open template store: {0}")]
    Templates(#[from] StoreError),
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: SubmissionPipeline,
    pub templates: Arc<dyn TemplateStore>,
    pub history: Arc<dyn HistoryStore>,
    pub images: Arc<dyn ImageSearch>,
    pub translator: Arc<dyn Translator>,
    pub rate_limiter: Arc<dyn RateLimiter>,
    pub settings: PipelineSettings,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Result<Self, StartupError> {
        let http = http::build_client(config.http_timeout)?;
        let cache = init_cache().await;

        let templates: Arc<dyn TemplateStore> =
            Arc::new(FileTemplateStore::open(TemplateStoreConfig::from_env()).await?);
        let history = init_history().await;

        let images: Arc<dyn ImageSearch> = Arc::new(StockPhotoClient::new(
            http.clone(),
            StockPhotoConfig::from_env(),
        ));
        let translator = build_translator(TranslationConfig::from_env(), http.clone(), cache);

        let wordpress = WordPressConfig::from_env();
        if !wordpress.is_configured() {
            tracing::warn!("WP_URL, WP_USER or WP_APP_PASSWORD not set. Publishing will fail.");
        }
        let publisher: Arc<dyn Publisher> = Arc::new(WordPressPublisher::new(http, wordpress));

        let rate_limiter: Arc<dyn RateLimiter> =
            Arc::new(InMemoryRateLimiter::new(RateLimitConfig::from_env()));

        tracing::info!("Application state initialized");

        Ok(Self::assemble(
            images,
            translator,
            templates,
            publisher,
            history,
            rate_limiter,
            config.pipeline.clone(),
        ))
    }

    /// Wire already-built services together.
    pub fn assemble(
        images: Arc<dyn ImageSearch>,
        translator: Arc<dyn Translator>,
        templates: Arc<dyn TemplateStore>,
        publisher: Arc<dyn Publisher>,
        history: Arc<dyn HistoryStore>,
        rate_limiter: Arc<dyn RateLimiter>,
        settings: PipelineSettings,
    ) -> Self {
        let pipeline = SubmissionPipeline::new(
            images.clone(),
            translator.clone(),
            templates.clone(),
            publisher,
            history.clone(),
            settings.clone(),
        );

        Self {
            pipeline,
            templates,
            history,
            images,
            translator,
            rate_limiter,
            settings,
        }
    }
}

#[cfg(feature = "redis")]
async fn init_cache() -> Arc<dyn Cache> {
    use autopost_infra::{RedisCache, RedisConfig};

    let Some(config) = RedisConfig::from_env() else {
        tracing::info!("REDIS_URL not set. Using in-memory cache.");
        return Arc::new(InMemoryCache::new());
    };

    match RedisCache::new(config).await {
        Ok(cache) => Arc::new(cache),
        Err(e) => {
            tracing::error!(error = %e, "Failed to connect to Redis. Using in-memory cache.");
            Arc::new(InMemoryCache::new())
        }
    }
}

#[cfg(not(feature = "redis"))]
async fn init_cache() -> Arc<dyn Cache> {
    tracing::info!("Running without redis feature - using in-memory cache");
    Arc::new(InMemoryCache::new())
}

#[cfg(feature = "sqlite")]
async fn init_history() -> Arc<dyn HistoryStore> {
    use autopost_infra::history::connect;
    use autopost_infra::{HistoryDbConfig, SeaOrmHistoryStore};

    let config = HistoryDbConfig::from_env();
    match connect(&config).await {
        Ok(db) => Arc::new(SeaOrmHistoryStore::new(db)),
        Err(e) => {
            tracing::error!(
                url = %config.url,
                error = %e,
                "Failed to open history database. Using in-memory fallback."
            );
            Arc::new(InMemoryHistoryStore::new())
        }
    }
}

#[cfg(not(feature = "sqlite"))]
async fn init_history() -> Arc<dyn HistoryStore> {
    tracing::info!("Running without sqlite feature - history is kept in memory");
    Arc::new(InMemoryHistoryStore::new())
}
