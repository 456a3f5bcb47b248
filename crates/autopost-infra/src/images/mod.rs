//! Stock photo search (Pexels, Unsplash).

mod pexels;
mod unsplash;

use async_trait::async_trait;
use reqwest::Client;

use autopost_core::domain::{ImageCandidate, ImageQuery, ImageSource, select_images};
use autopost_core::ports::ImageSearch;

/// Upper bound on candidates requested from a provider.
const MAX_PER_PAGE: usize = 30;

#[derive(Debug, thiserror::Error)]
pub enum ImageSearchError {
    #[error("No API key configured for {0}")]
    MissingKey(ImageSource),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Provider answered with status {0}")]
    Status(u16),
}

/// Stock photo provider credentials and endpoints.
#[derive(Debug, Clone)]
pub struct StockPhotoConfig {
    pub pexels_api_key: Option<String>,
    pub unsplash_access_key: Option<String>,
    pub pexels_base_url: String,
    pub unsplash_base_url: String,
}

impl Default for StockPhotoConfig {
    fn default() -> Self {
        Self {
            pexels_api_key: None,
            unsplash_access_key: None,
            pexels_base_url: "https://api.pexels.com".to_string(),
            unsplash_base_url: "https://api.unsplash.com".to_string(),
        }
    }
}

impl StockPhotoConfig {
    pub fn from_env() -> Self {
        let non_empty = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());
        let defaults = Self::default();
        Self {
            pexels_api_key: non_empty("PEXELS_API_KEY"),
            unsplash_access_key: non_empty("UNSPLASH_ACCESS_KEY"),
            pexels_base_url: non_empty("PEXELS_API_URL").unwrap_or(defaults.pexels_base_url),
            unsplash_base_url: non_empty("UNSPLASH_API_URL")
                .unwrap_or(defaults.unsplash_base_url),
        }
    }
}

/// [`ImageSearch`] over the Pexels and Unsplash search APIs.
pub struct StockPhotoClient {
    http: Client,
    config: StockPhotoConfig,
}

impl StockPhotoClient {
    pub fn new(http: Client, config: StockPhotoConfig) -> Self {
        Self { http, config }
    }

    async fn fetch(
        &self,
        source: ImageSource,
        keywords: &str,
        per_page: usize,
    ) -> Result<Vec<ImageCandidate>, ImageSearchError> {
        match source {
            ImageSource::Pexels => {
                let key = self
                    .config
                    .pexels_api_key
                    .as_deref()
                    .ok_or(ImageSearchError::MissingKey(source))?;
                pexels::search(&self.http, &self.config.pexels_base_url, key, keywords, per_page)
                    .await
            }
            ImageSource::Unsplash => {
                let key = self
                    .config
                    .unsplash_access_key
                    .as_deref()
                    .ok_or(ImageSearchError::MissingKey(source))?;
                unsplash::search(
                    &self.http,
                    &self.config.unsplash_base_url,
                    key,
                    keywords,
                    per_page,
                )
                .await
            }
        }
    }
}

#[async_trait]
impl ImageSearch for StockPhotoClient {
    async fn search(&self, query: &ImageQuery) -> Vec<ImageCandidate> {
        let keywords = query.keywords.trim();
        if keywords.is_empty() || query.count == 0 {
            return Vec::new();
        }

        let per_page = (query.count * 3).clamp(1, MAX_PER_PAGE);
        match self.fetch(query.source, keywords, per_page).await {
            Ok(candidates) => {
                let found = candidates.len();
                let selected =
                    select_images(candidates, query.count, query.min_width, query.min_height);
                tracing::debug!(source = %query.source, keywords = %keywords, found, selected = selected.len(), "Image search finished");
                selected
            }
            Err(e) => {
                tracing::warn!(source = %query.source, keywords = %keywords, error = %e, "Image search failed");
                Vec::new()
            }
        }
    }
}
