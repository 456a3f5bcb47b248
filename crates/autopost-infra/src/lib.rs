//! # Autopost Infrastructure
//!
//! Concrete implementations of the ports defined in `autopost-core`:
//! WordPress publishing, stock photo search, keyword translation, template
//! and history persistence, caching and rate limiting.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - In-memory history and cache only
//! - `sqlite` - Post history in SQLite via SeaORM
//! - `redis` - Redis translation cache

pub mod cache;
pub mod history;
pub mod http;
pub mod images;
pub mod rate_limit;
pub mod templates;
pub mod translation;
pub mod wordpress;

// Re-exports - In-Memory
pub use cache::InMemoryCache;
pub use history::InMemoryHistoryStore;
pub use rate_limit::{InMemoryRateLimiter, RateLimitConfig};

// Re-exports - Adapters
pub use images::{StockPhotoClient, StockPhotoConfig};
pub use templates::{FileTemplateStore, TemplateStoreConfig};
pub use translation::{ResilientTranslator, TranslationConfig, build_translator};
pub use wordpress::{WordPressConfig, WordPressPublisher};

#[cfg(feature = "sqlite")]
pub use history::{HistoryDbConfig, SeaOrmHistoryStore};

#[cfg(feature = "redis")]
pub use cache::{RedisCache, RedisConfig};
