//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod cache;
mod history;
mod image_search;
mod publisher;
mod rate_limit;
mod template_store;
mod translator;

pub use cache::{Cache, CacheError};
pub use history::HistoryStore;
pub use image_search::ImageSearch;
pub use publisher::{PostId, PublishRequest, Publisher};
pub use rate_limit::{RateLimitError, RateLimitResult, RateLimiter};
pub use template_store::{StoreError, TemplateStore};
pub use translator::{IdentityTranslator, Translator};
