use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Identifier WordPress assigns to a created post.
pub type PostId = i64;

/// A rendered post ready for publishing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishRequest {
    pub title: String,
    pub html: String,
    /// URL or local path of the image to upload as featured media.
    pub featured_image: Option<String>,
    pub publish_at: Option<DateTime<Utc>>,
    pub tags: Vec<String>,
}

/// Remote blog publishing.
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Create the post. `None` means publishing failed; the cause is logged
    /// by the implementation.
    async fn publish(&self, request: &PublishRequest) -> Option<PostId>;
}
