use async_trait::async_trait;

use crate::domain::{ImageCandidate, ImageQuery};

/// Stock photo search.
#[async_trait]
pub trait ImageSearch: Send + Sync {
    /// Candidates for `query`, best first.
    ///
    /// Upstream failures yield an empty list.
    async fn search(&self, query: &ImageQuery) -> Vec<ImageCandidate>;
}
