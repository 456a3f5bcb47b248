use async_trait::async_trait;

use crate::domain::{HistoryRecord, NewHistoryEntry, PostStats};
use crate::error::RepoError;

/// Append-only log of published posts.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    async fn record(&self, entry: NewHistoryEntry) -> Result<HistoryRecord, RepoError>;

    /// Most recent records first.
    async fn list(&self, limit: u64) -> Result<Vec<HistoryRecord>, RepoError>;

    async fn stats(&self) -> Result<PostStats, RepoError>;

    async fn delete(&self, id: i64) -> Result<(), RepoError>;

    async fn update_status(&self, id: i64, status: &str) -> Result<(), RepoError>;
}
