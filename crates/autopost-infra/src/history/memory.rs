//! In-memory history store - used when the history database cannot be opened.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use autopost_core::domain::{HistoryRecord, NewHistoryEntry, PostStats, STATUS_PUBLISHED};
use autopost_core::error::RepoError;
use autopost_core::ports::HistoryStore;

#[derive(Default)]
struct Inner {
    records: Vec<HistoryRecord>,
    last_id: i64,
}

/// History kept for the life of the process only.
#[derive(Default)]
pub struct InMemoryHistoryStore {
    inner: RwLock<Inner>,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HistoryStore for InMemoryHistoryStore {
    async fn record(&self, entry: NewHistoryEntry) -> Result<HistoryRecord, RepoError> {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let record = HistoryRecord {
            id: inner.last_id,
            title: entry.title,
            content: entry.content,
            keywords: entry.keywords,
            image_url: entry.image_url,
            wordpress_post_id: Some(entry.wordpress_post_id),
            created_at: Utc::now(),
            status: STATUS_PUBLISHED.to_string(),
            template_used: Some(entry.template_used),
        };
        inner.records.push(record.clone());
        Ok(record)
    }

    async fn list(&self, limit: u64) -> Result<Vec<HistoryRecord>, RepoError> {
        let inner = self.inner.read().await;
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(inner.records.iter().rev().take(limit).cloned().collect())
    }

    async fn stats(&self) -> Result<PostStats, RepoError> {
        let inner = self.inner.read().await;
        Ok(PostStats::from_timestamps(inner.records.iter().map(|r| r.created_at)))
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let mut inner = self.inner.write().await;
        let before = inner.records.len();
        inner.records.retain(|r| r.id != id);
        if inner.records.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn update_status(&self, id: i64, status: &str) -> Result<(), RepoError> {
        let mut inner = self.inner.write().await;
        let record = inner
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(RepoError::NotFound)?;
        record.status = status.to_string();
        Ok(())
    }
}
