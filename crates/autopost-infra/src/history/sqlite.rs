//! SeaORM-backed history store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, DbConn, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set};

use autopost_core::domain::{HistoryRecord, NewHistoryEntry, PostStats, STATUS_PUBLISHED};
use autopost_core::error::RepoError;
use autopost_core::ports::HistoryStore;

use super::entity::{self, Entity as PostEntity};

fn query_error(e: DbErr) -> RepoError {
    RepoError::Query(e.to_string())
}

/// Ids outside the column's range cannot exist.
fn row_id(id: i64) -> Result<i32, RepoError> {
    i32::try_from(id).map_err(|_| RepoError::NotFound)
}

pub struct SeaOrmHistoryStore {
    db: DbConn,
}

impl SeaOrmHistoryStore {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl HistoryStore for SeaOrmHistoryStore {
    async fn record(&self, entry: NewHistoryEntry) -> Result<HistoryRecord, RepoError> {
        let model = entity::ActiveModel {
            title: Set(entry.title),
            content: Set(entry.content),
            keywords: Set(entry.keywords),
            image_url: Set(entry.image_url),
            wordpress_id: Set(Some(entry.wordpress_post_id)),
            created_at: Set(Utc::now()),
            status: Set(STATUS_PUBLISHED.to_string()),
            template_used: Set(Some(entry.template_used)),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(query_error)?;

        tracing::debug!(id = model.id, wordpress_id = ?model.wordpress_id, "History recorded");
        Ok(model.into())
    }

    async fn list(&self, limit: u64) -> Result<Vec<HistoryRecord>, RepoError> {
        let models = PostEntity::find()
            .order_by_desc(entity::Column::CreatedAt)
            .order_by_desc(entity::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(query_error)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn stats(&self) -> Result<PostStats, RepoError> {
        let timestamps: Vec<DateTime<Utc>> = PostEntity::find()
            .select_only()
            .column(entity::Column::CreatedAt)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(query_error)?;

        Ok(PostStats::from_timestamps(timestamps))
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let result = PostEntity::delete_by_id(row_id(id)?)
            .exec(&self.db)
            .await
            .map_err(query_error)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn update_status(&self, id: i64, status: &str) -> Result<(), RepoError> {
        let result = PostEntity::update_many()
            .col_expr(entity::Column::Status, Expr::value(status.to_string()))
            .filter(entity::Column::Id.eq(row_id(id)?))
            .exec(&self.db)
            .await
            .map_err(query_error)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}
