//! Publishing history.

use actix_web::{HttpResponse, web};

use autopost_core::domain::HistoryRecord;
use autopost_core::error::RepoError;
use autopost_shared::ApiResponse;
use autopost_shared::dto::{HistoryEntryResponse, HistoryQuery, StatsResponse, StatusUpdateRequest};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

const DEFAULT_LIMIT: u64 = 50;
const MAX_LIMIT: u64 = 500;

fn to_response(record: HistoryRecord) -> HistoryEntryResponse {
    HistoryEntryResponse {
        id: record.id,
        title: record.title,
        keywords: record.keywords,
        image_url: record.image_url,
        wordpress_post_id: record.wordpress_post_id,
        created_at: record.created_at.to_rfc3339(),
        status: record.status,
        template_used: record.template_used,
    }
}

/// GET /api/history?limit
pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<HistoryQuery>,
) -> AppResult<HttpResponse> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let entries: Vec<HistoryEntryResponse> = state
        .history
        .list(limit)
        .await?
        .into_iter()
        .map(to_response)
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::ok(entries)))
}

/// GET /api/history/stats
pub async fn stats(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let stats = state.history.stats().await?;

    Ok(HttpResponse::Ok().json(StatsResponse {
        total_count: stats.total_count,
        distinct_active_days: stats.distinct_active_days,
        average_per_day: stats.average_per_day,
    }))
}

/// DELETE /api/history/{id}
pub async fn delete(state: web::Data<AppState>, path: web::Path<i64>) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    state.history.delete(id).await.map_err(|e| not_found(e, id))?;

    tracing::info!(id, "History entry deleted");
    Ok(HttpResponse::NoContent().finish())
}

/// PUT /api/history/{id}/status
pub async fn update_status(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<StatusUpdateRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let status = body.into_inner().status.trim().to_ascii_lowercase();
    if status.is_empty() {
        return Err(AppError::BadRequest("Status is required".to_string()));
    }

    state
        .history
        .update_status(id, &status)
        .await
        .map_err(|e| not_found(e, id))?;

    tracing::info!(id, status = %status, "History status updated");
    Ok(HttpResponse::NoContent().finish())
}

fn not_found(err: RepoError, id: i64) -> AppError {
    match err {
        RepoError::NotFound => AppError::NotFound(format!("History entry {id} not found")),
        other => other.into(),
    }
}
