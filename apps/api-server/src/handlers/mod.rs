//! HTTP handlers and route configuration.

mod alignments;
mod health;
mod history;
mod images;
mod posts;
mod templates;
mod translate;

use actix_web::web;

use crate::middleware::error::AppError;
use crate::middleware::rate_limit::RateLimitMiddleware;
use crate::state::AppState;

/// Configure all application routes.
///
/// Payload rejections (unknown form fields, malformed JSON or query
/// strings) are answered with problem details like every other error.
pub fn configure_routes(cfg: &mut web::ServiceConfig, state: &AppState) {
    cfg.app_data(
        web::FormConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            // Publishing is rate limited per client IP
            .service(
                web::resource("/posts")
                    .wrap(RateLimitMiddleware::new(state.rate_limiter.clone()))
                    .route(web::post().to(posts::submit)),
            )
            .route("/posts/preview", web::post().to(posts::preview))
            .route("/images", web::get().to(images::search))
            .route("/translate", web::get().to(translate::translate))
            .service(
                web::resource("/templates")
                    .route(web::get().to(templates::list))
                    .route(web::post().to(templates::save)),
            )
            .route("/alignments", web::get().to(alignments::list))
            .service(
                web::scope("/history")
                    .route("", web::get().to(history::list))
                    .route("/stats", web::get().to(history::stats))
                    .route("/{id}", web::delete().to(history::delete))
                    .route("/{id}/status", web::put().to(history::update_status)),
            ),
    );
}
