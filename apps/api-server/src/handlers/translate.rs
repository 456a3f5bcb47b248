//! Keyword translation lookup.

use actix_web::{HttpResponse, web};

use autopost_shared::dto::{TranslateParams, TranslateResponse};

use crate::state::AppState;

/// GET /api/translate?keywords
pub async fn translate(
    state: web::Data<AppState>,
    params: web::Query<TranslateParams>,
) -> HttpResponse {
    let original = params.into_inner().keywords;
    let translated = state.translator.translate(&original).await;

    HttpResponse::Ok().json(TranslateResponse {
        original,
        translated,
    })
}
