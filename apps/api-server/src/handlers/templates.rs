//! Template listing and saving.

use actix_web::{HttpResponse, web};

use autopost_core::domain::Template;
use autopost_shared::ApiResponse;
use autopost_shared::dto::{TemplateResponse, TemplateSaveRequest};

use crate::middleware::error::AppResult;
use crate::state::AppState;

fn to_response(template: Template) -> TemplateResponse {
    TemplateResponse {
        name: template.name,
        content: template.content,
        created_at: template.created_at.to_rfc3339(),
    }
}

/// GET /api/templates
pub async fn list(state: web::Data<AppState>) -> HttpResponse {
    let templates: Vec<TemplateResponse> = state
        .templates
        .list()
        .await
        .into_values()
        .map(to_response)
        .collect();

    HttpResponse::Ok().json(ApiResponse::ok(templates))
}

/// POST /api/templates
///
/// Brace placeholders are rewritten to `@slot@` form before storing.
pub async fn save(
    state: web::Data<AppState>,
    body: web::Json<TemplateSaveRequest>,
) -> AppResult<HttpResponse> {
    let request = body.into_inner();
    let template = state.templates.save(&request.name, &request.content).await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(
        to_response(template),
        "Template saved.",
    )))
}
