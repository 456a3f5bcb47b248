//! Alignment options for the submission form.

use actix_web::HttpResponse;

use autopost_core::domain::Alignment;
use autopost_shared::dto::AlignmentOption;

/// GET /api/alignments
pub async fn list() -> HttpResponse {
    let options: Vec<AlignmentOption> = Alignment::ALL
        .into_iter()
        .map(|alignment| AlignmentOption {
            value: alignment.as_str().to_string(),
            label: alignment.label().to_string(),
        })
        .collect();

    HttpResponse::Ok().json(options)
}
