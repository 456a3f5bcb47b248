//! Stock photo search for the submission form.

use actix_web::{HttpResponse, web};

use autopost_core::domain::{ImageQuery, ImageSource};
use autopost_shared::dto::{ImageSearchParams, ImageSearchResponse, ImageSize};

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// Largest batch a caller may ask for.
const MAX_COUNT: usize = 10;

/// GET /api/images?keywords&source&count&min_width&min_height
///
/// Keywords are translated first. Upstream failures yield an empty list.
pub async fn search(
    state: web::Data<AppState>,
    params: web::Query<ImageSearchParams>,
) -> AppResult<HttpResponse> {
    let params = params.into_inner();
    let source = match params.source.as_deref() {
        Some(raw) => raw.parse::<ImageSource>()?,
        None => ImageSource::default(),
    };

    let keywords = state.translator.translate(params.keywords.trim()).await;
    let query = ImageQuery {
        keywords,
        source,
        count: params
            .count
            .unwrap_or(state.settings.image_count)
            .min(MAX_COUNT),
        min_width: params.min_width.unwrap_or(state.settings.min_width),
        min_height: params.min_height.unwrap_or(state.settings.min_height),
    };

    let images = state.images.search(&query).await;
    let response = ImageSearchResponse {
        image_sizes: images
            .iter()
            .map(|image| ImageSize {
                width: image.width,
                height: image.height,
            })
            .collect(),
        image_urls: images.into_iter().map(|image| image.url).collect(),
    };

    Ok(HttpResponse::Ok().json(response))
}
