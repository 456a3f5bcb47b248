use reqwest::Client;
use serde::Deserialize;

use autopost_core::domain::ImageCandidate;

use super::ImageSearchError;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    photos: Vec<Photo>,
}

#[derive(Debug, Deserialize)]
struct Photo {
    width: u32,
    height: u32,
    src: PhotoSources,
}

#[derive(Debug, Deserialize)]
struct PhotoSources {
    large: String,
}

/// `GET {base}/v1/search`, authenticated with the bare API key.
pub(super) async fn search(
    http: &Client,
    base_url: &str,
    api_key: &str,
    keywords: &str,
    per_page: usize,
) -> Result<Vec<ImageCandidate>, ImageSearchError> {
    let response = http
        .get(format!("{}/v1/search", base_url.trim_end_matches('/')))
        .header(reqwest::header::AUTHORIZATION, api_key)
        .query(&[("query", keywords), ("per_page", per_page.to_string().as_str())])
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(ImageSearchError::Status(response.status().as_u16()));
    }

    let body: SearchResponse = response.json().await?;
    Ok(body
        .photos
        .into_iter()
        .map(|p| ImageCandidate::new(p.src.large, p.width, p.height))
        .collect())
}
