use reqwest::Client;
use serde::Deserialize;

use autopost_core::domain::ImageCandidate;

use super::ImageSearchError;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<Photo>,
}

#[derive(Debug, Deserialize)]
struct Photo {
    width: u32,
    height: u32,
    urls: PhotoUrls,
}

#[derive(Debug, Deserialize)]
struct PhotoUrls {
    regular: String,
}

/// `GET {base}/search/photos`, authenticated as `Client-ID <key>`.
pub(super) async fn search(
    http: &Client,
    base_url: &str,
    access_key: &str,
    keywords: &str,
    per_page: usize,
) -> Result<Vec<ImageCandidate>, ImageSearchError> {
    let response = http
        .get(format!("{}/search/photos", base_url.trim_end_matches('/')))
        .header(
            reqwest::header::AUTHORIZATION,
            format!("Client-ID {access_key}"),
        )
        .query(&[("query", keywords), ("per_page", per_page.to_string().as_str())])
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(ImageSearchError::Status(response.status().as_u16()));
    }

    let body: SearchResponse = response.json().await?;
    Ok(body
        .results
        .into_iter()
        .map(|p| ImageCandidate::new(p.urls.regular, p.width, p.height))
        .collect())
}
