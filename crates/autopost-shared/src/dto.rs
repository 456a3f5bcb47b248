//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

/// Post submission form, sent as `application/x-www-form-urlencoded`.
///
/// Every field is optional text, as browsers send it; the server decides
/// what is required. Unknown fields are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubmissionForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub keywords: String,
    /// Comma-separated. Falls back to `keywords` when blank.
    #[serde(default)]
    pub tags: String,
    pub source: Option<String>,
    pub template: Option<String>,
    /// Explicit featured image.
    pub image_url: Option<String>,
    /// Comma-separated picks from an image search: the first one is the
    /// featured image, the rest go into the body.
    pub image_urls: Option<String>,
    /// JSON array or comma-separated list of content images.
    #[serde(alias = "content_image_urls")]
    pub content_images: Option<String>,
    pub image_alignment: Option<String>,
    pub content_image_alignment: Option<String>,
    /// Checkbox value: `1`, `on`, `true` or `yes` turn it on.
    pub alternating_alignment: Option<String>,
    /// `YYYY-MM-DDTHH:MM`, as sent by a `datetime-local` input.
    pub publish_date: Option<String>,
}

/// Request to save a template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateSaveRequest {
    pub name: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateResponse {
    pub name: String,
    pub content: String,
    pub created_at: String,
}

/// Query of `GET /api/images`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageSearchParams {
    #[serde(default)]
    pub keywords: String,
    pub source: Option<String>,
    pub count: Option<usize>,
    pub min_width: Option<u32>,
    pub min_height: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

/// Image search result; `image_sizes[i]` belongs to `image_urls[i]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageSearchResponse {
    pub image_urls: Vec<String>,
    pub image_sizes: Vec<ImageSize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateParams {
    #[serde(default)]
    pub keywords: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateResponse {
    pub original: String,
    pub translated: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<u64>,
}

/// One published post as shown in the history list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntryResponse {
    pub id: i64,
    pub title: String,
    pub keywords: String,
    pub image_url: Option<String>,
    pub wordpress_post_id: Option<i64>,
    pub created_at: String,
    pub status: String,
    pub template_used: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    pub total_count: u64,
    pub distinct_active_days: u64,
    pub average_per_day: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: String,
}

/// An entry of the alignment drop-down.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignmentOption {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewResponse {
    pub html: String,
    pub tags: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_form_accepts_legacy_content_images_name() {
        let form: SubmissionForm = serde_json::from_value(json!({
            "title": "t",
            "content_image_urls": "http://x/1.jpg"
        }))
        .unwrap();
        assert_eq!(form.content_images.as_deref(), Some("http://x/1.jpg"));
        assert!(form.content.is_empty());
    }

    #[test]
    fn test_form_rejects_unknown_fields() {
        let result = serde_json::from_value::<SubmissionForm>(json!({
            "title": "t",
            "injected_slot": "x"
        }));
        assert!(result.is_err());
    }
}
