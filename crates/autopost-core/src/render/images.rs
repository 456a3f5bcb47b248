//! Normalization of the `content_images` form field.
//!
//! The field arrives as a JSON array (of URLs or of `{url, alignment}`
//! objects), as comma-separated URLs, or as one bare URL.

use serde_json::Value;

use crate::domain::{Alignment, ContentImage};

/// Turn any accepted `content_images` encoding into an ordered image list.
///
/// Entries without a usable alignment get `default`. Input that looks like
/// JSON but fails to parse is split on commas instead.
pub fn normalize_content_images(raw: Option<&str>, default: Alignment) -> Vec<ContentImage> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Vec::new();
    };

    if raw.starts_with('[') {
        match serde_json::from_str::<Vec<Value>>(raw) {
            Ok(entries) => return from_json_entries(entries, default),
            Err(e) => {
                tracing::debug!(error = %e, "content_images is not valid JSON, splitting on commas");
            }
        }
    }

    split_urls(raw, default)
}

fn from_json_entries(entries: Vec<Value>, default: Alignment) -> Vec<ContentImage> {
    entries
        .into_iter()
        .filter_map(|entry| match entry {
            Value::String(url) => Some(ContentImage::new(url.trim(), default)),
            Value::Object(fields) => {
                let url = fields.get("url")?.as_str()?.trim().to_string();
                let alignment = fields
                    .get("alignment")
                    .and_then(Value::as_str)
                    .and_then(|a| a.parse().ok())
                    .unwrap_or(default);
                Some(ContentImage::new(url, alignment))
            }
            _ => None,
        })
        .filter(|image| !image.url.is_empty())
        .collect()
}

fn split_urls(raw: &str, default: Alignment) -> Vec<ContentImage> {
    raw.split(',')
        .map(|piece| piece.trim_matches(|c: char| c.is_whitespace() || matches!(c, '[' | ']' | '"')))
        .filter(|url| !url.is_empty())
        .map(|url| ContentImage::new(url, default))
        .collect()
}
