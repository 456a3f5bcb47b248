use chrono::{DateTime, Utc};

use super::{Alignment, ContentImage, DEFAULT_TEMPLATE_NAME, FeaturedImage, ImageSource};
use crate::DomainError;

/// Everything needed to render and publish one post.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentSubmission {
    pub title: String,
    pub body: String,
    /// Free-text search keywords for stock photos.
    pub keywords: String,
    pub tags: Vec<String>,
    pub featured_image: Option<FeaturedImage>,
    pub content_images: Vec<ContentImage>,
    pub image_alignment: Alignment,
    pub content_image_alignment: Alignment,
    pub alternating_alignment: bool,
    pub template_name: String,
    pub source: ImageSource,
    pub publish_at: Option<DateTime<Utc>>,
}

impl ContentSubmission {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            keywords: String::new(),
            tags: Vec::new(),
            featured_image: None,
            content_images: Vec::new(),
            image_alignment: Alignment::None,
            content_image_alignment: Alignment::None,
            alternating_alignment: false,
            template_name: DEFAULT_TEMPLATE_NAME.to_string(),
            source: ImageSource::default(),
            publish_at: None,
        }
    }

    pub fn with_keywords(mut self, keywords: impl Into<String>) -> Self {
        self.keywords = keywords.into();
        self
    }

    /// Set tags from comma-separated input.
    pub fn with_tags(mut self, raw: &str) -> Self {
        self.tags = split_tags(raw);
        self
    }

    pub fn with_featured_image(mut self, image: FeaturedImage) -> Self {
        self.featured_image = Some(image);
        self
    }

    pub fn with_content_images(mut self, images: Vec<ContentImage>) -> Self {
        self.content_images = images;
        self
    }

    pub fn with_template(mut self, name: impl Into<String>) -> Self {
        self.template_name = name.into();
        self
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.title.trim().is_empty() {
            return Err(DomainError::Validation("Title is required".to_string()));
        }
        Ok(())
    }

    /// True when the submitter already picked images.
    pub fn has_images(&self) -> bool {
        self.featured_image.is_some() || !self.content_images.is_empty()
    }
}

/// Split comma-separated tags, trimming entries and dropping empty ones.
pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_tags_drops_blanks() {
        assert_eq!(split_tags(" travel , ,food,"), vec!["travel", "food"]);
        assert!(split_tags("  ").is_empty());
    }

    #[test]
    fn test_validate_requires_title() {
        assert!(ContentSubmission::new("  ", "body").validate().is_err());
        assert!(ContentSubmission::new("Title", "").validate().is_ok());
    }
}
