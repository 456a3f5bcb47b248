//! The submission pipeline: images → translation → render → publish → history.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;

use crate::domain::{ContentImage, ContentSubmission, FeaturedImage, ImageQuery, NewHistoryEntry};
use crate::ports::{
    HistoryStore, ImageSearch, PostId, PublishRequest, Publisher, TemplateStore, Translator,
};
use crate::render::{RenderedPost, render_post};

/// Tunables for automatic image selection.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    /// Images fetched when the submitter picked none (featured + content).
    pub image_count: usize,
    pub min_width: u32,
    pub min_height: u32,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            image_count: 4,
            min_width: 0,
            min_height: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
    Success,
    Error,
}

/// What the submitter is told about one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionOutcome {
    pub status: OutcomeStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_id: Option<PostId>,
}

impl SubmissionOutcome {
    pub fn success(post_id: PostId) -> Self {
        Self {
            status: OutcomeStatus::Success,
            message: "Post published to WordPress.".to_string(),
            post_id: Some(post_id),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: OutcomeStatus::Error,
            message: message.into(),
            post_id: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == OutcomeStatus::Success
    }
}

/// Drives one submission end to end against long-lived service handles.
#[derive(Clone)]
pub struct SubmissionPipeline {
    images: Arc<dyn ImageSearch>,
    translator: Arc<dyn Translator>,
    templates: Arc<dyn TemplateStore>,
    publisher: Arc<dyn Publisher>,
    history: Arc<dyn HistoryStore>,
    settings: PipelineSettings,
}

impl SubmissionPipeline {
    pub fn new(
        images: Arc<dyn ImageSearch>,
        translator: Arc<dyn Translator>,
        templates: Arc<dyn TemplateStore>,
        publisher: Arc<dyn Publisher>,
        history: Arc<dyn HistoryStore>,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            images,
            translator,
            templates,
            publisher,
            history,
            settings,
        }
    }

    /// Render a submission without fetching images or publishing.
    pub async fn preview(&self, submission: &ContentSubmission) -> RenderedPost {
        let template = self.templates.get(&submission.template_name).await;
        render_post(&template, submission, Utc::now())
    }

    pub async fn submit(&self, mut submission: ContentSubmission) -> SubmissionOutcome {
        if let Err(e) = submission.validate() {
            return SubmissionOutcome::error(e.to_string());
        }

        if !submission.has_images() {
            self.attach_images(&mut submission).await;
        }

        let template = self.templates.get(&submission.template_name).await;
        let rendered = render_post(&template, &submission, Utc::now());

        let request = PublishRequest {
            title: submission.title.clone(),
            html: rendered.html.clone(),
            featured_image: submission.featured_image.as_ref().map(|i| i.url.clone()),
            publish_at: submission.publish_at,
            tags: submission.tags.clone(),
        };

        let Some(post_id) = self.publisher.publish(&request).await else {
            return SubmissionOutcome::error("Publishing to WordPress failed.");
        };

        tracing::info!(post_id, title = %submission.title, template = %template.name, "Post published");

        let entry = NewHistoryEntry {
            title: submission.title,
            content: rendered.html,
            keywords: submission.keywords,
            image_url: request.featured_image,
            wordpress_post_id: post_id,
            template_used: template.name,
        };
        if let Err(e) = self.history.record(entry).await {
            tracing::warn!(post_id, error = %e, "Post published but history was not recorded");
        }

        SubmissionOutcome::success(post_id)
    }

    /// Fill featured and content images from a stock photo search.
    async fn attach_images(&self, submission: &mut ContentSubmission) {
        let keywords = submission.keywords.trim();
        if keywords.is_empty() {
            return;
        }

        let query = ImageQuery {
            keywords: self.translator.translate(keywords).await,
            source: submission.source,
            count: self.settings.image_count,
            min_width: self.settings.min_width,
            min_height: self.settings.min_height,
        };

        let mut found = self.images.search(&query).await.into_iter();
        let Some(first) = found.next() else {
            tracing::info!(keywords = %query.keywords, "No images found, publishing without images");
            return;
        };

        let alignment = submission.content_image_alignment;
        submission.featured_image = Some(FeaturedImage::from(first));
        submission.content_images = found
            .map(|c| ContentImage::new(c.url, alignment))
            .collect();
    }
}
