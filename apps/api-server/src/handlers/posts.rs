//! Post submission and preview.

use actix_web::{HttpResponse, web};
use chrono::{DateTime, NaiveDateTime, Utc};

use autopost_core::domain::{
    Alignment, ContentImage, ContentSubmission, DEFAULT_TEMPLATE_NAME, FeaturedImage, ImageSource,
    split_tags,
};
use autopost_core::render::normalize_content_images;
use autopost_shared::dto::{PreviewResponse, SubmissionForm};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Formats a `datetime-local` input may send.
const PUBLISH_DATE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

/// POST /api/posts
pub async fn submit(
    state: web::Data<AppState>,
    form: web::Form<SubmissionForm>,
) -> AppResult<HttpResponse> {
    let submission = submission_from_form(form.into_inner())?;
    tracing::info!(
        title = %submission.title,
        template = %submission.template_name,
        source = %submission.source,
        "Post submitted"
    );

    let outcome = state.pipeline.submit(submission).await;
    if outcome.is_success() {
        Ok(HttpResponse::Created().json(outcome))
    } else {
        Ok(HttpResponse::BadGateway().json(outcome))
    }
}

/// POST /api/posts/preview
pub async fn preview(
    state: web::Data<AppState>,
    form: web::Form<SubmissionForm>,
) -> AppResult<HttpResponse> {
    let submission = submission_from_form(form.into_inner())?;
    let rendered = state.pipeline.preview(&submission).await;

    Ok(HttpResponse::Ok().json(PreviewResponse {
        html: rendered.html,
        tags: rendered.tags_rendered,
    }))
}

/// Map the raw form onto a validated submission.
///
/// `image_urls` carries search picks: the first becomes the featured image
/// unless `image_url` is set, the rest become content images unless
/// `content_images` is set.
pub fn submission_from_form(form: SubmissionForm) -> AppResult<ContentSubmission> {
    let image_alignment = parse_alignment(form.image_alignment.as_deref())?;
    let content_image_alignment = parse_alignment(form.content_image_alignment.as_deref())?;
    let source = match form.source.as_deref() {
        Some(raw) => raw.parse::<ImageSource>()?,
        None => ImageSource::default(),
    };
    let publish_at = form
        .publish_date
        .as_deref()
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .map(parse_publish_date)
        .transpose()?;

    let mut picked: Vec<&str> = form
        .image_urls
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .collect();

    let featured_image = match non_blank(form.image_url.as_deref()) {
        Some(url) => Some(FeaturedImage::from_url(url)),
        None if !picked.is_empty() => Some(FeaturedImage::from_url(picked.remove(0))),
        None => None,
    };

    let content_images = match non_blank(form.content_images.as_deref()) {
        Some(raw) => normalize_content_images(Some(raw), content_image_alignment),
        None => picked
            .into_iter()
            .map(|url| ContentImage::new(url, content_image_alignment))
            .collect(),
    };

    let tags = match non_blank(Some(form.tags.as_str())) {
        Some(raw) => split_tags(raw),
        None => split_tags(&form.keywords),
    };

    let submission = ContentSubmission {
        title: form.title.trim().to_string(),
        body: form.content,
        keywords: form.keywords.trim().to_string(),
        tags,
        featured_image,
        content_images,
        image_alignment,
        content_image_alignment,
        alternating_alignment: is_checked(form.alternating_alignment.as_deref()),
        template_name: non_blank(form.template.as_deref())
            .unwrap_or(DEFAULT_TEMPLATE_NAME)
            .to_string(),
        source,
        publish_at,
    };

    submission.validate()?;
    Ok(submission)
}

fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

fn parse_alignment(raw: Option<&str>) -> AppResult<Alignment> {
    raw.map_or(Ok(Alignment::None), |raw| {
        raw.parse::<Alignment>()
            .map_err(|e| AppError::BadRequest(e.to_string()))
    })
}

fn is_checked(raw: Option<&str>) -> bool {
    raw.map(|v| v.trim().to_ascii_lowercase())
        .is_some_and(|v| matches!(v.as_str(), "1" | "on" | "true" | "yes"))
}

/// Naive form dates are taken as UTC.
fn parse_publish_date(raw: &str) -> AppResult<DateTime<Utc>> {
    PUBLISH_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| AppError::BadRequest(format!("Invalid publish date: {raw}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn form(title: &str) -> SubmissionForm {
        SubmissionForm {
            title: title.to_string(),
            content: "Para one.\n\nPara two.".to_string(),
            keywords: "sea, sand".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_search_picks_split_into_featured_and_content() {
        let submission = submission_from_form(SubmissionForm {
            image_urls: Some("http://p/1.jpg, http://p/2.jpg,http://p/3.jpg".to_string()),
            content_image_alignment: Some("right".to_string()),
            ..form("Beach")
        })
        .unwrap();

        assert_eq!(submission.featured_image.unwrap().url, "http://p/1.jpg");
        assert_eq!(
            submission.content_images,
            vec![
                ContentImage::new("http://p/2.jpg", Alignment::Right),
                ContentImage::new("http://p/3.jpg", Alignment::Right),
            ]
        );
    }

    #[test]
    fn test_explicit_images_win_over_search_picks() {
        let submission = submission_from_form(SubmissionForm {
            image_url: Some("http://img/a.jpg".to_string()),
            image_urls: Some("http://p/1.jpg,http://p/2.jpg".to_string()),
            content_images: Some(r#"[{"url":"http://img/c.jpg","alignment":"left"}]"#.to_string()),
            ..form("Beach")
        })
        .unwrap();

        assert_eq!(submission.featured_image.unwrap().url, "http://img/a.jpg");
        assert_eq!(
            submission.content_images,
            vec![ContentImage::new("http://img/c.jpg", Alignment::Left)]
        );
    }

    #[test]
    fn test_tags_fall_back_to_keywords() {
        let submission = submission_from_form(form("Beach")).unwrap();
        assert_eq!(submission.tags, vec!["sea", "sand"]);

        let tagged = submission_from_form(SubmissionForm {
            tags: "travel, food".to_string(),
            ..form("Beach")
        })
        .unwrap();
        assert_eq!(tagged.tags, vec!["travel", "food"]);
    }

    #[test]
    fn test_defaults_and_checkbox() {
        let submission = submission_from_form(SubmissionForm {
            template: Some(" ".to_string()),
            alternating_alignment: Some("on".to_string()),
            ..form("Beach")
        })
        .unwrap();

        assert_eq!(submission.template_name, "default");
        assert_eq!(submission.source, ImageSource::Pexels);
        assert!(submission.alternating_alignment);
        assert!(submission.publish_at.is_none());
        assert!(submission.featured_image.is_none());
    }

    #[test]
    fn test_publish_date_is_parsed() {
        let submission = submission_from_form(SubmissionForm {
            publish_date: Some("2026-11-02T09:30".to_string()),
            ..form("Beach")
        })
        .unwrap();
        assert_eq!(
            submission.publish_at,
            Some(Utc.with_ymd_and_hms(2026, 11, 2, 9, 30, 0).unwrap())
        );
    }

    #[test]
    fn test_bad_input_is_rejected() {
        assert!(matches!(
            submission_from_form(form("  ")),
            Err(AppError::BadRequest(msg)) if msg == "Title is required"
        ));
        assert!(submission_from_form(SubmissionForm {
            publish_date: Some("next tuesday".to_string()),
            ..form("Beach")
        })
        .is_err());
        assert!(submission_from_form(SubmissionForm {
            image_alignment: Some("diagonal".to_string()),
            ..form("Beach")
        })
        .is_err());
        assert!(submission_from_form(SubmissionForm {
            source: Some("flickr".to_string()),
            ..form("Beach")
        })
        .is_err());
    }
}
