use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{ContentSubmission, Template};
use crate::error::RenderError;

use super::fields::{self, ContentImageBlocks};
use super::grammar;
use super::slots::{POSITIONAL_IMAGE_SLOTS, Slot, SlotValues};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Final markup of a post plus the tag line it was rendered with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedPost {
    pub html: String,
    pub tags_rendered: String,
}

/// Render `submission` into `template`.
///
/// Never fails: if the template cannot be rendered, a minimal fallback
/// document is returned instead.
pub fn render_post(
    template: &Template,
    submission: &ContentSubmission,
    now: DateTime<Utc>,
) -> RenderedPost {
    let tags_rendered = fields::format_tags(&submission.tags);

    let html = match render_markup(&template.content, submission, now) {
        Ok(html) => html,
        Err(e) => {
            tracing::warn!(
                template = %template.name,
                error = %e,
                "Template rendering failed, using fallback document"
            );
            fallback_document(submission)
        }
    };

    RenderedPost {
        html,
        tags_rendered,
    }
}

fn render_markup(
    markup: &str,
    submission: &ContentSubmission,
    now: DateTime<Utc>,
) -> Result<String, RenderError> {
    if markup.trim().is_empty() {
        return Err(RenderError::EmptyTemplate);
    }

    let canonical = grammar::canonicalize(markup)?;
    let blocks = fields::format_content_images(
        &submission.content_images,
        submission.source.label(),
        submission.alternating_alignment,
    );
    let values = slot_values(submission, &blocks, now);

    let mut html = grammar::substitute(&canonical, &values)?;
    if !blocks.bottom.is_empty() {
        html.truncate(html.trim_end().len());
        for block in &blocks.bottom {
            html.push_str("\n\n");
            html.push_str(block);
        }
        html.push('\n');
    }

    Ok(html)
}

fn slot_values(
    submission: &ContentSubmission,
    blocks: &ContentImageBlocks,
    now: DateTime<Utc>,
) -> SlotValues {
    let mut values = SlotValues::new();
    values.set(Slot::Title, fields::format_title(&submission.title));
    values.set(Slot::Content, fields::format_body(&submission.body));
    values.set(
        Slot::Tags,
        fields::escape_text(&fields::format_tags(&submission.tags)),
    );
    values.set(
        Slot::FeaturedImage,
        fields::format_featured_image(
            submission.featured_image.as_ref(),
            &submission.title,
            submission.image_alignment,
        ),
    );
    values.set(Slot::ContentImages, blocks.gallery());
    values.set(Slot::ImageAlignment, submission.image_alignment.as_str());
    values.set(
        Slot::ContentImageAlignment,
        submission.content_image_alignment.as_str(),
    );
    values.set(
        Slot::Date,
        submission
            .publish_at
            .unwrap_or(now)
            .format(DATE_FORMAT)
            .to_string(),
    );

    for (index, block) in blocks.inline.iter().take(POSITIONAL_IMAGE_SLOTS).enumerate() {
        if let Some(slot) = Slot::positional(index + 1) {
            values.set(slot, block.as_str());
        }
    }

    values
}

/// The minimal document used when a template cannot be rendered.
pub fn fallback_document(submission: &ContentSubmission) -> String {
    let mut parts = Vec::new();

    if let Some(image) = &submission.featured_image {
        parts.push(format!(
            r#"<img src="{}" alt="{}" class="featured-image"/>"#,
            fields::escape_url(&image.url),
            fields::escape_text(&submission.title),
        ));
    }
    parts.push(format!("<h1>{}</h1>", fields::format_title(&submission.title)));

    let body = fields::format_body(&submission.body);
    if !body.is_empty() {
        parts.push(body);
    }

    parts.push(format!(
        "<p>Tags: {}</p>",
        fields::escape_text(&fields::format_tags(&submission.tags))
    ));

    parts.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Alignment, ContentImage, FeaturedImage};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 17, 9, 30, 0).unwrap()
    }

    fn has_residual_placeholders(html: &str) -> bool {
        let brace = html.match_indices('{').any(|(start, _)| {
            let rest = &html[start + 1..];
            rest.find('}').is_some_and(|end| {
                let name = &rest[..end];
                !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
            })
        });
        brace || !grammar::placeholder_names(html).is_empty()
    }

    fn cafe_submission() -> ContentSubmission {
        ContentSubmission::new("Café & Co", "Para one.\n\nPara two.")
            .with_tags("travel, food")
            .with_featured_image(FeaturedImage::from_url("http://img/a.jpg"))
            .with_content_images(vec![
                ContentImage::new("http://img/b.jpg", Alignment::Bottom),
                ContentImage::new("http://img/c.jpg", Alignment::Left),
            ])
    }

    #[test]
    fn test_default_template_end_to_end() {
        let post = render_post(&Template::builtin(), &cafe_submission(), now());
        let html = &post.html;

        assert!(html.contains("<h1>Café &amp; Co</h1>"));
        assert!(html.contains("<p>Para one.</p>"));
        assert!(html.contains("<p>Para two.</p>"));
        assert!(html.contains("<strong>Tags:</strong> travel, food"));
        assert_eq!(post.tags_rendered, "travel, food");

        let c = html.find("http://img/c.jpg").unwrap();
        let b = html.find("http://img/b.jpg").unwrap();
        assert!(c < b);
        let note = html.find("generated automatically").unwrap();
        assert!(b > note, "bottom image belongs after the whole document");
        assert!(!has_residual_placeholders(html));
    }

    #[test]
    fn test_body_renders_one_block_per_paragraph() {
        let template = Template::new("body-only", "{content}");
        let post = render_post(&template, &cafe_submission(), now());
        assert_eq!(post.html.matches("<!-- wp:paragraph -->").count(), 2);
    }

    #[test]
    fn test_annotation_json_survives_rendering() {
        let markup = "<!-- wp:image {\"align\":\"left\"} -->\n{featured_image}\n<!-- /wp:image -->\n<!-- wp:group {\"layout\":{\"type\":\"constrained\"}} -->@title@<!-- /wp:group -->";
        let post = render_post(&Template::new("t", markup), &cafe_submission(), now());

        assert!(post.html.contains("<!-- wp:image {\"align\":\"left\"} -->"));
        assert!(post.html.contains("<!-- wp:group {\"layout\":{\"type\":\"constrained\"}} -->"));
        assert!(post.html.contains("http://img/a.jpg"));
        assert!(!has_residual_placeholders(&post.html));
    }

    #[test]
    fn test_delimiters_inside_annotation_json_are_kept() {
        let annotation =
            r#"<!-- wp:embed {"url":"https://mastodon.social/@alice@fosstodon.org"} -->"#;
        let markup = format!("{annotation}\n<h2>{{title}}</h2>\n<!-- /wp:embed -->");
        let post = render_post(&Template::new("t", markup), &cafe_submission(), now());

        assert!(post.html.starts_with(annotation), "got {}", post.html);
        assert!(post.html.contains("<h2>Café &amp; Co</h2>"));
    }

    #[test]
    fn test_both_grammars_leave_no_placeholders() {
        for markup in [
            "<h1>{title}</h1>{content}{unknown_slot}<p>{tags}</p>{date}{content_image_3}",
            "<h1>@title@</h1>@content@@unknown_slot@<p>@tags@</p>@date@@content_image_3@",
            "<h1>{title}</h1>@content@ {image_alignment} @content_image_alignment@",
        ] {
            let post = render_post(&Template::new("t", markup), &cafe_submission(), now());
            assert!(
                !has_residual_placeholders(&post.html),
                "residual placeholder in {}",
                post.html
            );
        }
    }

    #[test]
    fn test_every_image_rendered_once_with_bottoms_last() {
        let submission = ContentSubmission::new("T", "")
            .with_content_images(vec![
                ContentImage::new("http://x/1.jpg", Alignment::Bottom),
                ContentImage::new("http://x/2.jpg", Alignment::None),
                ContentImage::new("http://x/3.jpg", Alignment::Bottom),
                ContentImage::new("http://x/4.jpg", Alignment::Right),
            ]);
        let html = render_post(&Template::builtin(), &submission, now()).html;

        assert_eq!(html.matches(r#"class="content-image""#).count(), 4);
        for n in 1..=4 {
            assert_eq!(html.matches(&format!("http://x/{n}.jpg")).count(), 1);
        }
        let last_inline = html.find("http://x/4.jpg").unwrap();
        assert!(html.find("http://x/1.jpg").unwrap() > last_inline);
        assert!(html.find("http://x/3.jpg").unwrap() > html.find("http://x/1.jpg").unwrap());
    }

    #[test]
    fn test_positional_slots() {
        let images = (1..=5)
            .map(|n| ContentImage::new(format!("http://x/{n}.jpg"), Alignment::None))
            .collect();
        let submission = ContentSubmission::new("T", "").with_content_images(images);
        let markup = "A:@content_image_1@|B:@content_image_3@|G:@content_images@";
        let html = render_post(&Template::new("t", markup), &submission, now()).html;

        let gallery = &html[html.find("|G:").unwrap()..];
        for n in 1..=5 {
            assert!(gallery.contains(&format!("http://x/{n}.jpg")));
        }
        let head = &html[..html.find("|G:").unwrap()];
        assert!(head.contains("http://x/1.jpg"));
        assert!(head.contains("http://x/3.jpg"));
        assert!(!head.contains("http://x/2.jpg"));
    }

    #[test]
    fn test_scalar_slots() {
        let mut submission = cafe_submission();
        submission.image_alignment = Alignment::Wide;
        submission.content_image_alignment = Alignment::Right;
        let html = render_post(
            &Template::new("t", "@image_alignment@/@content_image_alignment@/@date@"),
            &submission,
            now(),
        )
        .html;
        assert_eq!(html.lines().next(), Some("wide/right/2026-05-17"));
    }

    #[test]
    fn test_no_images_still_renders() {
        let submission = ContentSubmission::new("Plain", "Just text.");
        let html = render_post(&Template::builtin(), &submission, now()).html;

        assert!(!html.is_empty());
        assert!(html.contains("<h1>Plain</h1>"));
        assert!(!html.contains("<img"));
        assert!(!has_residual_placeholders(&html));
    }

    #[test]
    fn test_unterminated_annotation_uses_fallback() {
        let template = Template::new("broken", "<!-- wp:paragraph {\"x\":1}\n{title}");
        let post = render_post(&template, &cafe_submission(), now());

        assert_eq!(
            post.html,
            "<img src=\"http://img/a.jpg\" alt=\"Café &amp; Co\" class=\"featured-image\"/>\n\n\
             <h1>Café &amp; Co</h1>\n\n\
             <!-- wp:paragraph -->\n<p>Para one.</p>\n<!-- /wp:paragraph -->\n\n\
             <!-- wp:paragraph -->\n<p>Para two.</p>\n<!-- /wp:paragraph -->\n\n\
             <p>Tags: travel, food</p>"
        );
        assert_eq!(post.tags_rendered, "travel, food");
    }

    #[test]
    fn test_blank_template_uses_fallback() {
        let submission = ContentSubmission::new("<T>", "");
        let post = render_post(&Template::new("blank", "  \n"), &submission, now());
        assert_eq!(post.html, "<h1>&lt;T&gt;</h1>\n\n<p>Tags: </p>");
    }
}
