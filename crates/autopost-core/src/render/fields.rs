//! Formatters for individual slot values. All pure.

use pulldown_cmark_escape::{escape_href, escape_html};

use crate::domain::{Alignment, ContentImage, FeaturedImage, split_tags};

/// Escape text for use in HTML content or a double-quoted attribute.
pub fn escape_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let _ = escape_html(&mut out, raw);
    out
}

/// Escape a URL for use in an `src` or `href` attribute.
pub fn escape_url(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let _ = escape_href(&mut out, raw);
    out
}

pub fn format_title(raw: &str) -> String {
    escape_text(raw)
}

/// Paragraphs of `raw`, split on blank lines, trimmed, empties dropped.
pub fn paragraphs(raw: &str) -> Vec<String> {
    let normalized = raw.replace("\r\n", "\n");
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in normalized.lines() {
        if line.trim().is_empty() {
            flush_paragraph(&mut current, &mut paragraphs);
        } else {
            current.push(line);
        }
    }
    flush_paragraph(&mut current, &mut paragraphs);

    paragraphs
}

fn flush_paragraph(lines: &mut Vec<&str>, paragraphs: &mut Vec<String>) {
    let text = lines.join("\n");
    lines.clear();
    let trimmed = text.trim();
    if !trimmed.is_empty() {
        paragraphs.push(trimmed.to_string());
    }
}

/// Body text as paragraph blocks separated by blank lines.
pub fn format_body(raw: &str) -> String {
    paragraphs(raw)
        .iter()
        .map(|p| format!("<!-- wp:paragraph -->\n<p>{}</p>\n<!-- /wp:paragraph -->", escape_text(p)))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Join tags with ", ", trimming entries and dropping empty ones.
pub fn format_tags<S: AsRef<str>>(tags: &[S]) -> String {
    tags.iter()
        .map(|tag| tag.as_ref().trim())
        .filter(|tag| !tag.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// [`format_tags`] for comma-separated input.
pub fn format_tag_string(raw: &str) -> String {
    format_tags(&split_tags(raw))
}

fn figure_class(alignment: Alignment) -> String {
    match alignment.css_class() {
        Some(class) => format!("wp-block-image {class}"),
        None => "wp-block-image".to_string(),
    }
}

/// The featured image as a figure, or an empty string when there is none.
pub fn format_featured_image(
    image: Option<&FeaturedImage>,
    title: &str,
    alignment: Alignment,
) -> String {
    let Some(image) = image else {
        return String::new();
    };

    let size = match (image.width, image.height) {
        (Some(w), Some(h)) => format!(r#" width="{w}" height="{h}""#),
        _ => String::new(),
    };

    format!(
        r#"<figure class="{}"><img src="{}" alt="{}"{} class="featured-image"/></figure>"#,
        figure_class(alignment),
        escape_url(&image.url),
        escape_text(title),
        size,
    )
}

/// A standalone image block with its annotation comments.
pub fn image_block(url: &str, alt: &str, alignment: Alignment) -> String {
    let attrs = match alignment.block_align() {
        Some(align) => format!(r#" {{"align":"{align}"}}"#),
        None => String::new(),
    };

    format!(
        "<!-- wp:image{attrs} -->\n<figure class=\"{}\"><img src=\"{}\" alt=\"{}\" class=\"content-image\"/></figure>\n<!-- /wp:image -->",
        figure_class(alignment),
        escape_url(url),
        escape_text(alt),
    )
}

/// Content images split by where they end up in the document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentImageBlocks {
    /// Blocks rendered at the template's gallery position, in input order.
    pub inline: Vec<String>,
    /// Blocks appended after the whole document, in input order.
    pub bottom: Vec<String>,
}

impl ContentImageBlocks {
    pub fn gallery(&self) -> String {
        self.inline.join("\n\n")
    }
}

/// Format content images.
///
/// Alt text is `"<label> image <n>"`, where `n` counts inline images from 1.
/// Bottom images keep counting after the last inline one. With `alternating`
/// set, inline images alternate left/right and their own alignment is
/// ignored.
pub fn format_content_images(
    images: &[ContentImage],
    label: &str,
    alternating: bool,
) -> ContentImageBlocks {
    let mut blocks = ContentImageBlocks::default();
    let mut deferred = Vec::new();

    for image in images {
        if image.alignment.is_bottom() {
            deferred.push(image);
            continue;
        }

        let position = blocks.inline.len() + 1;
        let alignment = if alternating {
            if position % 2 == 1 {
                Alignment::Left
            } else {
                Alignment::Right
            }
        } else {
            image.alignment
        };
        let alt = format!("{label} image {position}");
        blocks.inline.push(image_block(&image.url, &alt, alignment));
    }

    for (offset, image) in deferred.into_iter().enumerate() {
        let alt = format!("{label} image {}", blocks.inline.len() + offset + 1);
        blocks
            .bottom
            .push(image_block(&image.url, &alt, Alignment::Bottom));
    }

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_text_and_url() {
        assert_eq!(
            escape_text(r#"Café & "Co" <b>"#),
            "Café &amp; &quot;Co&quot; &lt;b&gt;"
        );
        assert_eq!(escape_url("http://img/a.jpg?w=1&h=2"), "http://img/a.jpg?w=1&amp;h=2");
        assert!(!escape_url(r#"http://x/"><script>"#).contains('"'));
    }

    #[test]
    fn test_body_paragraphs() {
        let body = format_body("First <one>.\r\n\r\n\n  \nSecond\nline.\n\n");
        assert_eq!(
            body,
            "<!-- wp:paragraph -->\n<p>First &lt;one&gt;.</p>\n<!-- /wp:paragraph -->\n\n\
             <!-- wp:paragraph -->\n<p>Second\nline.</p>\n<!-- /wp:paragraph -->"
        );
        assert_eq!(format_body("  \n\n "), "");
    }

    #[test]
    fn test_tags_from_list_and_string() {
        assert_eq!(format_tags(&[" a ", "", "b", "c "]), "a, b, c");
        assert_eq!(format_tag_string("travel,  food ,"), "travel, food");
    }

    #[test]
    fn test_tag_formatting_is_idempotent() {
        let once = format_tag_string("a, b, c");
        assert_eq!(once, "a, b, c");
        assert_eq!(format_tag_string(&once), once);
    }

    #[test]
    fn test_featured_image() {
        assert_eq!(format_featured_image(None, "T", Alignment::Left), "");

        let image = FeaturedImage::from_url("http://img/a.jpg");
        assert_eq!(
            format_featured_image(Some(&image), "A & B", Alignment::None),
            r#"<figure class="wp-block-image"><img src="http://img/a.jpg" alt="A &amp; B" class="featured-image"/></figure>"#
        );

        let sized = FeaturedImage {
            url: "http://img/a.jpg".to_string(),
            width: Some(800),
            height: Some(600),
        };
        let html = format_featured_image(Some(&sized), "T", Alignment::Wide);
        assert!(html.starts_with(r#"<figure class="wp-block-image alignwide">"#));
        assert!(html.contains(r#"width="800" height="600""#));
    }

    #[test]
    fn test_image_block_annotation() {
        let block = image_block("http://x/1.jpg", "Pexels image 1", Alignment::Left);
        assert_eq!(
            block,
            "<!-- wp:image {\"align\":\"left\"} -->\n\
             <figure class=\"wp-block-image alignleft\"><img src=\"http://x/1.jpg\" alt=\"Pexels image 1\" class=\"content-image\"/></figure>\n\
             <!-- /wp:image -->"
        );
        assert!(image_block("u", "a", Alignment::None).starts_with("<!-- wp:image -->\n"));
    }

    #[test]
    fn test_bottom_images_are_deferred() {
        let images = vec![
            ContentImage::new("http://x/b.jpg", Alignment::Bottom),
            ContentImage::new("http://x/c.jpg", Alignment::Left),
            ContentImage::new("http://x/d.jpg", Alignment::Right),
        ];

        let blocks = format_content_images(&images, "Pexels", false);
        assert_eq!(blocks.inline.len(), 2);
        assert_eq!(blocks.bottom.len(), 1);
        assert!(blocks.inline[0].contains("c.jpg"));
        assert!(blocks.inline[0].contains(r#"alt="Pexels image 1""#));
        assert!(blocks.inline[1].contains(r#"alt="Pexels image 2""#));
        assert!(blocks.bottom[0].contains("b.jpg"));
        assert!(blocks.bottom[0].contains(r#"alt="Pexels image 3""#));
        assert!(blocks.bottom[0].contains("aligncenter"));
    }

    #[test]
    fn test_alternating_overrides_inline_alignment_only() {
        let images = vec![
            ContentImage::new("1", Alignment::Full),
            ContentImage::new("b", Alignment::Bottom),
            ContentImage::new("2", Alignment::Full),
            ContentImage::new("3", Alignment::None),
        ];

        let blocks = format_content_images(&images, "Unsplash", true);
        assert!(blocks.inline[0].contains("alignleft"));
        assert!(blocks.inline[1].contains("alignright"));
        assert!(blocks.inline[2].contains("alignleft"));
        assert!(blocks.bottom[0].contains("aligncenter"));
    }
}
