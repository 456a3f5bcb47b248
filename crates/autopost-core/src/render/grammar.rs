//! Placeholder grammar of block-markup templates.
//!
//! Templates name their slots either as `{name}` (older templates) or as
//! `@name@` (canonical). Block annotation comments carry JSON attributes,
//! e.g. `<!-- wp:image {"align":"left"} -->`, whose braces are not
//! placeholders. Canonicalization therefore runs in two passes: the first
//! records the byte range of every annotation comment, the second rewrites
//! brace placeholders only between those ranges.

use std::ops::Range;

use crate::error::RenderError;

use super::SlotValues;

/// Delimiter of canonical placeholders.
pub const DELIMITER: char = '@';

const ANNOTATION_OPENERS: [&str; 2] = ["<!-- wp:", "<!-- /wp:"];
const COMMENT_OPEN: &str = "<!--";
const COMMENT_CLOSE: &str = "-->";

/// Byte ranges of all block annotation comments, in document order.
///
/// Each range runs from the opening `<!-- wp:` (or `<!-- /wp:`) through the
/// first `-->` after it.
pub fn annotation_spans(markup: &str) -> Result<Vec<Range<usize>>, RenderError> {
    let mut spans = Vec::new();
    let mut cursor = 0;

    while let Some(start) = next_annotation(markup, cursor) {
        let body = start + COMMENT_OPEN.len();
        let end = markup[body..]
            .find(COMMENT_CLOSE)
            .map(|pos| body + pos + COMMENT_CLOSE.len())
            .ok_or(RenderError::UnterminatedAnnotation { offset: start })?;
        spans.push(start..end);
        cursor = end;
    }

    Ok(spans)
}

fn next_annotation(markup: &str, from: usize) -> Option<usize> {
    ANNOTATION_OPENERS
        .iter()
        .filter_map(|opener| markup[from..].find(opener))
        .min()
        .map(|pos| from + pos)
}

/// Rewrite `{name}` placeholders to `@name@`, leaving annotation comments
/// byte-for-byte intact.
///
/// Idempotent: canonical markup comes back unchanged.
pub fn canonicalize(markup: &str) -> Result<String, RenderError> {
    let spans = annotation_spans(markup)?;
    let mut out = String::with_capacity(markup.len());
    let mut cursor = 0;

    for span in spans {
        rewrite_braces(&markup[cursor..span.start], &mut out);
        out.push_str(&markup[span.clone()]);
        cursor = span.end;
    }
    rewrite_braces(&markup[cursor..], &mut out);

    Ok(out)
}

fn rewrite_braces(text: &str, out: &mut String) {
    let mut rest = text;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) if is_identifier(&after[..close]) => {
                out.push(DELIMITER);
                out.push_str(&after[..close]);
                out.push(DELIMITER);
                rest = &after[close + 1..];
            }
            _ => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
}

/// Replace every `@name@` in canonical markup with its slot value.
///
/// Annotation comments are copied through untouched. Unknown or unset names
/// are dropped. Values are copied verbatim and never scanned for
/// placeholders themselves.
pub fn substitute(canonical: &str, values: &SlotValues) -> Result<String, RenderError> {
    let spans = annotation_spans(canonical)?;
    let mut out = String::with_capacity(canonical.len() * 2);
    let mut cursor = 0;

    for span in spans {
        substitute_text(&canonical[cursor..span.start], values, &mut out);
        out.push_str(&canonical[span.clone()]);
        cursor = span.end;
    }
    substitute_text(&canonical[cursor..], values, &mut out);

    Ok(out)
}

fn substitute_text(text: &str, values: &SlotValues, out: &mut String) {
    let mut rest = text;
    while let Some(open) = rest.find(DELIMITER) {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find(DELIMITER) {
            Some(close) if is_identifier(&after[..close]) => {
                let name = &after[..close];
                match values.lookup(name) {
                    Some(value) => out.push_str(value),
                    None => tracing::debug!(placeholder = name, "Dropping unresolved placeholder"),
                }
                rest = &after[close + 1..];
            }
            _ => {
                out.push(DELIMITER);
                rest = after;
            }
        }
    }
    out.push_str(rest);
}

/// Names of all canonical placeholders in `canonical`, in order of appearance.
pub fn placeholder_names(canonical: &str) -> Vec<&str> {
    let mut names = Vec::new();
    let mut rest = canonical;

    while let Some(open) = rest.find(DELIMITER) {
        let after = &rest[open + 1..];
        match after.find(DELIMITER) {
            Some(close) if is_identifier(&after[..close]) => {
                names.push(&after[..close]);
                rest = &after[close + 1..];
            }
            _ => rest = after,
        }
    }

    names
}

fn is_identifier(candidate: &str) -> bool {
    let mut chars = candidate.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Slot;

    fn values() -> SlotValues {
        let mut values = SlotValues::new();
        values.set(Slot::Title, "Hello");
        values.set(Slot::Tags, "a, b");
        values
    }

    #[test]
    fn test_annotation_spans() {
        let markup = "x<!-- wp:image {\"align\":\"left\"} -->y<!-- /wp:image -->z";
        let spans = annotation_spans(markup).unwrap();
        assert_eq!(spans.len(), 2);
        assert_eq!(
            &markup[spans[0].clone()],
            "<!-- wp:image {\"align\":\"left\"} -->"
        );
        assert_eq!(&markup[spans[1].clone()], "<!-- /wp:image -->");
    }

    #[test]
    fn test_plain_comments_are_not_annotations() {
        let spans = annotation_spans("<!-- note {title} -->").unwrap();
        assert!(spans.is_empty());
    }

    #[test]
    fn test_unterminated_annotation_is_an_error() {
        let err = annotation_spans("ok\n<!-- wp:paragraph {\"a\":1}").unwrap_err();
        assert_eq!(err, RenderError::UnterminatedAnnotation { offset: 3 });
    }

    #[test]
    fn test_canonicalize_rewrites_braces_outside_annotations() {
        let markup = "<!-- wp:heading {\"level\":1} -->\n<h1>{title}</h1>\n<!-- /wp:heading -->";
        assert_eq!(
            canonicalize(markup).unwrap(),
            "<!-- wp:heading {\"level\":1} -->\n<h1>@title@</h1>\n<!-- /wp:heading -->"
        );
    }

    #[test]
    fn test_canonicalize_keeps_non_identifier_braces() {
        let markup = "<style>p { color: red }</style>{ title } {a-b} {}";
        assert_eq!(canonicalize(markup).unwrap(), markup);
    }

    #[test]
    fn test_canonicalize_is_idempotent() {
        let markup = "<!-- wp:image {\"className\":\"x\"} -->{featured_image}@title@{{tags}}";
        let once = canonicalize(markup).unwrap();
        assert_eq!(canonicalize(&once).unwrap(), once);
        assert_eq!(
            once,
            "<!-- wp:image {\"className\":\"x\"} -->@featured_image@@title@{@tags@}"
        );
    }

    #[test]
    fn test_substitute_known_and_unknown() {
        let out = substitute("<h1>@title@</h1>@nope@<p>@tags@</p>@date@", &values()).unwrap();
        assert_eq!(out, "<h1>Hello</h1><p>a, b</p>");
    }

    #[test]
    fn test_substitute_leaves_lone_delimiters() {
        let out = substitute("mail me: me@example.com or @title@", &values()).unwrap();
        assert_eq!(out, "mail me: me@example.com or Hello");
    }

    #[test]
    fn test_substituted_values_are_not_rescanned() {
        let mut values = SlotValues::new();
        values.set(Slot::Content, "literal @title@ text");
        values.set(Slot::Title, "T");
        assert_eq!(substitute("@content@", &values).unwrap(), "literal @title@ text");
    }

    #[test]
    fn test_substitute_leaves_annotation_json_intact() {
        let annotation = r#"<!-- wp:embed {"url":"https://mastodon.social/@alice@fosstodon.org","title":"@title@"} -->"#;
        let markup = format!("{annotation}\n<p>@title@</p>\n<!-- /wp:embed -->");
        let out = substitute(&markup, &values()).unwrap();
        assert_eq!(out, format!("{annotation}\n<p>Hello</p>\n<!-- /wp:embed -->"));
    }

    #[test]
    fn test_placeholder_names() {
        let names = placeholder_names("@title@ x@y.com @content_image_2@ @ @");
        assert_eq!(names, vec!["title", "content_image_2"]);
    }
}
