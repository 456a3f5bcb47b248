use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Key of the built-in template. Always resolvable.
pub const DEFAULT_TEMPLATE_NAME: &str = "default";

/// Markup of the built-in template, in canonical `@slot@` form.
pub const DEFAULT_TEMPLATE_MARKUP: &str = r#"<!-- wp:image {"className":"featured-image"} -->
@featured_image@
<!-- /wp:image -->

<!-- wp:heading {"level":1} -->
<h1>@title@</h1>
<!-- /wp:heading -->

@content@

<!-- wp:gallery {"columns":2,"linkTo":"none","className":"content-images"} -->
<figure class="wp-block-gallery has-nested-images columns-2 is-cropped content-images">
@content_images@
</figure>
<!-- /wp:gallery -->

<!-- wp:separator -->
<hr class="wp-block-separator has-alpha-channel-opacity"/>
<!-- /wp:separator -->

<!-- wp:heading {"level":3} -->
<h3>Post details</h3>
<!-- /wp:heading -->

<!-- wp:paragraph -->
<p><strong>Tags:</strong> @tags@</p>
<!-- /wp:paragraph -->

<!-- wp:separator -->
<hr class="wp-block-separator has-alpha-channel-opacity"/>
<!-- /wp:separator -->

<!-- wp:paragraph -->
<p><em>Note: this post was generated automatically.</em></p>
<!-- /wp:paragraph -->
"#;

/// A named piece of block markup with placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Template {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            created_at: Utc::now(),
        }
    }

    /// A fresh copy of the built-in template.
    pub fn builtin() -> Self {
        Self::new(DEFAULT_TEMPLATE_NAME, DEFAULT_TEMPLATE_MARKUP)
    }

    pub fn is_default(&self) -> bool {
        self.name == DEFAULT_TEMPLATE_NAME
    }
}

/// Templates keyed by name.
pub type TemplateMap = BTreeMap<String, Template>;
