//! Template persistence port.

use async_trait::async_trait;

use crate::domain::{DEFAULT_TEMPLATE_NAME, Template, TemplateMap};

/// Durable mapping from template name to template.
///
/// Reads never fail: a store that cannot be read answers with the built-in
/// default template.
#[async_trait]
pub trait TemplateStore: Send + Sync {
    /// All templates, always including `default`.
    async fn list(&self) -> TemplateMap;

    /// Insert or replace the template called `name`.
    async fn save(&self, name: &str, content: &str) -> Result<Template, StoreError>;

    /// The template called `name`, or `default` when there is none.
    async fn get(&self, name: &str) -> Template {
        let mut templates = self.list().await;
        if let Some(template) = templates.remove(name) {
            return template;
        }
        tracing::debug!(requested = %name, "Template not found, using default");
        templates
            .remove(DEFAULT_TEMPLATE_NAME)
            .unwrap_or_else(Template::builtin)
    }
}

/// Template store errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Invalid template: {0}")]
    Validation(String),

    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}
