use async_trait::async_trait;

/// Keyword translation to English.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translated text, or `text` itself when translation is unavailable.
    async fn translate(&self, text: &str) -> String;
}

/// Translator that returns its input, used when translation is disabled.
pub struct IdentityTranslator;

#[async_trait]
impl Translator for IdentityTranslator {
    async fn translate(&self, text: &str) -> String {
        text.to_string()
    }
}
