//! Translate interface implemented by each translation backend

use async_trait::async_trait;

use crate::error::TranslationError;

#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` into the language identified by `target_code`
    ///
    /// An empty result is passed through; callers decide whether it is usable.
    async fn translate(&self, text: &str, target_code: &str) -> Result<String, TranslationError>;

    /// Backend name reported by the health endpoint
    fn name(&self) -> &'static str;
}
