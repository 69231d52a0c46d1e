//! decode -> extract -> resolve language -> translate
//!
//! Each stage either hands its output to the next or ends the run with a
//! [`PipelineError`]. Nothing is retained between runs.

use std::sync::Arc;

use tracing::debug;

use crate::error::{DecodeError, PipelineError};
use crate::image_decoder;
use crate::language::{Language, LanguageTable};
use crate::ocr::TextExtractor;
use crate::translate::Translator;

/// Result of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutput {
    pub text: String,
    pub translation: String,
    pub language: &'static str,
}

#[derive(Clone)]
pub struct TranslationPipeline {
    extractor: Arc<dyn TextExtractor>,
    translator: Arc<dyn Translator>,
    languages: Arc<LanguageTable>,
}

impl TranslationPipeline {
    pub fn new(
        extractor: Arc<dyn TextExtractor>,
        translator: Arc<dyn Translator>,
        languages: Arc<LanguageTable>,
    ) -> Self {
        Self {
            extractor,
            translator,
            languages,
        }
    }

    pub fn extractor_name(&self) -> &'static str {
        self.extractor.name()
    }

    pub fn translator_name(&self) -> &'static str {
        self.translator.name()
    }

    pub fn languages(&self) -> &LanguageTable {
        &self.languages
    }

    pub async fn run(
        &self,
        base64_image: &str,
        language: &str,
    ) -> Result<PipelineOutput, PipelineError> {
        let text = self.extract(base64_image).await?;
        let target = self.resolve(language)?;
        let translation = self.translate(&text, target).await?;

        Ok(PipelineOutput {
            text,
            translation,
            language: target.name,
        })
    }

    async fn extract(&self, base64_image: &str) -> Result<String, PipelineError> {
        let payload = base64_image.to_owned();
        let image = tokio::task::spawn_blocking(move || image_decoder::decode(&payload))
            .await
            .map_err(DecodeError::from)??;
        let text = self.extractor.extract_text(&image).await?;
        if text.trim().is_empty() {
            return Err(PipelineError::NoText);
        }
        debug!("Extraction produced {} characters", text.len());
        Ok(text)
    }

    fn resolve(&self, language: &str) -> Result<&Language, PipelineError> {
        self.languages
            .resolve(language)
            .ok_or_else(|| PipelineError::LanguageNotSupported(language.to_string()))
    }

    async fn translate(&self, text: &str, target: &Language) -> Result<String, PipelineError> {
        let translation = self.translator.translate(text, target.code).await?;
        if translation.trim().is_empty() {
            return Err(PipelineError::EmptyTranslation);
        }
        Ok(translation)
    }
}
