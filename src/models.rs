use serde::{Deserialize, Serialize};

use crate::error::FailureStage;
use crate::pipeline::PipelineOutput;

/// Body of `POST /translate`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationRequest {
    pub base64_image: String,
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationResponse {
    pub text: String,
    pub translation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl TranslationResponse {
    pub fn failure(stage: FailureStage) -> Self {
        Self {
            text: String::new(),
            translation: stage.user_message().to_string(),
            language: None,
        }
    }
}

impl From<PipelineOutput> for TranslationResponse {
    fn from(output: PipelineOutput) -> Self {
        Self {
            text: output.text,
            translation: output.translation,
            language: Some(output.language.to_string()),
        }
    }
}
