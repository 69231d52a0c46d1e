use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::interface::Translator;
use crate::auth::Credentials;
use crate::error::TranslationError;

pub const DEFAULT_CLOUD_ENDPOINT: &str = "https://translation.googleapis.com";

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    target: &'a str,
    format: &'static str,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    data: TranslationData,
}

#[derive(Debug, Deserialize)]
struct TranslationData {
    #[serde(default)]
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Translation {
    translated_text: String,
    #[serde(default)]
    detected_source_language: Option<String>,
}

/// Google Cloud Translation (v2 REST) client
pub struct CloudTranslator {
    client: Client,
    endpoint: String,
    credentials: Credentials,
}

impl CloudTranslator {
    pub fn new(client: Client, endpoint: impl Into<String>, credentials: Credentials) -> Self {
        let endpoint = endpoint.into().trim_end_matches('/').to_string();
        debug!(
            "Initialized CloudTranslator: endpoint={}, credentials={}",
            endpoint,
            credentials.kind()
        );
        Self {
            client,
            endpoint,
            credentials,
        }
    }
}

#[async_trait]
impl Translator for CloudTranslator {
    async fn translate(&self, text: &str, target_code: &str) -> Result<String, TranslationError> {
        let url = format!("{}/language/translate/v2", self.endpoint);
        let body = TranslateRequest {
            q: text,
            target: target_code,
            format: "text",
        };

        let request = self.credentials.authorize(self.client.post(&url)).await?;
        let response = request.json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!("Translation API returned {}: {}", status, message);
            return Err(TranslationError::Backend {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: TranslateResponse = response.json().await?;
        if parsed.data.translations.is_empty() {
            return Err(TranslationError::Malformed(
                "no translations in response".to_string(),
            ));
        }

        if let Some(source) = parsed
            .data
            .translations
            .first()
            .and_then(|t| t.detected_source_language.as_deref())
        {
            debug!("Detected source language {} -> {}", source, target_code);
        }

        Ok(parsed
            .data
            .translations
            .into_iter()
            .map(|t| t.translated_text)
            .collect())
    }

    fn name(&self) -> &'static str {
        "google_cloud"
    }
}
