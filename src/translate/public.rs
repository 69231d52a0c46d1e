use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use super::interface::Translator;
use crate::error::TranslationError;

pub const DEFAULT_PUBLIC_ENDPOINT: &str = "https://translate.googleapis.com";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Keyless Google Translate web endpoint (`client=gtx`)
pub struct PublicTranslator {
    client: Client,
    endpoint: String,
}

impl PublicTranslator {
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into().trim_end_matches('/').to_string();
        debug!("Initialized PublicTranslator: endpoint={}", endpoint);
        Self { client, endpoint }
    }
}

/// Concatenate the translated segments found at `[0][*][0]`
fn parse_segments(json: &Value) -> Result<String, TranslationError> {
    let segments = json.get(0).and_then(Value::as_array).ok_or_else(|| {
        TranslationError::Malformed("missing segment array at index 0".to_string())
    })?;

    Ok(segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect())
}

#[async_trait]
impl Translator for PublicTranslator {
    async fn translate(&self, text: &str, target_code: &str) -> Result<String, TranslationError> {
        let url = format!("{}/translate_a/single", self.endpoint);
        let response = self
            .client
            .post(&url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", target_code),
                ("dt", "t"),
            ])
            .form(&[("q", text)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!("Public translate endpoint returned {}: {}", status, message);
            return Err(TranslationError::Backend {
                status: status.as_u16(),
                message,
            });
        }

        let json: Value = response.json().await?;
        parse_segments(&json)
    }

    fn name(&self) -> &'static str {
        "google_public"
    }
}
