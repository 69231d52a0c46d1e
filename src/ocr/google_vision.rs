use async_trait::async_trait;
use base64::{engine::general_purpose, Engine};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::document::{Level, TextNode, Word};
use super::interface::TextExtractor;
use crate::auth::Credentials;
use crate::error::ExtractionError;
use crate::image_decoder::DecodedImage;

pub const DEFAULT_VISION_ENDPOINT: &str = "https://vision.googleapis.com";
const DOCUMENT_TEXT_DETECTION: &str = "DOCUMENT_TEXT_DETECTION";

#[derive(Debug, Serialize)]
struct AnnotateRequest<'a> {
    requests: [AnnotateImageRequest<'a>; 1],
}

#[derive(Debug, Serialize)]
struct AnnotateImageRequest<'a> {
    image: ImageContent<'a>,
    features: [Feature; 1],
}

#[derive(Debug, Serialize)]
struct ImageContent<'a> {
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct Feature {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct AnnotateResponse {
    #[serde(default)]
    responses: Vec<AnnotateImageResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnnotateImageResponse {
    #[serde(default)]
    full_text_annotation: Option<TextAnnotation>,
    #[serde(default)]
    error: Option<Status>,
}

#[derive(Debug, Deserialize)]
struct Status {
    #[serde(default)]
    code: i32,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Default, Deserialize)]
struct TextAnnotation {
    #[serde(default)]
    pages: Vec<Page>,
}

#[derive(Debug, Deserialize)]
struct Page {
    #[serde(default)]
    blocks: Vec<Block>,
}

#[derive(Debug, Deserialize)]
struct Block {
    #[serde(default)]
    paragraphs: Vec<Paragraph>,
}

#[derive(Debug, Deserialize)]
struct Paragraph {
    #[serde(default)]
    words: Vec<WireWord>,
}

#[derive(Debug, Deserialize)]
struct WireWord {
    #[serde(default)]
    symbols: Vec<Symbol>,
}

#[derive(Debug, Deserialize)]
struct Symbol {
    #[serde(default)]
    text: String,
}

impl TextAnnotation {
    fn into_tree(self) -> TextNode {
        let pages = self
            .pages
            .into_iter()
            .map(|page| {
                let blocks = page
                    .blocks
                    .into_iter()
                    .map(|block| {
                        let paragraphs = block
                            .paragraphs
                            .into_iter()
                            .map(|paragraph| {
                                let words = paragraph
                                    .words
                                    .into_iter()
                                    .map(|word| {
                                        TextNode::Word(Word::new(
                                            word.symbols.into_iter().map(|s| s.text),
                                        ))
                                    })
                                    .collect();
                                TextNode::branch(Level::Paragraph, words)
                            })
                            .collect();
                        TextNode::branch(Level::Block, paragraphs)
                    })
                    .collect();
                TextNode::branch(Level::Page, blocks)
            })
            .collect();
        TextNode::branch(Level::Document, pages)
    }
}

/// Google Cloud Vision document text detection client
pub struct GoogleVisionExtractor {
    client: Client,
    endpoint: String,
    credentials: Credentials,
}

impl GoogleVisionExtractor {
    pub fn new(client: Client, endpoint: impl Into<String>, credentials: Credentials) -> Self {
        let endpoint = endpoint.into().trim_end_matches('/').to_string();
        debug!(
            "Initialized GoogleVisionExtractor: endpoint={}, credentials={}",
            endpoint,
            credentials.kind()
        );
        Self {
            client,
            endpoint,
            credentials,
        }
    }

    async fn annotate(&self, png: &[u8]) -> Result<TextNode, ExtractionError> {
        let content = general_purpose::STANDARD.encode(png);
        let body = AnnotateRequest {
            requests: [AnnotateImageRequest {
                image: ImageContent { content: &content },
                features: [Feature {
                    kind: DOCUMENT_TEXT_DETECTION,
                }],
            }],
        };

        let url = format!("{}/v1/images:annotate", self.endpoint);
        let request = self.credentials.authorize(self.client.post(&url)).await?;
        let response = request.json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!("Vision API returned {}: {}", status, message);
            return Err(ExtractionError::Backend {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: AnnotateResponse = response.json().await?;
        let first = parsed
            .responses
            .into_iter()
            .next()
            .ok_or_else(|| ExtractionError::Malformed("response list is empty".to_string()))?;

        if let Some(error) = first.error {
            warn!("Vision API image error {}: {}", error.code, error.message);
            return Err(ExtractionError::Backend {
                status: status.as_u16(),
                message: error.message,
            });
        }

        Ok(first.full_text_annotation.unwrap_or_default().into_tree())
    }
}

#[async_trait]
impl TextExtractor for GoogleVisionExtractor {
    async fn extract_text(&self, image: &DecodedImage) -> Result<String, ExtractionError> {
        let image = image.clone();
        let png = tokio::task::spawn_blocking(move || image.to_png())
            .await?
            .map_err(ExtractionError::Encode)?;
        let document = self.annotate(&png).await?;
        let text = document.flatten();
        debug!("Extracted {} characters of text", text.len());
        Ok(text)
    }

    fn name(&self) -> &'static str {
        "google_vision"
    }
}
