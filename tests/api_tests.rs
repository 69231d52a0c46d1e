//! End-to-end tests of the HTTP surface with in-process mock backends.

use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use base64::{engine::general_purpose, Engine};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use serde_json::{json, Value};
use tower::ServiceExt;

use polyglot_ocr::error::{ExtractionError, TranslationError};
use polyglot_ocr::image_decoder::DecodedImage;
use polyglot_ocr::language::LanguageTable;
use polyglot_ocr::ocr::TextExtractor;
use polyglot_ocr::pipeline::TranslationPipeline;
use polyglot_ocr::translate::Translator;
use polyglot_ocr::{build_app, AppState, Config};

struct MockExtractor {
    text: &'static str,
    calls: AtomicUsize,
}

#[async_trait]
impl TextExtractor for MockExtractor {
    async fn extract_text(&self, _image: &DecodedImage) -> Result<String, ExtractionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.text.to_string())
    }

    fn name(&self) -> &'static str {
        "mock_ocr"
    }
}

/// Translates by table lookup; `None` simulates a backend outage
struct MockTranslator {
    reply: Option<&'static str>,
}

#[async_trait]
impl Translator for MockTranslator {
    async fn translate(&self, _text: &str, _target: &str) -> Result<String, TranslationError> {
        self.reply.map(str::to_string).ok_or(TranslationError::Backend {
            status: 503,
            message: "quota exhausted for project polyglot".to_string(),
        })
    }

    fn name(&self) -> &'static str {
        "mock_translate"
    }
}

fn png_base64() -> String {
    let image = RgbImage::from_fn(16, 8, |x, y| {
        if (x + y) % 3 == 0 {
            Rgb([0, 0, 0])
        } else {
            Rgb([255, 255, 255])
        }
    });
    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(image)
        .write_to(&mut buffer, ImageFormat::Png)
        .unwrap();
    general_purpose::STANDARD.encode(buffer.into_inner())
}

fn app_with(
    extracted: &'static str,
    translated: Option<&'static str>,
    config: Config,
) -> (axum::Router, Arc<MockExtractor>) {
    let extractor = Arc::new(MockExtractor {
        text: extracted,
        calls: AtomicUsize::new(0),
    });
    let pipeline = TranslationPipeline::new(
        extractor.clone(),
        Arc::new(MockTranslator { reply: translated }),
        Arc::new(LanguageTable::builtin()),
    );
    (build_app(AppState::with_pipeline(config, pipeline)), extractor)
}

async fn post_translate(app: axum::Router, body: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/translate")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn clear_text_is_extracted_and_translated() {
    let (app, _) = app_with("HELLO", Some("BONJOUR"), Config::default());
    let (status, body) = post_translate(
        app,
        json!({"base64_image": png_base64(), "language": "French"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"text": "HELLO", "translation": "BONJOUR", "language": "French"})
    );
}

#[tokio::test]
async fn malformed_base64_reports_extraction_failure() {
    let (app, extractor) = app_with("HELLO", Some("BONJOUR"), Config::default());
    let (status, body) = post_translate(
        app,
        json!({"base64_image": "this is not base64!", "language": "French"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"text": "", "translation": "Error: Text extraction failed."})
    );
    assert_eq!(extractor.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn unsupported_language_is_reported() {
    let (app, _) = app_with("HELLO", Some("BONJOUR"), Config::default());
    let (_, body) = post_translate(
        app,
        json!({"base64_image": png_base64(), "language": "Klingon"}),
    )
    .await;

    assert_eq!(
        body,
        json!({"text": "", "translation": "Error: Language not supported."})
    );
}

#[tokio::test]
async fn empty_translation_is_a_translation_failure() {
    let (app, _) = app_with("HELLO", Some(""), Config::default());
    let (_, body) = post_translate(
        app,
        json!({"base64_image": png_base64(), "language": "French"}),
    )
    .await;

    assert_eq!(
        body,
        json!({"text": "", "translation": "Error: Translation failed."})
    );
}

#[tokio::test]
async fn backend_detail_never_reaches_the_caller() {
    let (app, _) = app_with("HELLO", None, Config::default());
    let (_, body) = post_translate(
        app,
        json!({"base64_image": png_base64(), "language": "Spanish"}),
    )
    .await;

    assert_eq!(body["translation"], "Error: Translation failed.");
    assert!(!body.to_string().contains("quota"));
}

#[tokio::test]
async fn blank_ocr_output_is_an_extraction_failure() {
    let (app, _) = app_with("   ", Some("x"), Config::default());
    let (_, body) = post_translate(
        app,
        json!({"base64_image": png_base64(), "language": "French"}),
    )
    .await;

    assert_eq!(body["translation"], "Error: Text extraction failed.");
}

#[tokio::test]
async fn failures_map_to_error_statuses_when_enabled() {
    let mut config = Config::default();
    config.server.map_failure_status = true;

    let (app, _) = app_with("HELLO", Some("BONJOUR"), config.clone());
    let (status, _) = post_translate(app, json!({"base64_image": "%%", "language": "French"})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (app, _) = app_with("HELLO", Some("BONJOUR"), config.clone());
    let (status, body) = post_translate(
        app,
        json!({"base64_image": png_base64(), "language": "Klingon"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["translation"], "Error: Language not supported.");

    let (app, _) = app_with("HELLO", None, config.clone());
    let (status, _) = post_translate(
        app,
        json!({"base64_image": png_base64(), "language": "French"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);

    let (app, _) = app_with("HELLO", Some("BONJOUR"), config);
    let (status, _) = post_translate(
        app,
        json!({"base64_image": png_base64(), "language": "French"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn identical_requests_give_identical_responses() {
    let (app, extractor) = app_with("HELLO", Some("HALLO"), Config::default());
    let request = json!({"base64_image": png_base64(), "language": "german"});

    let (_, first) = post_translate(app.clone(), request.clone()).await;
    let (_, second) = post_translate(app, request).await;

    assert_eq!(first, second);
    assert_eq!(first["text"], "HELLO");
    assert_eq!(extractor.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn missing_fields_are_rejected_by_the_extractor() {
    let (app, _) = app_with("HELLO", Some("BONJOUR"), Config::default());
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/translate")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"language": "French"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn oversized_bodies_are_rejected() {
    let mut config = Config::default();
    config.server.max_body_bytes = 64;
    let (app, _) = app_with("HELLO", Some("BONJOUR"), config);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/translate")
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({"base64_image": png_base64(), "language": "French"}).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn health_reports_backends() {
    let (app, _) = app_with("HELLO", Some("BONJOUR"), Config::default());
    let response = app
        .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(
        body,
        json!({"status": "ok", "ocr_backend": "mock_ocr", "translation_backend": "mock_translate"})
    );
}

#[tokio::test]
async fn languages_endpoint_lists_table() {
    let (app, _) = app_with("HELLO", Some("BONJOUR"), Config::default());
    let response = app
        .oneshot(Request::get("/api/languages").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    let languages = body["languages"].as_array().unwrap();
    assert_eq!(languages.len(), LanguageTable::builtin().len());
    assert_eq!(languages[0], json!({"name": "English", "code": "en"}));
    assert!(languages.contains(&json!({"name": "French", "code": "fr"})));
}
