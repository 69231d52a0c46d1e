use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::models::{TranslationRequest, TranslationResponse};
use crate::state::AppState;

/// `POST /translate`
///
/// Logical failures answer with a fixed message; the status is `200 OK`
/// unless `server.map_failure_status` is set.
pub async fn translate(
    State(state): State<AppState>,
    Json(request): Json<TranslationRequest>,
) -> (StatusCode, Json<TranslationResponse>) {
    let request_id = Uuid::new_v4();
    let span = info_span!("translate", %request_id, language = %request.language);

    async move {
        info!(
            "Received translation request ({} base64 bytes)",
            request.base64_image.len()
        );

        match state
            .pipeline
            .run(&request.base64_image, &request.language)
            .await
        {
            Ok(output) => {
                info!(
                    "Translated {} characters into {}",
                    output.text.len(),
                    output.language
                );
                (StatusCode::OK, Json(output.into()))
            }
            Err(err) => {
                let stage = err.stage();
                warn!(?stage, "Translation request failed: {}", err);
                let status = if state.config.server.map_failure_status {
                    stage.status_code()
                } else {
                    StatusCode::OK
                };
                (status, Json(TranslationResponse::failure(stage)))
            }
        }
    }
    .instrument(span)
    .await
}

pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "ocr_backend": state.pipeline.extractor_name(),
        "translation_backend": state.pipeline.translator_name(),
    }))
}

pub async fn list_languages(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "languages": state.pipeline.languages().languages(),
    }))
}
