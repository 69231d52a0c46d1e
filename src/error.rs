use axum::http::StatusCode;
use thiserror::Error;

/// Failure turning a base64 payload into a raster image
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("image payload is empty")]
    Empty,

    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error("image bytes could not be decoded: {0}")]
    Image(#[from] image::ImageError),

    #[error("image decoding task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Failure obtaining credentials for a Google backend
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("failed to read credentials file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("credentials file is not a valid service account key: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to sign token assertion: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("token request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("token endpoint rejected the assertion ({status}): {message}")]
    Rejected { status: u16, message: String },
}

/// Failure reported by the text extraction client
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("failed to encode image for upload: {0}")]
    Encode(#[source] image::ImageError),

    #[error("image encoding task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("credentials unavailable: {0}")]
    Auth(#[from] AuthError),

    #[error("text detection request timed out")]
    Timeout,

    #[error("text detection request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("text detection backend returned {status}: {message}")]
    Backend { status: u16, message: String },

    #[error("malformed text detection response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for ExtractionError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ExtractionError::Timeout
        } else if err.is_decode() {
            ExtractionError::Malformed(err.to_string())
        } else {
            ExtractionError::Request(err)
        }
    }
}

/// Failure reported by a translation client
#[derive(Debug, Error)]
pub enum TranslationError {
    #[error("credentials unavailable: {0}")]
    Auth(#[from] AuthError),

    #[error("translation request timed out")]
    Timeout,

    #[error("translation request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("translation backend returned {status}: {message}")]
    Backend { status: u16, message: String },

    #[error("malformed translation response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for TranslationError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TranslationError::Timeout
        } else if err.is_decode() {
            TranslationError::Malformed(err.to_string())
        } else {
            TranslationError::Request(err)
        }
    }
}

/// Terminal failure of the request pipeline
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error("no text detected in image")]
    NoText,

    #[error("language not supported: {0}")]
    LanguageNotSupported(String),

    #[error(transparent)]
    Translation(#[from] TranslationError),

    #[error("translation backend returned empty text")]
    EmptyTranslation,
}

impl PipelineError {
    pub fn stage(&self) -> FailureStage {
        match self {
            PipelineError::Decode(_) | PipelineError::Extraction(_) | PipelineError::NoText => {
                FailureStage::Extraction
            }
            PipelineError::LanguageNotSupported(_) => FailureStage::Language,
            PipelineError::Translation(_) | PipelineError::EmptyTranslation => {
                FailureStage::Translation
            }
        }
    }
}

/// Which stage of the pipeline failed; determines the user-facing message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureStage {
    Extraction,
    Language,
    Translation,
}

impl FailureStage {
    pub fn user_message(self) -> &'static str {
        match self {
            FailureStage::Extraction => "Error: Text extraction failed.",
            FailureStage::Language => "Error: Language not supported.",
            FailureStage::Translation => "Error: Translation failed.",
        }
    }

    /// Status used when failures are mapped away from `200 OK`
    pub fn status_code(self) -> StatusCode {
        match self {
            FailureStage::Extraction => StatusCode::UNPROCESSABLE_ENTITY,
            FailureStage::Language => StatusCode::BAD_REQUEST,
            FailureStage::Translation => StatusCode::BAD_GATEWAY,
        }
    }
}
