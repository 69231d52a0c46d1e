use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ocr::google_vision::DEFAULT_VISION_ENDPOINT;
use crate::translate::cloud::DEFAULT_CLOUD_ENDPOINT;
use crate::translate::public::DEFAULT_PUBLIC_ENDPOINT;

/// Where Google credentials come from
///
/// `path` points at a service account key file; `api_key` is used when no
/// path is set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialsConfig {
    pub path: Option<String>,
    pub api_key: Option<String>,
}

impl CredentialsConfig {
    pub fn is_configured(&self) -> bool {
        self.path.as_deref().is_some_and(|p| !p.trim().is_empty())
            || self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VisionConfig {
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl VisionConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_VISION_ENDPOINT.to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranslationBackend {
    /// Google Cloud Translation v2, needs credentials
    #[default]
    Cloud,
    /// Keyless web endpoint
    Public,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    pub backend: TranslationBackend,

    /// Overrides the backend's default base URL
    pub endpoint: Option<String>,

    pub timeout_secs: u64,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            backend: TranslationBackend::default(),
            endpoint: None,
            timeout_secs: 15,
        }
    }
}

impl TranslationConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn endpoint(&self) -> &str {
        match (&self.endpoint, self.backend) {
            (Some(endpoint), _) => endpoint,
            (None, TranslationBackend::Cloud) => DEFAULT_CLOUD_ENDPOINT,
            (None, TranslationBackend::Public) => DEFAULT_PUBLIC_ENDPOINT,
        }
    }
}
