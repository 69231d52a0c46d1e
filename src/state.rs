use std::sync::Arc;

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::info;

use crate::auth::{Credentials, ServiceAccountKey};
use crate::config_manager::{Config, CredentialsConfig};
use crate::language::LanguageTable;
use crate::ocr::GoogleVisionExtractor;
use crate::pipeline::TranslationPipeline;
use crate::translate::TranslatorFactory;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub pipeline: TranslationPipeline,
}

impl AppState {
    /// Build the backend clients described by `config`
    pub fn new(config: Config) -> Result<Self> {
        let vision_client = Client::builder()
            .timeout(config.vision.timeout())
            .build()
            .context("Failed to create text detection HTTP client")?;

        let credentials = build_credentials(&config.credentials, vision_client.clone())?;
        let extractor = Arc::new(GoogleVisionExtractor::new(
            vision_client,
            config.vision.endpoint.clone(),
            credentials.clone(),
        ));
        let translator = TranslatorFactory::create_translator(&config.translation, credentials)?;

        let languages = Arc::new(LanguageTable::builtin());
        info!("Loaded {} supported languages", languages.len());

        let pipeline = TranslationPipeline::new(extractor, translator, languages);
        Ok(Self::with_pipeline(config, pipeline))
    }

    pub fn with_pipeline(config: Config, pipeline: TranslationPipeline) -> Self {
        Self {
            config: Arc::new(config),
            pipeline,
        }
    }
}

/// Service account key file takes precedence over an API key
pub fn build_credentials(config: &CredentialsConfig, client: Client) -> Result<Credentials> {
    if let Some(path) = config.path.as_deref().filter(|p| !p.trim().is_empty()) {
        let key = ServiceAccountKey::from_file(path)
            .with_context(|| format!("Failed to load service account key from {}", path))?;
        return Ok(Credentials::service_account(client, key));
    }

    if let Some(api_key) = config.api_key.as_deref().filter(|k| !k.trim().is_empty()) {
        info!("Using API key credentials");
        return Ok(Credentials::ApiKey(api_key.trim().to_string()));
    }

    Ok(Credentials::Anonymous)
}
