use std::sync::Arc;

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::info;

use super::cloud::CloudTranslator;
use super::interface::Translator;
use super::public::PublicTranslator;
use crate::auth::Credentials;
use crate::config_manager::{TranslationBackend, TranslationConfig};

/// Factory for creating translation clients
pub struct TranslatorFactory;

impl TranslatorFactory {
    /// Create a translation client based on configuration
    ///
    /// # Arguments
    /// * `config` - Translation section of the application config
    /// * `credentials` - Credentials used by the cloud backend; ignored by the public one
    pub fn create_translator(
        config: &TranslationConfig,
        credentials: Credentials,
    ) -> Result<Arc<dyn Translator>> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .context("Failed to create translation HTTP client")?;

        info!(
            "Initializing translation backend: {:?} at {}",
            config.backend,
            config.endpoint()
        );

        let translator: Arc<dyn Translator> = match config.backend {
            TranslationBackend::Cloud => {
                if matches!(credentials, Credentials::Anonymous) {
                    anyhow::bail!("The cloud translation backend needs credentials");
                }
                Arc::new(CloudTranslator::new(client, config.endpoint(), credentials))
            }
            TranslationBackend::Public => Arc::new(PublicTranslator::new(client, config.endpoint())),
        };

        Ok(translator)
    }
}
