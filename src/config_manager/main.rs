use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config_manager::backends::{CredentialsConfig, TranslationConfig, VisionConfig};
use crate::config_manager::system::ServerConfig;
use crate::config_manager::utils::read_config_text;

/// Prefix of environment overrides, e.g. `POLYGLOT__SERVER__PORT=9000`
pub const ENV_PREFIX: &str = "POLYGLOT";
const ENV_SEPARATOR: &str = "__";

/// Files tried, in order, when `CONFIG_PATH` is not set
pub const DEFAULT_CONFIG_FILES: &[&str] = &["conf.yaml", "conf.yml", "conf.json"];

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub credentials: CredentialsConfig,
    pub vision: VisionConfig,
    pub translation: TranslationConfig,
}

impl Config {
    /// Load a YAML or JSON file, then apply environment overrides
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = read_config_text(path)?;
        let config = Self::parse(&content, path)?;
        config.with_env_overrides(std::env::vars())
    }

    /// Locate the configuration file: `CONFIG_PATH`, then the default file
    /// names in the working directory. Falls back to defaults plus
    /// environment overrides when nothing is found.
    pub fn discover() -> Result<(Self, Option<PathBuf>)> {
        if let Ok(path) = std::env::var("CONFIG_PATH") {
            let config = Self::load(&path)
                .with_context(|| format!("Failed to load CONFIG_PATH={}", path))?;
            return Ok((config, Some(PathBuf::from(path))));
        }

        for candidate in DEFAULT_CONFIG_FILES {
            let path = PathBuf::from(candidate);
            if path.exists() {
                let config = Self::load(&path)
                    .with_context(|| format!("Failed to load {}", path.display()))?;
                return Ok((config, Some(path)));
            }
            debug!("No configuration at {}", path.display());
        }

        let config = Self::default().with_env_overrides(std::env::vars())?;
        Ok((config, None))
    }

    fn parse(content: &str, path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        let config: Config = if extension == "json" {
            serde_json::from_str(content)
                .with_context(|| format!("Invalid JSON configuration: {}", path.display()))?
        } else {
            serde_yaml::from_str(content)
                .with_context(|| format!("Invalid YAML configuration: {}", path.display()))?
        };
        Ok(config)
    }

    /// Layer `POLYGLOT__SECTION__KEY` variables over this configuration
    pub fn with_env_overrides<I>(self, vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let prefix = format!("{}{}", ENV_PREFIX, ENV_SEPARATOR);
        let overrides: config::Map<String, String> = vars
            .into_iter()
            .filter(|(key, _)| key.starts_with(&prefix))
            .collect();

        let layered = config::Config::builder()
            .add_source(config::Config::try_from(&self)?)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true)
                    .source(Some(overrides)),
            )
            .build()
            .context("Failed to apply environment overrides")?;

        Ok(layered.try_deserialize()?)
    }

    /// Reject configurations that cannot serve requests
    pub fn validate(&self) -> Result<()> {
        self.server
            .socket_addr()
            .map_err(|e| anyhow::anyhow!("Invalid server address: {}", e))?;

        if !self.credentials.is_configured() {
            anyhow::bail!(
                "Text detection needs credentials: set credentials.path to a service account key \
                 file or credentials.api_key"
            );
        }
        if self.vision.timeout_secs == 0 || self.translation.timeout_secs == 0 {
            anyhow::bail!("Backend timeouts must be at least one second");
        }
        if self.server.max_body_bytes == 0 {
            anyhow::bail!("server.max_body_bytes must be positive");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config_manager::backends::TranslationBackend;
    use crate::config_manager::utils::substitute_env_vars;
    use crate::state::build_credentials;
    use std::io::Write;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_fill_missing_sections() {
        let config = Config::parse("server:\n  port: 9100\n", Path::new("conf.yaml")).unwrap();
        assert_eq!(config.server.port, 9100);
        assert!(!config.server.map_failure_status);
        assert_eq!(config.vision.timeout_secs, 30);
        assert_eq!(config.translation.backend, TranslationBackend::Cloud);
        assert_eq!(config.translation.timeout_secs, 15);
    }

    #[test]
    fn json_files_are_parsed_as_json() {
        let config = Config::parse(
            r#"{"translation": {"backend": "public"}, "credentials": {"api_key": "k"}}"#,
            Path::new("conf.json"),
        )
        .unwrap();
        assert_eq!(config.translation.backend, TranslationBackend::Public);
        assert_eq!(config.credentials.api_key.as_deref(), Some("k"));
    }

    #[test]
    fn env_overrides_replace_file_values() {
        let config = Config::default()
            .with_env_overrides(vars(&[
                ("POLYGLOT__SERVER__PORT", "9200"),
                ("POLYGLOT__SERVER__MAP_FAILURE_STATUS", "true"),
                ("POLYGLOT__TRANSLATION__BACKEND", "public"),
                ("UNRELATED", "ignored"),
            ]))
            .unwrap();
        assert_eq!(config.server.port, 9200);
        assert!(config.server.map_failure_status);
        assert_eq!(config.translation.backend, TranslationBackend::Public);
        assert_eq!(config.vision.timeout_secs, 30);
    }

    #[test]
    fn validate_requires_credentials() {
        let mut config = Config::default();
        assert!(config.validate().is_err());

        config.credentials.api_key = Some("key".into());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn unset_credential_placeholder_falls_back_to_api_key() {
        let text = substitute_env_vars(
            "credentials:\n  path: ${UNSET_CREDENTIALS_FILE}\n  api_key: abc\n",
            |_| None,
        );
        let config = Config::parse(&text, Path::new("conf.yaml")).unwrap();
        assert!(config.credentials.path.is_none());
        assert!(config.validate().is_ok());

        let credentials = build_credentials(&config.credentials, reqwest::Client::new()).unwrap();
        assert_eq!(credentials.kind(), "api_key");
    }

    #[test]
    fn unset_placeholder_alone_is_not_a_credential() {
        let text =
            substitute_env_vars("credentials:\n  path: ${UNSET_CREDENTIALS_FILE}\n", |_| None);
        let config = Config::parse(&text, Path::new("conf.yaml")).unwrap();
        assert!(!config.credentials.is_configured());
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_host() {
        let mut config = Config::default();
        config.credentials.api_key = Some("key".into());
        config.server.host = "not an ip".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_reads_yaml_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        write!(
            file,
            "credentials:\n  path: /secrets/sa.json\nvision:\n  timeout_secs: 5\n"
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.credentials.path.as_deref(), Some("/secrets/sa.json"));
        assert_eq!(config.vision.timeout_secs, 5);
    }
}
