//! Google credentials: API keys and service-account bearer tokens.

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::error::AuthError;

const CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";
const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const TOKEN_LIFETIME_SECS: i64 = 3600;
const REFRESH_MARGIN_SECS: i64 = 60;

/// Service account key file as downloaded from the Google Cloud console
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl ServiceAccountKey {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, AuthError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| AuthError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(REFRESH_MARGIN_SECS) < self.expires_at
    }
}

/// Exchanges a signed service-account assertion for bearer tokens
#[derive(Debug)]
pub struct ServiceAccountTokenProvider {
    client: Client,
    key: ServiceAccountKey,
    cached: RwLock<Option<CachedToken>>,
}

impl ServiceAccountTokenProvider {
    pub fn new(client: Client, key: ServiceAccountKey) -> Self {
        info!("Using service account credentials for {}", key.client_email);
        Self {
            client,
            key,
            cached: RwLock::new(None),
        }
    }

    pub async fn access_token(&self) -> Result<String, AuthError> {
        let now = Utc::now();
        if let Some(token) = self.cached.read().await.as_ref() {
            if token.is_fresh(now) {
                return Ok(token.value.clone());
            }
        }

        let mut cached = self.cached.write().await;
        if let Some(token) = cached.as_ref() {
            if token.is_fresh(now) {
                return Ok(token.value.clone());
            }
        }

        let token = self.fetch_token(now).await?;
        let value = token.value.clone();
        *cached = Some(token);
        Ok(value)
    }

    fn sign_assertion(&self, now: DateTime<Utc>) -> Result<String, AuthError> {
        let iat = now.timestamp();
        let claims = Claims {
            iss: &self.key.client_email,
            scope: CLOUD_PLATFORM_SCOPE,
            aud: &self.key.token_uri,
            iat,
            exp: iat + TOKEN_LIFETIME_SECS,
        };
        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.key.private_key_id.clone();
        let key = EncodingKey::from_rsa_pem(self.key.private_key.as_bytes())?;
        Ok(jsonwebtoken::encode(&header, &claims, &key)?)
    }

    async fn fetch_token(&self, now: DateTime<Utc>) -> Result<CachedToken, AuthError> {
        let assertion = self.sign_assertion(now)?;
        debug!("Requesting access token from {}", self.key.token_uri);

        let response = self
            .client
            .post(&self.key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AuthError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let token: TokenResponse = response.json().await?;
        let lifetime = token.expires_in.unwrap_or(TOKEN_LIFETIME_SECS);
        Ok(CachedToken {
            value: token.access_token,
            expires_at: now + Duration::seconds(lifetime),
        })
    }
}

/// Credentials attached to every outbound Google API call
#[derive(Debug, Clone)]
pub enum Credentials {
    ApiKey(String),
    ServiceAccount(Arc<ServiceAccountTokenProvider>),
    /// Keyless access, only valid for the public translate endpoint
    Anonymous,
}

impl Credentials {
    pub fn service_account(client: Client, key: ServiceAccountKey) -> Self {
        Credentials::ServiceAccount(Arc::new(ServiceAccountTokenProvider::new(client, key)))
    }

    pub async fn authorize(&self, request: RequestBuilder) -> Result<RequestBuilder, AuthError> {
        match self {
            Credentials::ApiKey(key) => Ok(request.query(&[("key", key)])),
            Credentials::ServiceAccount(provider) => {
                let token = provider.access_token().await?;
                Ok(request.bearer_auth(token))
            }
            Credentials::Anonymous => Ok(request),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Credentials::ApiKey(_) => "api_key",
            Credentials::ServiceAccount(_) => "service_account",
            Credentials::Anonymous => "anonymous",
        }
    }
}
