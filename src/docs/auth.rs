use crate::config::AppConfig;
use crate::RecipeError;
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::sync::Mutex;

const SCOPES: &str = "https://www.googleapis.com/auth/documents.readonly https://www.googleapis.com/auth/drive.readonly";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
// Refresh a cached token this long before Google expires it
const EXPIRY_MARGIN_SECS: i64 = 60;

/// The fields we need from a service account key file
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

impl ServiceAccountKey {
    pub async fn from_file(path: &Path) -> Result<Self, RecipeError> {
        let content = tokio::fs::read_to_string(path).await?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// How requests to the Docs API are authorised
#[derive(Debug, Clone)]
pub enum Credentials {
    /// Exchange a signed JWT for an access token
    ServiceAccount(ServiceAccountKey),
    /// Use a token obtained elsewhere as-is
    AccessToken(String),
}

impl Credentials {
    /// Resolve credentials from configuration.
    ///
    /// A configured access token wins over the service account key file.
    pub async fn from_config(config: &AppConfig) -> Result<Self, RecipeError> {
        if let Some(token) = config
            .google
            .access_token
            .as_ref()
            .filter(|t| !t.trim().is_empty())
        {
            return Ok(Credentials::AccessToken(token.clone()));
        }

        let path = config
            .service_account_file()
            .ok_or(RecipeError::MissingCredentials)?;
        debug!("Loading service account key from {}", path.display());
        Ok(Credentials::ServiceAccount(
            ServiceAccountKey::from_file(&path).await?,
        ))
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
    #[serde(default = "default_expires_in")]
    expires_in: i64,
}

fn default_expires_in() -> i64 {
    ASSERTION_LIFETIME_SECS
}

struct CachedToken {
    token: String,
    expires_at: i64,
}

/// Hands out access tokens, caching service account tokens until near expiry
pub struct Authenticator {
    client: Client,
    credentials: Credentials,
    cached: Mutex<Option<CachedToken>>,
}

impl Authenticator {
    pub fn new(client: Client, credentials: Credentials) -> Self {
        Self {
            client,
            credentials,
            cached: Mutex::new(None),
        }
    }

    pub async fn access_token(&self) -> Result<String, RecipeError> {
        let key = match &self.credentials {
            Credentials::AccessToken(token) => return Ok(token.clone()),
            Credentials::ServiceAccount(key) => key,
        };

        let mut cached = self.cached.lock().await;
        let now = Utc::now().timestamp();
        if let Some(token) = cached.as_ref().filter(|t| t.expires_at - EXPIRY_MARGIN_SECS > now) {
            return Ok(token.token.clone());
        }

        let response = self.exchange(key, now).await?;
        let token = response.access_token.clone();
        *cached = Some(CachedToken {
            token: response.access_token,
            expires_at: now + response.expires_in,
        });
        Ok(token)
    }

    async fn exchange(&self, key: &ServiceAccountKey, now: i64) -> Result<TokenResponse, RecipeError> {
        let assertion = sign_assertion(key, now)?;

        debug!("Requesting access token for {}", key.client_email);
        let response = self
            .client
            .post(&key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            return Err(RecipeError::AuthError(format!(
                "token endpoint returned {}: {}",
                status, error_text
            )));
        }

        Ok(response.json().await?)
    }
}

fn sign_assertion(key: &ServiceAccountKey, now: i64) -> Result<String, RecipeError> {
    let claims = Claims {
        iss: &key.client_email,
        scope: SCOPES,
        aud: &key.token_uri,
        iat: now,
        exp: now + ASSERTION_LIFETIME_SECS,
    };
    let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())?;
    Ok(encode(&Header::new(Algorithm::RS256), &claims, &encoding_key)?)
}
