use thiserror::Error;

/// Errors that can occur while fetching, storing or serving recipes
#[derive(Error, Debug)]
pub enum RecipeError {
    /// Failed to reach the document or token endpoint
    #[error("Failed to fetch: {0}")]
    FetchError(#[from] reqwest::Error),

    /// The Docs API answered with a non-success status
    #[error("Document request failed ({status}): {body}")]
    DocumentError { status: u16, body: String },

    /// Service account token exchange failed
    #[error("Authentication failed: {0}")]
    AuthError(String),

    /// No service account key or access token was configured
    #[error("No Google credentials configured (set GOOGLE_SERVICE_ACCOUNT)")]
    MissingCredentials,

    /// Failed to sign the service account assertion
    #[error("JWT error: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),

    /// Builder configuration error
    #[error("Builder error: {0}")]
    BuilderError(String),

    /// Failed to read or write a JSON file
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Filesystem error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}
