mod auth;
mod client;
mod document;

pub use auth::{Authenticator, Credentials, ServiceAccountKey};
pub use client::{GoogleDocsClient, DEFAULT_DOCS_BASE_URL};
pub use document::{Document, DocumentLink};

use crate::RecipeError;
use async_trait::async_trait;

/// Anything that can hand out documents by ID
#[async_trait]
pub trait DocumentSource: Send + Sync {
    async fn fetch_document(&self, document_id: &str) -> Result<Document, RecipeError>;

    /// The document flattened to the plain text the parsers read
    async fn fetch_text(&self, document_id: &str) -> Result<String, RecipeError> {
        Ok(self.fetch_document(document_id).await?.to_plain_text())
    }
}
