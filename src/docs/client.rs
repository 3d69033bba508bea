use super::auth::{Authenticator, Credentials};
use super::document::Document;
use super::DocumentSource;
use crate::RecipeError;
use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_DOCS_BASE_URL: &str = "https://docs.googleapis.com";

/// Reads documents through the Google Docs REST API
pub struct GoogleDocsClient {
    client: Client,
    base_url: String,
    auth: Authenticator,
}

impl GoogleDocsClient {
    pub fn new(
        credentials: Credentials,
        base_url: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, RecipeError> {
        let timeout = timeout.unwrap_or(Duration::from_secs(30));
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("recipe-docs/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            auth: Authenticator::new(client.clone(), credentials),
            client,
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_DOCS_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
        })
    }

    fn document_url(&self, document_id: &str) -> String {
        format!("{}/v1/documents/{}", self.base_url, document_id)
    }
}

#[async_trait]
impl DocumentSource for GoogleDocsClient {
    async fn fetch_document(&self, document_id: &str) -> Result<Document, RecipeError> {
        let token = self.auth.access_token().await?;
        let url = self.document_url(document_id);
        debug!("Fetching {}", url);

        let response = self.client.get(&url).bearer_auth(token).send().await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await?;
            return Err(RecipeError::DocumentError { status, body });
        }

        let document: Document = response.json().await?;
        info!(
            "Fetched document {:?} ({} structural elements)",
            document.title,
            document.body.content.len()
        );
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_url_trims_trailing_slash() {
        let client = GoogleDocsClient::new(
            Credentials::AccessToken("t".to_string()),
            Some("http://localhost:1234/".to_string()),
            None,
        )
        .unwrap();
        assert_eq!(
            client.document_url("abc"),
            "http://localhost:1234/v1/documents/abc"
        );
    }

    #[test]
    fn test_default_base_url() {
        let client =
            GoogleDocsClient::new(Credentials::AccessToken("t".to_string()), None, None).unwrap();
        assert_eq!(
            client.document_url("abc"),
            "https://docs.googleapis.com/v1/documents/abc"
        );
    }
}
