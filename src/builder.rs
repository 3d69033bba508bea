use log::{info, warn};
use std::sync::Arc;
use std::time::Duration;

use crate::docs::{Credentials, DocumentSource, GoogleDocsClient};
use crate::model::{QuickRecipeMap, UrlOverrideMap};
use crate::{merge_recipes, parse_quick_recipes, parse_recipes, RecipeError, RecipeSnapshot};

/// Builder for one fetch → parse → merge run
#[derive(Default)]
pub struct RecipeBookBuilder {
    document: Option<String>,
    quick_recipe_document: Option<String>,
    url_overrides: UrlOverrideMap,
    source: Option<Arc<dyn DocumentSource>>,
    credentials: Option<Credentials>,
    docs_base_url: Option<String>,
    timeout: Option<Duration>,
}

impl RecipeBookBuilder {
    /// Set the ID of the main recipe document
    ///
    /// # Example
    /// ```
    /// use recipe_docs::RecipeBook;
    ///
    /// let builder = RecipeBook::builder()
    ///     .document("1ZKRBHoqKoQQ7RcnHoNtLtx0O0ae7ZMHF_XF1UUNp2kY");
    /// ```
    pub fn document(mut self, document_id: impl Into<String>) -> Self {
        self.document = Some(document_id.into());
        self
    }

    /// Set the ID of the quick recipe document
    ///
    /// If this document cannot be fetched the run still succeeds, without
    /// quick recipes.
    pub fn quick_recipe_document(mut self, document_id: impl Into<String>) -> Self {
        self.quick_recipe_document = Some(document_id.into());
        self
    }

    /// Titles whose link should be replaced
    pub fn url_overrides(mut self, overrides: UrlOverrideMap) -> Self {
        self.url_overrides = overrides;
        self
    }

    /// Read documents from a custom source instead of the Docs API
    pub fn source(mut self, source: impl DocumentSource + 'static) -> Self {
        self.source = Some(Arc::new(source));
        self
    }

    /// Credentials for the Docs API; ignored when a custom source is set
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn docs_base_url(mut self, url: impl Into<String>) -> Self {
        self.docs_base_url = Some(url.into());
        self
    }

    /// Set a timeout for HTTP requests
    ///
    /// # Example
    /// ```
    /// use recipe_docs::RecipeBook;
    /// use std::time::Duration;
    ///
    /// let builder = RecipeBook::builder()
    ///     .document("doc-id")
    ///     .timeout(Duration::from_secs(10));
    /// ```
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Fetch both documents, parse them and merge the result
    ///
    /// # Errors
    /// Returns `RecipeError` if:
    /// - No main document was specified
    /// - No source and no credentials were given
    /// - The main document cannot be fetched
    ///
    /// # Example
    /// ```no_run
    /// # use recipe_docs::{docs::Credentials, RecipeBook};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let snapshot = RecipeBook::builder()
    ///     .document("doc-id")
    ///     .credentials(Credentials::AccessToken("ya29...".to_string()))
    ///     .build()
    ///     .await?;
    /// println!("{} recipes", snapshot.len());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn build(self) -> Result<RecipeSnapshot, RecipeError> {
        let document = self
            .document
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| {
                RecipeError::BuilderError(
                    "No recipe document specified. Use .document()".to_string(),
                )
            })?;

        let source: Arc<dyn DocumentSource> = match self.source {
            Some(source) => source,
            None => {
                let credentials = self.credentials.ok_or(RecipeError::MissingCredentials)?;
                Arc::new(GoogleDocsClient::new(
                    credentials,
                    self.docs_base_url,
                    self.timeout,
                )?)
            }
        };

        let entries = parse_recipes(&source.fetch_text(&document).await?);

        let quick_recipes = match self.quick_recipe_document {
            Some(id) if !id.trim().is_empty() => match source.fetch_text(&id).await {
                Ok(text) => parse_quick_recipes(&text),
                Err(e) => {
                    // Usually the document is not shared with the service account yet
                    warn!("Skipping quick recipes from {}: {}", id, e);
                    QuickRecipeMap::new()
                }
            },
            _ => QuickRecipeMap::new(),
        };

        let recipes = merge_recipes(&entries, &quick_recipes, &self.url_overrides);
        info!(
            "Parsed {} recipes ({} quick recipes, {} URL overrides)",
            recipes.len(),
            quick_recipes.len(),
            self.url_overrides.len()
        );
        Ok(RecipeSnapshot::new(recipes))
    }
}

/// Main entry point for the builder API
pub struct RecipeBook;

impl RecipeBook {
    /// Creates a new builder
    ///
    /// # Example
    /// ```
    /// use recipe_docs::RecipeBook;
    ///
    /// let builder = RecipeBook::builder();
    /// ```
    pub fn builder() -> RecipeBookBuilder {
        RecipeBookBuilder::default()
    }
}
