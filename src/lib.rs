pub mod builder;
pub mod config;
pub mod docs;
pub mod error;
pub mod merge;
pub mod model;
pub mod parser;
pub mod render;
pub mod server;
pub mod snapshot;
pub mod url_overrides;

pub use builder::{RecipeBook, RecipeBookBuilder};
pub use config::AppConfig;
pub use error::RecipeError;
pub use merge::merge_recipes;
pub use model::{QuickRecipeMap, Recipe, RecipeEntry, UrlOverrideMap};
pub use parser::{parse_quick_recipes, parse_recipes};
pub use snapshot::{RecipeSnapshot, SharedSnapshot};

use crate::docs::{Credentials, DocumentSource, GoogleDocsClient};
use crate::url_overrides::load_url_overrides;

/// Docs API client built from configuration
pub async fn docs_client(config: &AppConfig) -> Result<GoogleDocsClient, RecipeError> {
    let credentials = Credentials::from_config(config).await?;
    GoogleDocsClient::new(
        credentials,
        Some(config.google.docs_base_url.clone()),
        Some(config.timeout()),
    )
}

/// Fetch, parse and merge the configured documents
pub async fn fetch_recipes(config: &AppConfig) -> Result<RecipeSnapshot, RecipeError> {
    let overrides = load_url_overrides(&config.paths.recipe_urls).await;
    let client = docs_client(config).await?;

    let mut builder = RecipeBook::builder()
        .document(&config.documents.recipe_doc_id)
        .url_overrides(overrides)
        .source(client);
    if let Some(id) = config.quick_recipe_doc_id() {
        builder = builder.quick_recipe_document(id);
    }
    builder.build().await
}

/// Parse the main document without merging, as written in the document
pub async fn fetch_entries(config: &AppConfig) -> Result<Vec<RecipeEntry>, RecipeError> {
    let client = docs_client(config).await?;
    let text = client.fetch_text(&config.documents.recipe_doc_id).await?;
    Ok(parse_recipes(&text))
}
