use crate::model::Recipe;
use crate::RecipeError;
use chrono::{DateTime, Utc};
use log::info;
use std::path::Path;
use std::sync::Arc;
use tokio::fs;
use tokio::sync::RwLock;

/// The merged recipes of one fetch, never modified after construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeSnapshot {
    recipes: Vec<Recipe>,
    fetched_at: DateTime<Utc>,
}

impl RecipeSnapshot {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        Self::with_timestamp(recipes, Utc::now())
    }

    pub fn with_timestamp(recipes: Vec<Recipe>, fetched_at: DateTime<Utc>) -> Self {
        Self {
            recipes,
            fetched_at,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn titles(&self) -> Vec<&str> {
        self.recipes.iter().map(|r| r.title.as_str()).collect()
    }

    /// Case-insensitive lookup by title
    pub fn find(&self, title: &str) -> Option<&Recipe> {
        let wanted = title.trim().to_lowercase();
        self.recipes
            .iter()
            .find(|r| r.title.to_lowercase() == wanted)
    }

    /// Write the recipes as a pretty JSON array, creating parent directories
    pub async fn save(&self, path: &Path) -> Result<(), RecipeError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(&self.recipes)?;
        fs::write(path, json + "\n").await?;
        info!("Wrote {} recipes to {}", self.recipes.len(), path.display());
        Ok(())
    }

    /// Read a snapshot file; the file's modification time becomes `fetched_at`
    pub async fn load(path: &Path) -> Result<Self, RecipeError> {
        let content = fs::read_to_string(path).await?;
        let recipes: Vec<Recipe> = serde_json::from_str(&content)?;
        let fetched_at = fs::metadata(path)
            .await?
            .modified()
            .map(DateTime::<Utc>::from)
            .unwrap_or_else(|_| Utc::now());
        Ok(Self::with_timestamp(recipes, fetched_at))
    }
}

/// Handle to the snapshot currently being served.
///
/// Readers get an `Arc` to an immutable snapshot; a refresh swaps in a new one.
#[derive(Debug, Clone)]
pub struct SharedSnapshot {
    inner: Arc<RwLock<Arc<RecipeSnapshot>>>,
}

impl SharedSnapshot {
    pub fn new(snapshot: RecipeSnapshot) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(snapshot))),
        }
    }

    pub async fn current(&self) -> Arc<RecipeSnapshot> {
        self.inner.read().await.clone()
    }

    pub async fn replace(&self, snapshot: RecipeSnapshot) {
        *self.inner.write().await = Arc::new(snapshot);
    }
}
