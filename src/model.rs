use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Recipe title → quick recipe text, parsed from the quick recipe document
pub type QuickRecipeMap = HashMap<String, String>;

/// Recipe title → URL, loaded from `recipe_urls.json`
pub type UrlOverrideMap = BTreeMap<String, String>;

/// One block of the main recipe document
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecipeEntry {
    pub title: String,
    pub link: Option<String>,
    pub notes: Option<String>,
    /// The title line carried a `Quick_Recipe` marker
    pub has_quick_recipe: bool,
}

impl RecipeEntry {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }
}

/// A recipe as rendered on the page and stored in the snapshot file.
///
/// Absent fields are omitted from the JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Recipe {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quick_recipe: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
