use crate::model::{QuickRecipeMap, Recipe, RecipeEntry, UrlOverrideMap};

/// Join parsed entries with quick recipes and URL overrides by exact title.
///
/// A non-empty override replaces the link found in the document. Empty quick
/// recipes count as absent. Output keeps the order of `entries`.
pub fn merge_recipes(
    entries: &[RecipeEntry],
    quick_recipes: &QuickRecipeMap,
    url_overrides: &UrlOverrideMap,
) -> Vec<Recipe> {
    entries
        .iter()
        .map(|entry| {
            let link = url_overrides
                .get(&entry.title)
                .filter(|url| !url.trim().is_empty())
                .cloned()
                .or_else(|| entry.link.clone());

            let quick_recipe = quick_recipes
                .get(&entry.title)
                .map(|text| text.trim())
                .filter(|text| !text.is_empty())
                .map(str::to_string);

            Recipe {
                title: entry.title.clone(),
                link,
                quick_recipe,
                notes: entry.notes.clone(),
            }
        })
        .collect()
}
