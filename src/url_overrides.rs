use crate::model::{RecipeEntry, UrlOverrideMap};
use crate::RecipeError;
use log::{debug, warn};
use std::path::Path;
use tokio::fs;

/// Load the title → URL override file.
///
/// A missing file is an empty map. A file that cannot be read or parsed is
/// logged and also treated as empty, so a bad edit never takes the page down.
pub async fn load_url_overrides(path: &Path) -> UrlOverrideMap {
    let content = match fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("No URL override file at {}", path.display());
            return UrlOverrideMap::new();
        }
        Err(e) => {
            warn!("Failed to read {}: {}", path.display(), e);
            return UrlOverrideMap::new();
        }
    };

    match serde_json::from_str(&content) {
        Ok(map) => map,
        Err(e) => {
            warn!("Ignoring invalid URL override file {}: {}", path.display(), e);
            UrlOverrideMap::new()
        }
    }
}

/// Write the override map as pretty JSON with sorted keys
pub async fn save_url_overrides(path: &Path, overrides: &UrlOverrideMap) -> Result<(), RecipeError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }
    let json = serde_json::to_string_pretty(overrides)?;
    fs::write(path, json + "\n").await?;
    Ok(())
}

/// Add or replace the URL for one title
pub fn set_url(overrides: &mut UrlOverrideMap, title: &str, url: &str) {
    overrides.insert(title.trim().to_string(), url.trim().to_string());
}

/// Links found in the document, excluding links back to Google Docs
pub fn discover_urls(entries: &[RecipeEntry]) -> UrlOverrideMap {
    entries
        .iter()
        .filter_map(|entry| {
            let link = entry.link.as_ref()?;
            (!link.contains("docs.google.com")).then(|| (entry.title.clone(), link.clone()))
        })
        .collect()
}

/// Fill in discovered URLs where the map has no entry or an empty one.
///
/// Existing non-empty entries are never replaced. Returns how many titles
/// were added or filled.
pub fn merge_discovered(overrides: &mut UrlOverrideMap, discovered: UrlOverrideMap) -> usize {
    let mut updated = 0;
    for (title, url) in discovered {
        let slot = overrides.entry(title).or_default();
        if slot.trim().is_empty() {
            *slot = url;
            updated += 1;
        }
    }
    updated
}
