//! HTML page with a recipe dropdown.
//!
//! The recipe records are embedded in the page as JSON, so picking a recipe
//! is a client-side lookup. The live server and the static site use the same
//! page.

use crate::model::Recipe;
use crate::RecipeError;
use html_escape::encode_text;
use log::info;
use std::path::{Path, PathBuf};
use tokio::fs;

const STYLE: &str = r#"
body { font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", sans-serif; max-width: 40rem; margin: 2rem auto; padding: 0 1rem; }
select { width: 100%; font-size: 1.1rem; padding: 0.4rem; }
section { margin-top: 1.5rem; }
h2 { font-size: 1rem; text-transform: uppercase; color: #666; margin-bottom: 0.3rem; }
pre { white-space: pre-wrap; font-family: inherit; margin: 0; }
[hidden] { display: none; }
"#;

const SCRIPT: &str = r#"
const recipes = JSON.parse(document.getElementById("recipe-data").textContent);
const byTitle = new Map(recipes.map((r) => [r.title, r]));
const select = document.getElementById("recipe-select");

function show(id, value, fill) {
  const section = document.getElementById(id);
  section.hidden = !value;
  if (value) fill(section, value);
}

select.addEventListener("change", () => {
  const recipe = byTitle.get(select.value) || {};
  const link = /^https?:\/\//i.test(recipe.link || "") ? recipe.link : undefined;
  show("recipe-link", link, (s, v) => {
    const a = s.querySelector("a");
    a.href = v;
    a.textContent = v;
  });
  show("recipe-quick", recipe.quick_recipe, (s, v) => { s.querySelector("pre").textContent = v; });
  show("recipe-notes", recipe.notes, (s, v) => { s.querySelector("pre").textContent = v; });
});
"#;

/// Render the full page for the given recipes, in the given order
pub fn render_page(recipes: &[Recipe], page_title: &str) -> Result<String, RecipeError> {
    let data = script_safe_json(recipes)?;

    let options: String = recipes
        .iter()
        .map(|r| {
            let title = html_escape::encode_double_quoted_attribute(&r.title);
            format!(
                "      <option value=\"{}\">{}</option>\n",
                title,
                encode_text(&r.title)
            )
        })
        .collect();

    let heading = encode_text(page_title);
    Ok(format!(
        r##"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{heading}</title>
    <style>{STYLE}</style>
  </head>
  <body>
    <h1>{heading}</h1>
    <select id="recipe-select">
      <option value="">Choose a recipe ({count})</option>
{options}    </select>
    <section id="recipe-link" hidden><h2>Recipe</h2><a href="#" target="_blank" rel="noopener"></a></section>
    <section id="recipe-quick" hidden><h2>Quick Recipe</h2><pre></pre></section>
    <section id="recipe-notes" hidden><h2>Notes</h2><pre></pre></section>
    <script type="application/json" id="recipe-data">{data}</script>
    <script>{SCRIPT}</script>
  </body>
</html>
"##,
        count = recipes.len(),
    ))
}

/// JSON for a `<script type="application/json">` element.
///
/// `<`, `>` and `&` become `\u` escapes, so no note text can end the element
/// or switch the HTML parser into a comment or escaped script state.
fn script_safe_json(recipes: &[Recipe]) -> Result<String, RecipeError> {
    let json = serde_json::to_string(recipes)?;
    Ok(json
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026"))
}

/// Write `index.html` for the static site and return its path
pub async fn write_site(
    site_dir: &Path,
    recipes: &[Recipe],
    page_title: &str,
) -> Result<PathBuf, RecipeError> {
    fs::create_dir_all(site_dir).await?;
    let path = site_dir.join("index.html");
    fs::write(&path, render_page(recipes, page_title)?).await?;
    info!("Rendered {} recipes to {}", recipes.len(), path.display());
    Ok(path)
}
