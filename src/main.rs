use clap::{Parser, Subcommand};
use log::warn;
use std::path::PathBuf;

use recipe_docs::config::load_config;
use recipe_docs::docs::{DocumentSource, ServiceAccountKey};
use recipe_docs::render::write_site;
use recipe_docs::server::{initial_snapshot, run_server};
use recipe_docs::url_overrides::{
    discover_urls, load_url_overrides, merge_discovered, save_url_overrides, set_url,
};
use recipe_docs::{
    docs_client, fetch_entries, fetch_recipes, merge_recipes, parse_quick_recipes, parse_recipes,
    AppConfig, QuickRecipeMap, RecipeSnapshot,
};

#[derive(Parser)]
#[command(name = "recipe-docs", version, about = "Recipes from Google Docs")]
struct Cli {
    /// Configuration file name (TOML, extension optional)
    #[arg(long, global = true, default_value = "config")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the recipe page
    Serve {
        /// Address to bind, overriding the configuration
        #[arg(long)]
        bind: Option<String>,
        /// Start from the snapshot file instead of fetching
        #[arg(long)]
        from_snapshot: bool,
    },
    /// Fetch the documents and write the snapshot file
    Fetch,
    /// Render the static site from the snapshot file
    Render,
    /// Parse local text files and print the merged recipes as JSON
    Parse {
        /// Text of the main recipe document
        file: PathBuf,
        /// Text of the quick recipe document
        #[arg(long)]
        quick: Option<PathBuf>,
        /// URL override file (defaults to the configured one)
        #[arg(long)]
        urls: Option<PathBuf>,
    },
    /// Add or update a recipe URL override
    AddUrl { title: String, url: String },
    /// Copy links found in the main document into the URL override file
    ExtractUrls,
    /// Check that a document is readable and count its links
    Check {
        /// Document ID (defaults to the main recipe document)
        document_id: Option<String>,
    },
    /// Show the service account email documents must be shared with
    ServiceAccount,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = load_config(&cli.config)?;

    match cli.command {
        Command::Serve {
            bind,
            from_snapshot,
        } => {
            let mut config = config;
            if let Some(bind) = bind {
                config.server.bind = bind;
            }
            let snapshot = initial_snapshot(&config, from_snapshot).await;
            run_server(config, snapshot).await?;
        }
        Command::Fetch => {
            let snapshot = fetch_recipes(&config).await?;
            snapshot.save(&config.paths.snapshot).await?;
            println!(
                "Wrote {} recipes to {}",
                snapshot.len(),
                config.paths.snapshot.display()
            );
        }
        Command::Render => {
            let snapshot = RecipeSnapshot::load(&config.paths.snapshot).await?;
            let path = write_site(
                &config.paths.site_dir,
                snapshot.recipes(),
                &config.server.page_title,
            )
            .await?;
            println!("Rendered {} recipes to {}", snapshot.len(), path.display());
        }
        Command::Parse { file, quick, urls } => {
            let text = tokio::fs::read_to_string(&file).await?;
            let quick_recipes = match quick {
                Some(path) => parse_quick_recipes(&tokio::fs::read_to_string(path).await?),
                None => QuickRecipeMap::new(),
            };
            let overrides =
                load_url_overrides(urls.as_deref().unwrap_or(config.paths.recipe_urls.as_path())).await;

            let recipes = merge_recipes(&parse_recipes(&text), &quick_recipes, &overrides);
            println!("{}", serde_json::to_string_pretty(&recipes)?);
        }
        Command::AddUrl { title, url } => {
            let path = &config.paths.recipe_urls;
            let mut overrides = load_url_overrides(path).await;
            set_url(&mut overrides, &title, &url);
            save_url_overrides(path, &overrides).await?;
            println!("Added/Updated: {} -> {}", title.trim(), url.trim());
        }
        Command::ExtractUrls => {
            let entries = fetch_entries(&config).await?;
            let path = &config.paths.recipe_urls;
            let mut overrides = load_url_overrides(path).await;

            let updated = merge_discovered(&mut overrides, discover_urls(&entries));
            save_url_overrides(path, &overrides).await?;
            let with_urls = overrides.values().filter(|url| !url.is_empty()).count();
            println!("Updated {} recipes in {}", updated, path.display());
            println!("Total recipes with URLs: {}", with_urls);
        }
        Command::Check { document_id } => {
            let id = document_id.unwrap_or_else(|| config.documents.recipe_doc_id.clone());
            check_document(&config, &id).await?;
        }
        Command::ServiceAccount => {
            let path = config
                .service_account_file()
                .ok_or("GOOGLE_SERVICE_ACCOUNT environment variable not set")?;
            let key = ServiceAccountKey::from_file(&path).await?;
            println!("Service account email: {}", key.client_email);
            println!("Share each document with this address as a Viewer:");
            for id in std::iter::once(config.documents.recipe_doc_id.as_str())
                .chain(config.quick_recipe_doc_id())
            {
                println!("  https://docs.google.com/document/d/{}/edit", id);
            }
        }
    }

    Ok(())
}

async fn check_document(config: &AppConfig, document_id: &str) -> Result<(), Box<dyn std::error::Error>> {
    println!("Checking access to document: {}", document_id);
    let client = docs_client(config).await?;
    let document = client.fetch_document(document_id).await?;
    println!("Document accessible: {}", document.title);

    let links = document.links();
    let external: Vec<_> = links.iter().filter(|l| l.is_external()).collect();
    for link in external.iter().take(5) {
        println!("  External link found: '{}' -> {}", link.text, link.url);
    }
    println!("Total links found: {}", links.len());
    println!("External links: {}", external.len());

    if links.is_empty() {
        warn!("No links found; the document may have none, or the service account cannot see them");
    }
    Ok(())
}
