use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Which Google Docs hold the recipes
    #[serde(default)]
    pub documents: DocumentsConfig,
    /// Credentials and API endpoint
    #[serde(default)]
    pub google: GoogleConfig,
    /// Where the override file, snapshot and static site live
    #[serde(default)]
    pub paths: PathsConfig,
    /// Live server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

/// Document IDs of the main and quick recipe documents
#[derive(Debug, Deserialize, Clone)]
pub struct DocumentsConfig {
    #[serde(default = "default_recipe_doc_id")]
    pub recipe_doc_id: String,
    /// Set to an empty string to skip the quick recipe document
    #[serde(default = "default_quick_recipe_doc_id")]
    pub quick_recipe_doc_id: Option<String>,
}

impl Default for DocumentsConfig {
    fn default() -> Self {
        Self {
            recipe_doc_id: default_recipe_doc_id(),
            quick_recipe_doc_id: default_quick_recipe_doc_id(),
        }
    }
}

/// Google API access
#[derive(Debug, Deserialize, Clone)]
pub struct GoogleConfig {
    /// Path to the service account key JSON.
    /// Falls back to the GOOGLE_SERVICE_ACCOUNT environment variable.
    pub service_account_file: Option<String>,
    /// Pre-issued OAuth access token, used instead of the service account
    pub access_token: Option<String>,
    /// Base URL of the Docs API (overridable for tests and proxies)
    #[serde(default = "default_docs_base_url")]
    pub docs_base_url: String,
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            service_account_file: None,
            access_token: None,
            docs_base_url: default_docs_base_url(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct PathsConfig {
    #[serde(default = "default_recipe_urls")]
    pub recipe_urls: PathBuf,
    #[serde(default = "default_snapshot")]
    pub snapshot: PathBuf,
    #[serde(default = "default_site_dir")]
    pub site_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            recipe_urls: default_recipe_urls(),
            snapshot: default_snapshot(),
            site_dir: default_site_dir(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_page_title")]
    pub page_title: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            page_title: default_page_title(),
        }
    }
}

// Default value functions
fn default_recipe_doc_id() -> String {
    "1ZKRBHoqKoQQ7RcnHoNtLtx0O0ae7ZMHF_XF1UUNp2kY".to_string()
}

fn default_quick_recipe_doc_id() -> Option<String> {
    Some("1BpJj3ECDU2Z_QYcorncs3SbeiKUD_WI_Lj29hnRjI18".to_string())
}

fn default_docs_base_url() -> String {
    "https://docs.googleapis.com".to_string()
}

fn default_recipe_urls() -> PathBuf {
    PathBuf::from("recipe_urls.json")
}

fn default_snapshot() -> PathBuf {
    PathBuf::from("data/recipes.json")
}

fn default_site_dir() -> PathBuf {
    PathBuf::from("site")
}

fn default_bind() -> String {
    "0.0.0.0:5001".to_string()
}

fn default_page_title() -> String {
    "Recipes".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            documents: DocumentsConfig::default(),
            google: GoogleConfig::default(),
            paths: PathsConfig::default(),
            server: ServerConfig::default(),
            timeout: default_timeout(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `config.toml` and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        load_config("config")
    }

    /// Service account key path from configuration or GOOGLE_SERVICE_ACCOUNT
    pub fn service_account_file(&self) -> Option<PathBuf> {
        self.google
            .service_account_file
            .clone()
            .or_else(|| std::env::var("GOOGLE_SERVICE_ACCOUNT").ok())
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from)
    }

    /// Quick recipe document ID, if one is configured
    pub fn quick_recipe_doc_id(&self) -> Option<&str> {
        self.documents
            .quick_recipe_doc_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

/// Load configuration from file and environment variables
///
/// Configuration is loaded with the following priority (highest to lowest):
/// 1. Environment variables with RECIPE_DOCS__ prefix
/// 2. The named TOML file (optional, `config` → `config.toml`)
/// 3. Default values
///
/// Environment variable format: RECIPE_DOCS__GOOGLE__SERVICE_ACCOUNT_FILE
pub fn load_config(name: &str) -> Result<AppConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name(name).required(false))
        // Use double underscore for nested: RECIPE_DOCS__SERVER__BIND
        .add_source(
            Environment::with_prefix("RECIPE_DOCS")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
