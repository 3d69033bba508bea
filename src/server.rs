//! Live variant: serves the dropdown page and a small JSON API.
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/` | Dropdown page for the current snapshot |
//! | `GET`  | `/api/recipes` | Recipe titles, in document order |
//! | `GET`  | `/api/recipe/{title}` | One recipe, matched case-insensitively |
//! | `POST` | `/api/refresh` | Fetch the documents again and swap the snapshot |
//!
//! At startup the documents are fetched; [`initial_snapshot`] falls back to
//! the snapshot file and then to an empty list.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use log::{error, info, warn};
use serde::Serialize;
use std::path::Path as FsPath;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::render::render_page;
use crate::{fetch_recipes, RecipeError, RecipeSnapshot, SharedSnapshot};

/// Shared state for all route handlers
#[derive(Clone)]
pub struct AppState {
    snapshot: SharedSnapshot,
    config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(config: AppConfig, snapshot: RecipeSnapshot) -> Self {
        Self {
            snapshot: SharedSnapshot::new(snapshot),
            config: Arc::new(config),
        }
    }

    pub fn snapshot(&self) -> &SharedSnapshot {
        &self.snapshot
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

struct AppError {
    status: StatusCode,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}

impl From<RecipeError> for AppError {
    fn from(e: RecipeError) -> Self {
        let status = match e {
            RecipeError::FetchError(_)
            | RecipeError::DocumentError { .. }
            | RecipeError::AuthError(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        AppError {
            status,
            message: e.to_string(),
        }
    }
}

#[derive(Serialize)]
struct RefreshResponse {
    count: usize,
    fetched_at: String,
}

/// Build the router; exposed so tests can serve it on an ephemeral port
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handle_index))
        .route("/api/recipes", get(handle_list_titles))
        .route("/api/recipe/{title}", get(handle_get_recipe))
        .route("/api/refresh", post(handle_refresh))
        .with_state(state)
}

/// Snapshot to serve at startup.
///
/// Fetches the documents unless `from_snapshot` is set. When that fails or is
/// skipped, the snapshot file is used, and when that is unusable too the
/// server starts with no recipes.
pub async fn initial_snapshot(config: &AppConfig, from_snapshot: bool) -> RecipeSnapshot {
    if !from_snapshot {
        match fetch_recipes(config).await {
            Ok(snapshot) => return snapshot,
            Err(e) => error!("Failed to fetch recipes: {}", e),
        }
    }

    match load_snapshot_file(&config.paths.snapshot).await {
        Some(snapshot) => snapshot,
        None => {
            warn!("Starting with no recipes");
            RecipeSnapshot::empty()
        }
    }
}

async fn load_snapshot_file(path: &FsPath) -> Option<RecipeSnapshot> {
    match RecipeSnapshot::load(path).await {
        Ok(snapshot) => {
            info!(
                "Loaded {} recipes from {} (fetched {})",
                snapshot.len(),
                path.display(),
                snapshot.fetched_at()
            );
            Some(snapshot)
        }
        Err(e) => {
            warn!("No usable snapshot at {}: {}", path.display(), e);
            None
        }
    }
}

/// Bind to the configured address and serve until the process is stopped
pub async fn run_server(config: AppConfig, snapshot: RecipeSnapshot) -> Result<(), RecipeError> {
    let bind_addr = config.server.bind.clone();
    let state = AppState::new(config, snapshot);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("Serving recipes on http://{}", bind_addr);
    axum::serve(listener, router(state)).await?;
    Ok(())
}

async fn handle_index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let snapshot = state.snapshot.current().await;
    let page = render_page(snapshot.recipes(), &state.config.server.page_title)?;
    Ok(Html(page))
}

async fn handle_list_titles(State(state): State<AppState>) -> Json<Vec<String>> {
    let snapshot = state.snapshot.current().await;
    Json(snapshot.titles().into_iter().map(str::to_string).collect())
}

async fn handle_get_recipe(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> Result<Response, AppError> {
    let snapshot = state.snapshot.current().await;
    match snapshot.find(&title) {
        Some(recipe) => Ok(Json(recipe).into_response()),
        None => Err(AppError {
            status: StatusCode::NOT_FOUND,
            message: "Recipe not found".to_string(),
        }),
    }
}

async fn handle_refresh(State(state): State<AppState>) -> Result<Json<RefreshResponse>, AppError> {
    let snapshot = fetch_recipes(&state.config).await.map_err(|e| {
        error!("Refresh failed: {}", e);
        AppError::from(e)
    })?;

    let response = RefreshResponse {
        count: snapshot.len(),
        fetched_at: snapshot.fetched_at().to_rfc3339(),
    };
    state.snapshot.replace(snapshot).await;
    info!("Snapshot replaced with {} recipes", response.count);
    Ok(Json(response))
}
