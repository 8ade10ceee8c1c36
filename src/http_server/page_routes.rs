//! Map Page Routes
//!
//! Serves the HTML page hosting the map at `/` and its client assets under
//! `/static`.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{extract::State, response::Html, routing::get, Router};
use tower_http::services::ServeDir;
use tracing::error;

use super::errors::ApiError;

/// Page state shared across handlers
pub struct PageState {
    pub page_path: PathBuf,
}

impl PageState {
    pub fn new(page_path: impl Into<PathBuf>) -> Self {
        Self {
            page_path: page_path.into(),
        }
    }
}

/// Create page routes
pub fn page_routes(state: Arc<PageState>, static_dir: PathBuf) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

/// The page is read on every request and returned verbatim
async fn index_handler(State(state): State<Arc<PageState>>) -> Result<Html<String>, ApiError> {
    tokio::fs::read_to_string(&state.page_path)
        .await
        .map(Html)
        .map_err(|e| {
            error!(path = %state.page_path.display(), error = %e, "failed to read map page");
            ApiError::PageUnavailable
        })
}
