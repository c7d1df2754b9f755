use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::services::ServeDir;

use crate::AppState;

pub mod handlers;
pub mod models;

/// Assembles the full HTTP surface: the landing page, the search route and
/// the static asset tree. `ServeDir` handles the `/assets` prefix strip and
/// refuses paths that would escape the asset root.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::index_handler))
        .route("/search", get(handlers::search_handler))
        .with_state(state)
        .nest_service("/assets", ServeDir::new("assets"))
}
