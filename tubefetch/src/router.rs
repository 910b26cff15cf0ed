use std::path::Path;

use axum::{
    Router,
    routing::{get, post}
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::handlers::{api, pages};
use crate::state::AppState;

pub fn create_router(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .route("/", get(pages::index_page))
        .route("/download", post(api::download))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
