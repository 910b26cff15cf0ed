use askama::Template;
use axum::{extract::State, response::Html};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    target_height: u32
}

pub async fn index_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let template = IndexTemplate {
        target_height: state.downloader.config().target_height
    };
    let body = template
        .render()
        .map_err(|e| AppError::internal(format!("Failed to render page: {e}")))?;
    Ok(Html(body))
}
