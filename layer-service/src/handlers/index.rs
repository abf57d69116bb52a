use axum::{extract::State, response::Html};
use service_core::error::AppError;
use std::io::ErrorKind;

use crate::startup::AppState;

/// Serve the frontend page, read from disk on every request.
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let path = &state.config.frontend.index_path;

    match tokio::fs::read_to_string(path).await {
        Ok(page) => Ok(Html(page)),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(AppError::NotFound(anyhow::anyhow!(
            "{} not found",
            path.display()
        ))),
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "Failed to read index page");
            Err(e.into())
        }
    }
}
