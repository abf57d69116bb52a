use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::services::ProviderError;

/// Failure of a generation endpoint.
///
/// All variants render the same way: HTTP 200 with `{"error": "..."}`.
/// Clients detect failure from the body, not the status.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("API key is not configured")]
    MissingCredential,

    #[error("Model did not return an image")]
    NoImage,

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for GenerationError {
    fn into_response(self) -> Response {
        tracing::warn!(error = %self, "Generation request failed");

        (
            StatusCode::OK,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
