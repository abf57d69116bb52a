use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::startup::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub has_key: bool,
    pub key_color: String,
}

/// Liveness plus whether generation is available; never touches the provider.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        has_key: state.provider.is_some(),
        key_color: state.config.layers.key_color.clone(),
    })
}
