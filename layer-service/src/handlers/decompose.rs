use axum::{extract::State, Json};
use std::time::Instant;

use crate::error::GenerationError;
use crate::models::{DecomposeResult, SceneRequest};
use crate::services::metrics::record_provider_call;
use crate::services::prompt::decomposition_prompt;
use crate::startup::AppState;

/// Split a scene into layers.
///
/// The provider's JSON text is relayed as a JSON string, unparsed, so a
/// provider that breaks its own schema is visible to the caller as-is.
#[tracing::instrument(skip(state, request), fields(prompt_len = request.prompt.len()))]
pub async fn decompose_scene(
    State(state): State<AppState>,
    Json(request): Json<SceneRequest>,
) -> Result<Json<String>, GenerationError> {
    let provider = state.require_provider()?;
    let prompt = decomposition_prompt(&request.prompt);

    let start = Instant::now();
    let result = provider
        .generate_structured(&prompt, &DecomposeResult::response_schema())
        .await;
    record_provider_call(
        provider.name(),
        "decompose_scene",
        start.elapsed(),
        result.as_ref().err().map(|e| e.kind()),
    );

    let text = result?;
    tracing::info!(response_len = text.len(), "Scene decomposed");

    Ok(Json(text))
}
