use axum::{extract::State, Json};
use std::time::Instant;

use crate::error::GenerationError;
use crate::models::{GeneratedImage, LayerRequest};
use crate::services::extract_image_base64;
use crate::services::metrics::record_provider_call;
use crate::services::prompt::{layer_prompt, resolve_key_color, LayerKind};
use crate::startup::AppState;

/// Render one layer. Object layers are drawn on the resolved key color,
/// which is echoed back so the caller can key it out.
#[tracing::instrument(
    skip(state, request),
    fields(layer_name = %request.layer_name, layer_kind = %request.layer_kind)
)]
pub async fn generate_layer(
    State(state): State<AppState>,
    Json(request): Json<LayerRequest>,
) -> Result<Json<GeneratedImage>, GenerationError> {
    let provider = state.require_provider()?;

    let key_color = resolve_key_color(
        request.key_color.as_deref(),
        &state.config.layers.key_color,
    )
    .to_string();
    let kind = LayerKind::classify(&request.layer_kind);
    let prompt = layer_prompt(&request.prompt, kind, &key_color);

    let start = Instant::now();
    let result = provider.generate_image(&prompt).await;
    record_provider_call(
        provider.name(),
        "generate_layer",
        start.elapsed(),
        result.as_ref().err().map(|e| e.kind()),
    );

    let image = extract_image_base64(&result?).ok_or(GenerationError::NoImage)?;
    tracing::info!(?kind, image_len = image.len(), "Layer generated");

    Ok(Json(GeneratedImage::jpeg(image, key_color)))
}
