//! AI provider abstractions and implementations.
//!
//! Handlers talk to a [`ContentProvider`] so the Gemini backend can be
//! swapped for the mock in tests.

pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Provider returned no text")]
    EmptyResponse,
}

impl ProviderError {
    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::NotConfigured(_) => "not_configured",
            ProviderError::ApiError(_) => "api_error",
            ProviderError::RateLimited => "rate_limited",
            ProviderError::NetworkError(_) => "network_error",
            ProviderError::EmptyResponse => "empty_response",
        }
    }
}

/// Raw result of an unconstrained generation call.
///
/// Mirrors the provider's nesting: candidates hold content, content holds
/// parts, a part may carry an inline payload. Any level may be missing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Option<Vec<Part>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub inline_data: Option<InlineData>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub data: Option<InlinePayload>,
}

/// Inline payload as delivered: either already base64 text (the REST API)
/// or raw bytes (in-process providers).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum InlinePayload {
    Encoded(String),
    Bytes(Vec<u8>),
}

impl InlinePayload {
    pub fn is_empty(&self) -> bool {
        match self {
            InlinePayload::Encoded(text) => text.is_empty(),
            InlinePayload::Bytes(bytes) => bytes.is_empty(),
        }
    }
}

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl GenerationResult {
    /// Text parts of the first candidate, concatenated.
    pub fn first_text(&self) -> Option<String> {
        let parts = self.candidates.first()?.content.as_ref()?.parts.as_ref()?;
        let texts: Vec<&str> = parts.iter().filter_map(|p| p.text.as_deref()).collect();

        if texts.is_empty() {
            None
        } else {
            Some(texts.concat())
        }
    }
}

/// Trait for the generative-content backend (e.g., Gemini).
#[async_trait]
pub trait ContentProvider: Send + Sync {
    /// Generate JSON text constrained by `schema` and return it unparsed.
    async fn generate_structured(&self, prompt: &str, schema: &Value)
        -> Result<String, ProviderError>;

    /// Generate free-form content (expected to include an image).
    async fn generate_image(&self, prompt: &str) -> Result<GenerationResult, ProviderError>;

    /// Provider name for logs and metrics.
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_rest_payload_as_encoded_text() {
        let result: GenerationResult = serde_json::from_value(json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [
                        { "text": "here you go" },
                        { "inlineData": { "mimeType": "image/png", "data": "aGVsbG8=" } }
                    ]
                },
                "finishReason": "STOP"
            }]
        }))
        .unwrap();

        let parts = result.candidates[0]
            .content
            .as_ref()
            .unwrap()
            .parts
            .as_ref()
            .unwrap();
        let inline = parts[1].inline_data.as_ref().unwrap();
        assert_eq!(
            inline.data,
            Some(InlinePayload::Encoded("aGVsbG8=".to_string()))
        );
        assert_eq!(inline.mime_type.as_deref(), Some("image/png"));
    }

    #[test]
    fn missing_candidates_decode_as_empty() {
        let result: GenerationResult = serde_json::from_value(json!({})).unwrap();
        assert!(result.candidates.is_empty());
        assert_eq!(result.first_text(), None);
    }

    #[test]
    fn null_candidates_decode_as_empty() {
        let result: GenerationResult =
            serde_json::from_value(json!({ "candidates": null })).unwrap();
        assert!(result.candidates.is_empty());
    }

    #[test]
    fn inline_data_without_payload_still_decodes() {
        let result: GenerationResult = serde_json::from_value(json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "inlineData": { "mimeType": "image/png" } },
                        { "inlineData": { "data": "c2Vjb25k" } }
                    ]
                }
            }]
        }))
        .unwrap();

        let parts = result.candidates[0]
            .content
            .as_ref()
            .unwrap()
            .parts
            .as_ref()
            .unwrap();
        assert_eq!(parts[0].inline_data.as_ref().unwrap().data, None);
        assert_eq!(
            parts[1].inline_data.as_ref().unwrap().data,
            Some(InlinePayload::Encoded("c2Vjb25k".to_string()))
        );
    }

    #[test]
    fn first_text_concatenates_text_parts() {
        let result: GenerationResult = serde_json::from_value(json!({
            "candidates": [
                { "content": { "parts": [ { "text": "{\"layers\":" }, { "text": "[]}" } ] } },
                { "content": { "parts": [ { "text": "ignored" } ] } }
            ]
        }))
        .unwrap();

        assert_eq!(result.first_text().as_deref(), Some("{\"layers\":[]}"));
    }
}
