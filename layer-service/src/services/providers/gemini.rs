//! Gemini AI provider implementation.
//!
//! Talks to Google's `generateContent` REST endpoint for both structured
//! (JSON schema constrained) text and image generation.

use super::{ContentProvider, GenerationResult, ProviderError};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

/// Header carrying the API key, so it never shows up in URLs or error text.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini provider configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub api_base: String,
    pub text_model: String,
    pub image_model: String,
    pub timeout: Option<Duration>,
}

/// Gemini content provider.
pub struct GeminiProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiProvider {
    pub fn new(config: GeminiConfig) -> Result<Self, ProviderError> {
        if config.api_key.is_empty() {
            return Err(ProviderError::NotConfigured(
                "Gemini API key not configured".to_string(),
            ));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ProviderError::NotConfigured(format!("HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Build the API URL for the given model and method.
    fn api_url(&self, model: &str, method: &str) -> String {
        format!(
            "{}/models/{}:{}",
            self.config.api_base.trim_end_matches('/'),
            model,
            method
        )
    }

    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest<'_>,
    ) -> Result<GenerationResult, ProviderError> {
        let url = self.api_url(model, "generateContent");

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();

            if status == StatusCode::TOO_MANY_REQUESTS {
                return Err(ProviderError::RateLimited);
            }

            return Err(ProviderError::ApiError(format!(
                "Gemini API error {}: {}",
                status, error_text
            )));
        }

        response
            .json::<GenerationResult>()
            .await
            .map_err(|e| ProviderError::ApiError(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl ContentProvider for GeminiProvider {
    async fn generate_structured(
        &self,
        prompt: &str,
        schema: &Value,
    ) -> Result<String, ProviderError> {
        let request = GenerateContentRequest::new(
            prompt,
            Some(GenerationConfig {
                response_mime_type: "application/json",
                response_schema: schema,
            }),
        );

        tracing::debug!(
            model = %self.config.text_model,
            prompt_len = prompt.len(),
            "Sending structured request to Gemini API"
        );

        let result = self
            .generate_content(&self.config.text_model, &request)
            .await?;

        result.first_text().ok_or(ProviderError::EmptyResponse)
    }

    async fn generate_image(&self, prompt: &str) -> Result<GenerationResult, ProviderError> {
        let request = GenerateContentRequest::new(prompt, None);

        tracing::debug!(
            model = %self.config.image_model,
            prompt_len = prompt.len(),
            "Sending image request to Gemini API"
        );

        self.generate_content(&self.config.image_model, &request)
            .await
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}

// ============================================================================
// Gemini API Request Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig<'a>>,
}

impl<'a> GenerateContentRequest<'a> {
    fn new(prompt: &'a str, generation_config: Option<GenerationConfig<'a>>) -> Self {
        Self {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![TextPart { text: prompt }],
            }],
            generation_config,
        }
    }
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    role: &'a str,
    parts: Vec<TextPart<'a>>,
}

#[derive(Debug, Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'a str,
    response_schema: &'a Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config() -> GeminiConfig {
        GeminiConfig {
            api_key: "test-key".to_string(),
            api_base: "https://example.test/v1beta/".to_string(),
            text_model: "text-model".to_string(),
            image_model: "image-model".to_string(),
            timeout: None,
        }
    }

    #[test]
    fn empty_api_key_is_rejected() {
        let result = GeminiProvider::new(GeminiConfig {
            api_key: String::new(),
            ..config()
        });
        assert!(matches!(result, Err(ProviderError::NotConfigured(_))));
    }

    #[test]
    fn api_url_joins_base_model_and_method() {
        let provider = GeminiProvider::new(config()).unwrap();
        assert_eq!(
            provider.api_url("image-model", "generateContent"),
            "https://example.test/v1beta/models/image-model:generateContent"
        );
    }

    #[test]
    fn structured_request_carries_schema() {
        let schema = json!({ "type": "OBJECT" });
        let request = GenerateContentRequest::new(
            "split this",
            Some(GenerationConfig {
                response_mime_type: "application/json",
                response_schema: &schema,
            }),
        );

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body,
            json!({
                "contents": [{ "role": "user", "parts": [{ "text": "split this" }] }],
                "generationConfig": {
                    "responseMimeType": "application/json",
                    "responseSchema": { "type": "OBJECT" }
                }
            })
        );
    }

    #[test]
    fn image_request_has_no_generation_config() {
        let request = GenerateContentRequest::new("a cat", None);
        let body = serde_json::to_value(&request).unwrap();
        assert!(body.get("generationConfig").is_none());
    }
}
