//! Mock provider implementation for testing.

use super::{
    Candidate, Content, ContentProvider, GenerationResult, InlineData, InlinePayload, Part,
    ProviderError,
};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Canned-response provider that records the prompts it receives.
pub struct MockContentProvider {
    structured: Result<String, String>,
    image: Result<GenerationResult, String>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl MockContentProvider {
    /// Answers decompositions with a two-layer scene and images with a tiny payload.
    pub fn new() -> Self {
        Self {
            structured: Ok(r#"{"layers":[{"name":"sky","role":"backdrop","kind":"background","prompt":"a clear sky"},{"name":"kite","role":"subject","kind":"object","prompt":"a red kite"}]}"#.to_string()),
            image: Ok(Self::image_result(vec![vec![0xFF, 0xD8, 0xFF, 0xE0]])),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn with_structured(mut self, text: impl Into<String>) -> Self {
        self.structured = Ok(text.into());
        self
    }

    pub fn with_image_result(mut self, result: GenerationResult) -> Self {
        self.image = Ok(result);
        self
    }

    /// Make every call fail with an API error carrying `message`.
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        let message = message.into();
        self.structured = Err(message.clone());
        self.image = Err(message);
        self
    }

    /// A single candidate whose parts each carry one raw image payload.
    pub fn image_result(images: Vec<Vec<u8>>) -> GenerationResult {
        let parts = images
            .into_iter()
            .map(|bytes| Part {
                text: None,
                inline_data: Some(InlineData {
                    mime_type: Some("image/jpeg".to_string()),
                    data: Some(InlinePayload::Bytes(bytes)),
                }),
            })
            .collect();

        GenerationResult {
            candidates: vec![Candidate {
                content: Some(Content {
                    role: Some("model".to_string()),
                    parts: Some(parts),
                }),
                finish_reason: Some("STOP".to_string()),
            }],
        }
    }

    /// Number of provider calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Prompts received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|prompts| prompts.clone())
            .unwrap_or_default()
    }

    fn record(&self, prompt: &str) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }
    }
}

impl Default for MockContentProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentProvider for MockContentProvider {
    async fn generate_structured(
        &self,
        prompt: &str,
        _schema: &Value,
    ) -> Result<String, ProviderError> {
        self.record(prompt);
        self.structured
            .clone()
            .map_err(ProviderError::ApiError)
    }

    async fn generate_image(&self, prompt: &str) -> Result<GenerationResult, ProviderError> {
        self.record(prompt);
        self.image.clone().map_err(ProviderError::ApiError)
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
