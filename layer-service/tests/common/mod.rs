#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use layer_service::config::{
    FrontendConfig, GoogleConfig, LayerConfig, LayerDefaults, ModelConfig, ObservabilityConfig,
    DEFAULT_API_BASE, DEFAULT_KEY_COLOR,
};
use layer_service::services::providers::mock::MockContentProvider;
use layer_service::services::ContentProvider;
use layer_service::startup::{build_router, AppState};
use service_core::config::Config as CoreConfig;
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt;

pub fn test_config() -> LayerConfig {
    LayerConfig {
        common: CoreConfig {
            port: 0,
            log_level: "info".to_string(),
        },
        models: ModelConfig {
            text_model: "gemini-2.5-flash".to_string(),
            image_model: "gemini-2.5-flash".to_string(),
        },
        google: GoogleConfig {
            api_key: None,
            api_base: DEFAULT_API_BASE.to_string(),
            request_timeout_secs: None,
        },
        layers: LayerDefaults {
            key_color: DEFAULT_KEY_COLOR.to_string(),
        },
        frontend: FrontendConfig {
            index_path: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("static/index.html"),
        },
        observability: ObservabilityConfig {
            otlp_endpoint: None,
        },
    }
}

/// Router backed by `provider`, or by no provider at all.
pub fn router(config: LayerConfig, provider: Option<Arc<MockContentProvider>>) -> Router {
    let provider = provider.map(|p| p as Arc<dyn ContentProvider>);
    build_router(AppState::new(config, provider))
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Send one request and return the status and raw body.
pub async fn send(router: Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

/// Send one request and parse the body as JSON.
pub async fn send_json(router: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let (status, body) = send(router, request).await;
    let json = serde_json::from_slice(&body).expect("response body is JSON");
    (status, json)
}
