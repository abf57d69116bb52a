//! Integration tests for layer-service.
//!
//! Spawns the real application on a random port; no provider key is needed.
//! Run with: cargo test -p layer-service --test health_check

mod common;

use layer_service::services::providers::mock::MockContentProvider;
use layer_service::services::ContentProvider;
use layer_service::startup::Application;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

/// Spawn the application on a random port and return the port number.
async fn spawn_app(provider: Option<Arc<dyn ContentProvider>>) -> u16 {
    let app = Application::build_with_provider(common::test_config(), provider)
        .await
        .expect("Failed to build application");

    let port = app.port();

    tokio::spawn(async move {
        let _ = app.run_until_stopped().await;
    });

    // Wait for server to be ready by polling health endpoint
    let client = Client::new();
    let health_url = format!("http://127.0.0.1:{}/health", port);
    for _ in 0..50 {
        if client.get(&health_url).send().await.is_ok() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    port
}

#[tokio::test]
async fn health_check_returns_ok() {
    let port = spawn_app(None).await;
    let client = Client::new();

    let response = client
        .get(format!("http://127.0.0.1:{}/health", port))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["ok"], true);
    assert_eq!(body["has_key"], false);
    assert_eq!(body["key_color"], "#00FF00");
}

#[tokio::test]
async fn generate_layer_round_trip_over_http() {
    let provider: Arc<dyn ContentProvider> = Arc::new(MockContentProvider::new());
    let port = spawn_app(Some(provider)).await;
    let client = Client::new();

    let body: serde_json::Value = client
        .post(format!("http://127.0.0.1:{}/generate_layer", port))
        .json(&serde_json::json!({
            "prompt": "a red kite",
            "layer_name": "kite",
            "layer_kind": "object",
            "key_color": "#FF00FF"
        }))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse JSON");

    assert_eq!(body["mime_type"], "image/jpeg");
    assert_eq!(body["key_color"], "#FF00FF");
    assert_eq!(body["image_base64"], "/9j/4A==");
}

#[tokio::test]
async fn metrics_endpoint_exposes_request_counters() {
    let port = spawn_app(None).await;
    let client = Client::new();

    let text = client
        .get(format!("http://127.0.0.1:{}/metrics", port))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request")
        .text()
        .await
        .expect("Failed to read body");

    assert!(text.contains("http_requests_total"));
}
