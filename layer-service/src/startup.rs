//! Application startup and lifecycle management.

use crate::config::LayerConfig;
use crate::error::GenerationError;
use crate::handlers::{
    decompose::decompose_scene, generate::generate_layer, health::health_check, index::index,
    metrics::metrics,
};
use crate::middleware::metrics::metrics_middleware;
use crate::services::metrics::init_metrics;
use crate::services::providers::gemini::{GeminiConfig, GeminiProvider};
use crate::services::ContentProvider;
use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{request_id_middleware, REQUEST_ID_HEADER};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

/// Shared application state.
///
/// `provider` is built once at startup and only read afterwards; it is
/// `None` when no API key is configured.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<LayerConfig>,
    pub provider: Option<Arc<dyn ContentProvider>>,
}

impl AppState {
    pub fn new(config: LayerConfig, provider: Option<Arc<dyn ContentProvider>>) -> Self {
        Self {
            config: Arc::new(config),
            provider,
        }
    }

    pub fn require_provider(&self) -> Result<&Arc<dyn ContentProvider>, GenerationError> {
        self.provider
            .as_ref()
            .ok_or(GenerationError::MissingCredential)
    }
}

/// Build the Gemini provider when a key is configured.
pub fn build_provider(
    config: &LayerConfig,
) -> Result<Option<Arc<dyn ContentProvider>>, AppError> {
    let Some(api_key) = config.google.api_key.clone() else {
        tracing::warn!("GEMINI_API_KEY is not set; generation endpoints are disabled");
        return Ok(None);
    };

    let provider = GeminiProvider::new(GeminiConfig {
        api_key,
        api_base: config.google.api_base.clone(),
        text_model: config.models.text_model.clone(),
        image_model: config.models.image_model.clone(),
        timeout: config.request_timeout(),
    })
    .map_err(|e| AppError::ConfigError(anyhow::anyhow!(e)))?;

    tracing::info!(
        text_model = %config.models.text_model,
        image_model = %config.models.image_model,
        "Initialized Gemini provider"
    );

    Ok(Some(Arc::new(provider)))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .route("/decompose_scene", post(decompose_scene))
        .route("/generate_layer", post(generate_layer))
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application, creating the Gemini provider from `config`.
    pub async fn build(config: LayerConfig) -> Result<Self, AppError> {
        let provider = build_provider(&config)?;
        Self::build_with_provider(config, provider).await
    }

    /// Build the application around an already constructed provider.
    pub async fn build_with_provider(
        config: LayerConfig,
        provider: Option<Arc<dyn ContentProvider>>,
    ) -> Result<Self, AppError> {
        init_metrics().map_err(|e| AppError::InternalError(anyhow::anyhow!(e)))?;

        // Port 0 = random port for testing
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(
            port,
            has_key = provider.is_some(),
            "Layer service listening"
        );

        Ok(Self {
            port,
            listener,
            state: AppState::new(config, provider),
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until a shutdown signal arrives.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);

        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                e
            })
    }
}
