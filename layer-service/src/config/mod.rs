use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Chroma-key color used for object layers when the request names none.
pub const DEFAULT_KEY_COLOR: &str = "#00FF00";

/// Gemini REST API base URL.
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Clone)]
pub struct LayerConfig {
    pub common: core_config::Config,
    pub models: ModelConfig,
    pub google: GoogleConfig,
    pub layers: LayerDefaults,
    pub frontend: FrontendConfig,
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Model for scene decomposition (structured JSON output)
    pub text_model: String,
    /// Model for layer image generation
    pub image_model: String,
}

#[derive(Debug, Clone)]
pub struct GoogleConfig {
    /// Absent when the service runs without a credential.
    pub api_key: Option<String>,
    pub api_base: String,
    /// No timeout when unset; a hung provider call holds its request open.
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct LayerDefaults {
    pub key_color: String,
}

#[derive(Debug, Clone)]
pub struct FrontendConfig {
    pub index_path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    pub otlp_endpoint: Option<String>,
}

impl LayerConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(LayerConfig {
            common: common_config,
            models: ModelConfig {
                text_model: get_env("GENAI_TEXT_MODEL", Some("gemini-2.5-flash"), is_prod)?,
                image_model: get_env("GENAI_IMAGE_MODEL", Some("gemini-2.5-flash"), is_prod)?,
            },
            google: GoogleConfig {
                api_key: get_optional_env("GEMINI_API_KEY"),
                api_base: get_env("GENAI_API_BASE", Some(DEFAULT_API_BASE), false)?,
                request_timeout_secs: get_optional_env("GENAI_REQUEST_TIMEOUT_SECS")
                    .map(|raw| {
                        raw.parse().map_err(|e| {
                            AppError::ConfigError(anyhow::anyhow!(
                                "GENAI_REQUEST_TIMEOUT_SECS must be a whole number of seconds: {}",
                                e
                            ))
                        })
                    })
                    .transpose()?,
            },
            layers: LayerDefaults {
                key_color: get_env("LAYER_KEY_COLOR", Some(DEFAULT_KEY_COLOR), false)?,
            },
            frontend: FrontendConfig {
                index_path: get_env(
                    "FRONTEND_INDEX_PATH",
                    Some("layer-service/static/index.html"),
                    false,
                )?
                .into(),
            },
            observability: ObservabilityConfig {
                otlp_endpoint: get_optional_env("OTLP_ENDPOINT"),
            },
        })
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.google.request_timeout_secs.map(Duration::from_secs)
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    resolve_env(key, env::var(key).ok(), default, is_prod)
}

fn get_optional_env(key: &str) -> Option<String> {
    non_empty(env::var(key).ok())
}

/// Unset and empty values both read as absent; whitespace counts as a value.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn resolve_env(
    key: &str,
    value: Option<String>,
    default: Option<&str>,
    is_prod: bool,
) -> Result<String, AppError> {
    match value {
        Some(val) => Ok(val),
        None => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
