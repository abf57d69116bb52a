use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// MIME type reported for every generated layer image.
pub const IMAGE_MIME_TYPE: &str = "image/jpeg";

/// Body of `POST /decompose_scene`.
#[derive(Debug, Clone, Deserialize)]
pub struct SceneRequest {
    pub prompt: String,
}

/// Body of `POST /generate_layer`.
///
/// `layer_kind` stays an open string: only the exact value `"background"`
/// is special, everything else is rendered as an object layer.
#[derive(Debug, Clone, Deserialize)]
pub struct LayerRequest {
    pub prompt: String,
    pub layer_name: String,
    pub layer_kind: String,
    #[serde(default)]
    pub key_color: Option<String>,
}

/// One layer of a decomposed scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerItem {
    pub name: String,
    pub role: String,
    pub kind: String,
    pub prompt: String,
}

/// Shape the provider is asked to produce for a decomposition.
///
/// The provider's text is relayed as-is; this type exists for the schema
/// and for clients that want to parse the relayed JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecomposeResult {
    pub layers: Vec<LayerItem>,
}

impl DecomposeResult {
    /// Response schema in the OpenAPI subset accepted by `generationConfig.responseSchema`.
    pub fn response_schema() -> Value {
        json!({
            "type": "OBJECT",
            "properties": {
                "layers": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "name": { "type": "STRING" },
                            "role": { "type": "STRING" },
                            "kind": { "type": "STRING" },
                            "prompt": { "type": "STRING" },
                        },
                        "required": ["name", "role", "kind", "prompt"],
                        "propertyOrdering": ["name", "role", "kind", "prompt"],
                    },
                },
            },
            "required": ["layers"],
        })
    }
}

/// Successful body of `POST /generate_layer`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedImage {
    pub image_base64: String,
    pub mime_type: String,
    pub key_color: String,
}

impl GeneratedImage {
    pub fn jpeg(image_base64: String, key_color: String) -> Self {
        Self {
            image_base64,
            mime_type: IMAGE_MIME_TYPE.to_string(),
            key_color,
        }
    }
}
