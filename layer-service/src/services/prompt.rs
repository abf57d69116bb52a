//! Prompt construction for scene decomposition and layer rendering.
//!
//! Everything here is plain concatenation: user text is never trimmed or
//! escaped.

const DECOMPOSE_PREFIX: &str =
    "Split the scene into layers: one 'background', the rest 'object'. Scene: ";

const BACKGROUND_RULES: &str = "\nRules: Background only, no main subjects, highly detailed.";

/// Which rendering rules a layer gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    Background,
    Object,
}

impl LayerKind {
    /// Only the exact label `"background"` selects the background rules;
    /// any other label, including typos and other casings, is an object.
    pub fn classify(label: &str) -> Self {
        if label == "background" {
            LayerKind::Background
        } else {
            LayerKind::Object
        }
    }
}

pub fn decomposition_prompt(scene: &str) -> String {
    format!("{}{}", DECOMPOSE_PREFIX, scene)
}

/// The request's key color unless it is missing or empty.
pub fn resolve_key_color<'a>(requested: Option<&'a str>, default: &'a str) -> &'a str {
    requested.filter(|color| !color.is_empty()).unwrap_or(default)
}

pub fn layer_prompt(prompt: &str, kind: LayerKind, key_color: &str) -> String {
    match kind {
        LayerKind::Background => format!("{}{}", prompt, BACKGROUND_RULES),
        LayerKind::Object => format!(
            "{}\nSTRICT RULES: One single object. Background MUST be perfectly solid {} with NO shadows and NO gradients.",
            prompt, key_color
        ),
    }
}
