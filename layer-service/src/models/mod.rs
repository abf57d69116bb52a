//! Request and response shapes for the layer service.

pub mod layer;

pub use layer::{DecomposeResult, GeneratedImage, LayerItem, LayerRequest, SceneRequest};
