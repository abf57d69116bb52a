pub mod image_extractor;
pub mod metrics;
pub mod prompt;
pub mod providers;

pub use image_extractor::extract_image_base64;
pub use providers::{ContentProvider, ProviderError};
