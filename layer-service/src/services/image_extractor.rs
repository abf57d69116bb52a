//! Pulls the first inline image out of a generation result.

use super::providers::{GenerationResult, InlinePayload};
use base64::{engine::general_purpose, Engine as _};

/// Base64 text of the first non-empty inline payload, searching candidates
/// in order and parts in order within each candidate.
///
/// Parts whose inline data carries no payload are skipped.
/// Returns `None` when nothing is found. A candidate without content, or
/// content without a parts list, ends the search with `None` as well.
pub fn extract_image_base64(result: &GenerationResult) -> Option<String> {
    for candidate in &result.candidates {
        let parts = candidate.content.as_ref()?.parts.as_ref()?;

        for part in parts {
            let Some(payload) = part.inline_data.as_ref().and_then(|i| i.data.as_ref()) else {
                continue;
            };

            if payload.is_empty() {
                continue;
            }

            return Some(match payload {
                InlinePayload::Encoded(text) => text.clone(),
                InlinePayload::Bytes(bytes) => general_purpose::STANDARD.encode(bytes),
            });
        }
    }

    None
}
