//! Translation prompt and response handling for chat-tuned models.

use serde_json::Value;

use scribe_provider_huggingface::{ApiRequest, GenerationParameters};

/// Marker after which the model's reply starts.
pub const ASSISTANT_MARKER: &str = "<|assistant|>";

const MAX_NEW_TOKENS: u32 = 256;
const TEMPERATURE: f32 = 0.7;

/// Chat-formatted prompt asking for a style-preserving translation.
pub fn build_prompt(text: &str, target_language: &str) -> String {
    format!(
        "<|user|>Translate the following text into {} and keep the original style: '{}'<|end|>\n{}",
        target_language, text, ASSISTANT_MARKER
    )
}

/// Sampled generation request for `text`. The full text is requested back
/// so the reply can be cut at the assistant marker.
pub fn translation_request(text: &str, target_language: &str) -> ApiRequest {
    ApiRequest {
        inputs: build_prompt(text, target_language),
        parameters: GenerationParameters {
            max_new_tokens: MAX_NEW_TOKENS,
            temperature: TEMPERATURE,
            return_full_text: true,
            do_sample: Some(true),
        },
    }
}

/// Text after the last assistant marker of `[0].generated_text`, trimmed.
///
/// A body without the marker is returned whole. `None` if the field is
/// missing or the reply is empty.
pub fn extract_translation(body: &Value) -> Option<String> {
    let generated = body.get(0)?.get("generated_text")?.as_str()?;
    let reply = generated
        .rsplit(ASSISTANT_MARKER)
        .next()
        .unwrap_or(generated)
        .trim();
    if reply.is_empty() {
        None
    } else {
        Some(reply.to_string())
    }
}

#[cfg(test)]
#[path = "translate_tests.rs"]
mod tests;
