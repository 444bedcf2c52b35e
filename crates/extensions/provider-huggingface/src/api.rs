//! Hugging Face Inference API types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

const ECHO_LABEL: &str = "Rewritten:";

/// Text-generation request.
#[derive(Debug, Serialize)]
pub struct ApiRequest {
    pub inputs: String,
    pub parameters: GenerationParameters,
}

/// Generation parameters.
#[derive(Debug, Serialize)]
pub struct GenerationParameters {
    pub max_new_tokens: u32,
    pub temperature: f32,
    pub return_full_text: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub do_sample: Option<bool>,
}

/// Error body returned by the Inference API.
#[derive(Debug, Deserialize)]
pub struct ApiError {
    pub error: String,
    #[serde(default)]
    pub estimated_time: Option<f64>,
}

/// Extract `[0].generated_text` from a response body.
///
/// The text is trimmed and a leading `Rewritten:` label echoed from the
/// prompt is removed. Returns `None` if the field is absent or empty.
pub fn extract_generated_text(body: &Value) -> Option<String> {
    let text = body.get(0)?.get("generated_text")?.as_str()?.trim();
    let text = strip_echo_label(text).trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

fn strip_echo_label(text: &str) -> &str {
    match text.get(..ECHO_LABEL.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(ECHO_LABEL) => &text[ECHO_LABEL.len()..],
        _ => text,
    }
}

#[cfg(test)]
#[path = "api_tests.rs"]
mod tests;
