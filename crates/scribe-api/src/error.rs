//! API error types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use scribe_protocols::ProviderError;

/// Detail returned to clients when generation fails for any reason.
pub const GENERATION_FAILED_DETAIL: &str = "Error while generating text";

#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend call failed.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// The backend answered without any generated text.
    #[error("Model returned no text")]
    EmptyGeneration,

    /// No Hugging Face token was supplied at startup.
    #[error("HF_TOKEN is not set; the server cannot reach Hugging Face")]
    MissingToken,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": GENERATION_FAILED_DETAIL })),
        )
            .into_response()
    }
}
