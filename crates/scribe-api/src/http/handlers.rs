//! Translation and health handlers.

use std::sync::Arc;

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::error::ApiError;
use crate::state::AppState;
use crate::translate::{extract_translation, translation_request};

#[derive(Debug, Deserialize)]
pub struct TranslateRequest {
    pub text: String,
    pub target_language: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TranslateResponse {
    pub translation: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub model: String,
}

/// Translate `text` into `target_language`, keeping its style.
pub async fn translate(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TranslateRequest>,
) -> Result<Json<TranslateResponse>, ApiError> {
    info!(
        "Translation request: {} chars -> {}",
        request.text.chars().count(),
        request.target_language
    );

    let body = state
        .provider
        .complete(
            &state.model,
            state.token(),
            &translation_request(&request.text, &request.target_language),
        )
        .await
        .map_err(|e| {
            error!("Translation failed: {}", e);
            ApiError::from(e)
        })?;

    match extract_translation(&body) {
        Some(translation) => {
            debug!("Translation ready: {} chars", translation.chars().count());
            Ok(Json(TranslateResponse { translation }))
        }
        None => {
            error!("Translation failed: model returned no text");
            Err(ApiError::EmptyGeneration)
        }
    }
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        model: state.model.clone(),
    })
}
