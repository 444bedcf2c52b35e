//! Shared application state.

use scribe_provider_huggingface::HuggingFaceProvider;

use crate::error::ApiError;

/// State shared by every handler.
pub struct AppState {
    pub provider: HuggingFaceProvider,
    /// Model every translation is sent to.
    pub model: String,
    token: String,
}

impl AppState {
    /// Fails with [`ApiError::MissingToken`] if `token` is blank.
    pub fn new(
        provider: HuggingFaceProvider,
        model: impl Into<String>,
        token: impl Into<String>,
    ) -> Result<Self, ApiError> {
        let token = token.into().trim().to_string();
        if token.is_empty() {
            return Err(ApiError::MissingToken);
        }
        Ok(Self {
            provider,
            model: model.into(),
            token,
        })
    }

    pub(crate) fn token(&self) -> &str {
        &self.token
    }
}
