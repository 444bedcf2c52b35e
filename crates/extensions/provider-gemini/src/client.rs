//! Gemini API client.

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, error};

use scribe_protocols::{ProviderError, ProviderId};

use crate::types::*;

/// Gemini API client.
pub struct GeminiClient {
    client: Client,
    base_url: String,
}

impl GeminiClient {
    /// Create a new Gemini client.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::ClientBuild(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Generate content (non-streaming).
    pub async fn generate_content(
        &self,
        model: &str,
        api_key: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ProviderError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, model);

        debug!("Gemini generate_content: model={}", model);

        let response = self
            .client
            .post(&url)
            .query(&[("key", api_key)])
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!("Gemini API request failed: {}", e);
                ProviderError::Network(e.to_string())
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !status.is_success() {
            match serde_json::from_str::<GeminiError>(&body) {
                Ok(e) => error!(
                    "Gemini API error: status={}, message={}",
                    status, e.error.message
                ),
                Err(_) => error!("Gemini API error: status={}, body={}", status, body),
            }
            return Err(ProviderError::Http {
                provider: ProviderId::Gemini,
                status: status.as_u16(),
            });
        }

        serde_json::from_str(&body)
            .map_err(|e| ProviderError::Decode(format!("Gemini response: {}", e)))
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
