//! Hugging Face provider implementation.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, error, info};

use scribe_protocols::settings::DEFAULT_MODEL_ID;
use scribe_protocols::{ProviderError, ProviderId, Settings, TextProvider};

use crate::api::{ApiError, ApiRequest, GenerationParameters, extract_generated_text};

const DEFAULT_BASE_URL: &str = "https://api-inference.huggingface.co";

/// Hugging Face endpoint and generation parameters.
#[derive(Debug, Clone)]
pub struct HuggingFaceConfig {
    pub base_url: String,
    /// Fixed model overriding the `modelId` setting.
    pub model: Option<String>,
    pub temperature: f32,
    pub max_new_tokens: u32,
    pub timeout: Duration,
}

impl Default for HuggingFaceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: None,
            temperature: 0.1,
            max_new_tokens: 150,
            timeout: Duration::from_secs(30),
        }
    }
}

/// Hugging Face Inference API provider.
pub struct HuggingFaceProvider {
    client: reqwest::Client,
    base_url: String,
    config: HuggingFaceConfig,
}

impl HuggingFaceProvider {
    pub fn new(config: HuggingFaceConfig) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(config.timeout)
            .build()
            .map_err(|e| ProviderError::ClientBuild(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            config,
        })
    }

    /// Prompt with the instruction inlined, ending in the label the model
    /// is expected to continue from.
    pub(crate) fn build_prompt(text: &str, target_language: &str) -> String {
        format!(
            "Rewrite into perfect {}: {}\n\nRewritten:",
            target_language, text
        )
    }

    fn model_for<'a>(&'a self, settings_model: &'a str) -> &'a str {
        match self.config.model.as_deref() {
            Some(model) => model,
            None if settings_model.is_empty() => DEFAULT_MODEL_ID,
            None => settings_model,
        }
    }

    fn build_request(&self, inputs: String, max_new_tokens: u32) -> ApiRequest {
        ApiRequest {
            inputs,
            parameters: GenerationParameters {
                max_new_tokens,
                temperature: self.config.temperature,
                return_full_text: false,
                do_sample: None,
            },
        }
    }

    /// Send a raw text-generation request to `model` and return the JSON
    /// body.
    pub async fn complete(
        &self,
        model: &str,
        api_key: &str,
        request: &ApiRequest,
    ) -> Result<serde_json::Value, ProviderError> {
        let url = format!("{}/models/{}", self.base_url, model);
        debug!("HuggingFace request: model={}", model);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!("HuggingFace API request failed: {}", e);
                ProviderError::Network(e.to_string())
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !status.is_success() {
            match serde_json::from_str::<ApiError>(&body) {
                Ok(ApiError {
                    error: message,
                    estimated_time: Some(eta),
                }) => error!(
                    "HuggingFace API error: status={}, message={}, estimated_time={}s",
                    status, message, eta
                ),
                Ok(e) => error!("HuggingFace API error: status={}, message={}", status, e.error),
                Err(_) => error!("HuggingFace API error: status={}, body={}", status, body),
            }
            return Err(ProviderError::Http {
                provider: ProviderId::HuggingFace,
                status: status.as_u16(),
            });
        }

        serde_json::from_str(&body)
            .map_err(|e| ProviderError::Decode(format!("HuggingFace response: {}", e)))
    }
}

#[async_trait]
impl TextProvider for HuggingFaceProvider {
    fn id(&self) -> ProviderId {
        ProviderId::HuggingFace
    }

    async fn generate(
        &self,
        text: &str,
        settings: &Settings,
    ) -> Result<Option<String>, ProviderError> {
        let prompt = Self::build_prompt(text, &settings.target_language);
        let request = self.build_request(prompt, self.config.max_new_tokens);
        let model = self.model_for(&settings.model_id);

        let body = self.complete(model, &settings.api_key, &request).await?;
        let suggestion = extract_generated_text(&body);
        if suggestion.is_none() {
            debug!("HuggingFace response carried no generated_text");
        }
        Ok(suggestion)
    }

    async fn test_connection(&self, api_key: &str) -> Result<(), ProviderError> {
        info!("Testing HuggingFace API connection");

        let request = self.build_request("Say 'ok'".to_string(), 1);
        let model = self.model_for(DEFAULT_MODEL_ID);
        self.complete(model, api_key, &request).await?;

        info!("HuggingFace API connection test successful");
        Ok(())
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
