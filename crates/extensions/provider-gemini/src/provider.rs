//! Gemini text provider implementation.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info};

use scribe_protocols::{ProviderError, ProviderId, Settings, TextProvider};

use crate::client::GeminiClient;
use crate::types::*;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-2.0-flash-exp";
const CONNECTION_TEST_PROMPT: &str = "Say 'ok'";

/// Gemini endpoint and generation parameters.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub timeout: Duration,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.1,
            max_output_tokens: 150,
            timeout: Duration::from_secs(30),
        }
    }
}

/// Gemini text provider.
pub struct GeminiProvider {
    client: GeminiClient,
    config: GeminiConfig,
}

impl GeminiProvider {
    /// Create a new Gemini provider.
    pub fn new(config: GeminiConfig) -> Result<Self, ProviderError> {
        Ok(Self {
            client: GeminiClient::new(config.base_url.clone(), config.timeout)?,
            config,
        })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// System instruction carrying the target language and correction policy.
    pub(crate) fn system_instruction(target_language: &str) -> String {
        format!(
            "Rewrite this text into perfect {}. If in another language, translate. \
             If has errors, correct. If already perfect, return unchanged. \
             Output ONLY the text, no explanations.",
            target_language
        )
    }

    pub(crate) fn build_request(&self, text: &str, target_language: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content::text(text)],
            system_instruction: Some(Content::text(Self::system_instruction(target_language))),
            generation_config: Some(GenerationConfig {
                temperature: Some(self.config.temperature),
                max_output_tokens: Some(self.config.max_output_tokens),
            }),
        }
    }
}

#[async_trait]
impl TextProvider for GeminiProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Gemini
    }

    async fn generate(
        &self,
        text: &str,
        settings: &Settings,
    ) -> Result<Option<String>, ProviderError> {
        let request = self.build_request(text, &settings.target_language);
        let response = self
            .client
            .generate_content(&self.config.model, &settings.api_key, &request)
            .await?;

        let suggestion = response.first_text();
        if suggestion.is_none() {
            debug!("Gemini response carried no candidate text");
        }
        Ok(suggestion)
    }

    async fn test_connection(&self, api_key: &str) -> Result<(), ProviderError> {
        info!("Testing Gemini API connection");

        let request = GenerateContentRequest {
            contents: vec![Content::text(CONNECTION_TEST_PROMPT)],
            system_instruction: None,
            generation_config: Some(GenerationConfig {
                temperature: None,
                max_output_tokens: Some(5),
            }),
        };
        self.client
            .generate_content(&self.config.model, api_key, &request)
            .await?;

        info!("Gemini API connection test successful");
        Ok(())
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
