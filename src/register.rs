//! Provider registration for Scribe.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use scribe_config::{ProviderConfig, ProvidersConfig};
use scribe_core::ProviderRegistry;
use scribe_provider_gemini::{GeminiConfig, GeminiProvider};
use scribe_provider_huggingface::{HuggingFaceConfig, HuggingFaceProvider};

/// Build a registry holding both backends.
pub(crate) fn build_registry(
    config: &ProvidersConfig,
) -> Result<Arc<ProviderRegistry>, Box<dyn std::error::Error>> {
    let registry = ProviderRegistry::new();

    let gemini = GeminiProvider::new(gemini_config(&config.gemini))?;
    info!("Registered Gemini provider (model={})", gemini.model());
    registry.register(Arc::new(gemini))?;

    let huggingface = HuggingFaceProvider::new(huggingface_config(&config.huggingface))?;
    info!("Registered HuggingFace provider");
    registry.register(Arc::new(huggingface))?;

    Ok(Arc::new(registry))
}

fn gemini_config(config: &ProviderConfig) -> GeminiConfig {
    let defaults = GeminiConfig::default();
    GeminiConfig {
        base_url: config.base_url.clone(),
        model: config.model.clone().unwrap_or(defaults.model),
        temperature: config.temperature,
        max_output_tokens: config.max_output_tokens,
        timeout: Duration::from_secs(config.timeout_secs),
    }
}

pub(crate) fn huggingface_config(config: &ProviderConfig) -> HuggingFaceConfig {
    HuggingFaceConfig {
        base_url: config.base_url.clone(),
        model: config.model.clone(),
        temperature: config.temperature,
        max_new_tokens: config.max_output_tokens,
        timeout: Duration::from_secs(config.timeout_secs),
    }
}
