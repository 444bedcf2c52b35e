//! Provider registry for managing text-generation backends.

use dashmap::DashMap;
use std::sync::Arc;

use tracing::{debug, info};

use scribe_protocols::{ProviderError, ProviderId, Settings, TextProvider};

use crate::error::RegistryError;

/// Registry for managing text providers, keyed by provider id.
pub struct ProviderRegistry {
    providers: DashMap<ProviderId, Arc<dyn TextProvider>>,
}

impl ProviderRegistry {
    /// Create a new provider registry.
    pub fn new() -> Self {
        Self {
            providers: DashMap::new(),
        }
    }

    /// Register a provider.
    pub fn register(&self, provider: Arc<dyn TextProvider>) -> Result<(), RegistryError> {
        let id = provider.id();

        if self.providers.contains_key(&id) {
            return Err(RegistryError::AlreadyRegistered(id));
        }

        debug!("Registered provider {}", id);
        self.providers.insert(id, provider);
        Ok(())
    }

    /// Unregister a provider.
    pub fn unregister(&self, id: ProviderId) -> Result<(), RegistryError> {
        self.providers
            .remove(&id)
            .ok_or(RegistryError::NotRegistered(id))?;
        Ok(())
    }

    /// Get a provider by ID.
    pub fn get(&self, id: ProviderId) -> Option<Arc<dyn TextProvider>> {
        self.providers.get(&id).map(|p| p.clone())
    }

    /// List all provider IDs.
    pub fn list_ids(&self) -> Vec<ProviderId> {
        self.providers.iter().map(|p| *p.key()).collect()
    }

    /// Generate a suggestion with the provider selected in `settings`.
    ///
    /// This is the only place that knows how a provider is chosen; callers
    /// see one contract regardless of the backend's wire format.
    pub async fn generate(
        &self,
        text: &str,
        settings: &Settings,
    ) -> Result<Option<String>, ProviderError> {
        let provider = self.resolve(settings.api_provider)?;
        info!(
            "Generating with {} ({} chars, target={})",
            settings.api_provider,
            text.len(),
            settings.target_language
        );
        provider.generate(text, settings).await
    }

    /// Check that `api_key` is accepted by the given provider.
    pub async fn test_connection(
        &self,
        id: ProviderId,
        api_key: &str,
    ) -> Result<(), ProviderError> {
        self.resolve(id)?.test_connection(api_key).await
    }

    fn resolve(&self, id: ProviderId) -> Result<Arc<dyn TextProvider>, ProviderError> {
        self.get(id)
            .ok_or_else(|| ProviderError::NotFound(id.to_string()))
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
