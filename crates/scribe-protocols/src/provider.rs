//! Text provider trait definition.

use async_trait::async_trait;

use crate::error::ProviderError;
use crate::settings::{ProviderId, Settings};

/// Core trait for remote text-generation backends.
///
/// A provider owns all knowledge of its wire format: request construction,
/// authentication, and extraction of the generated text.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Returns the provider ID.
    fn id(&self) -> ProviderId;

    /// Rewrite `text` into the configured target language.
    ///
    /// Returns `Ok(None)` when the response lacks the expected field, which
    /// callers treat as "no suggestion produced" rather than a failure.
    async fn generate(
        &self,
        text: &str,
        settings: &Settings,
    ) -> Result<Option<String>, ProviderError>;

    /// Issue a minimal request to verify the API key is accepted.
    async fn test_connection(&self, api_key: &str) -> Result<(), ProviderError>;
}
