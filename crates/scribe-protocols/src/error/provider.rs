//! Text provider errors.

use thiserror::Error;

use crate::settings::ProviderId;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Provider not found: {0}")]
    NotFound(String),

    #[error("{} API error: {status}", .provider.display_name())]
    Http { provider: ProviderId, status: u16 },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),
}

impl ProviderError {
    /// HTTP status of a failed remote call, if the failure carried one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
