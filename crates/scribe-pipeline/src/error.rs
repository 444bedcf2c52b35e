//! Pipeline errors.

use scribe_protocols::{ProviderError, StoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// No API key is configured; nothing is sent and nothing is shown.
    #[error("API key not configured")]
    MissingCredential,

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("Settings store error: {0}")]
    Store(#[from] StoreError),
}
