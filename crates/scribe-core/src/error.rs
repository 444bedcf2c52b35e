//! Registry errors.

use scribe_protocols::ProviderId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Provider already registered: {0}")]
    AlreadyRegistered(ProviderId),

    #[error("Provider not registered: {0}")]
    NotRegistered(ProviderId),
}
