//! Registries.

mod provider;

pub use provider::ProviderRegistry;
