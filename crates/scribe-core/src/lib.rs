//! # Scribe Core
//!
//! Provider registry and the single dispatch point that maps
//! `(text, settings)` to a backend by provider id.

mod error;
pub mod registry;

pub use error::RegistryError;
pub use registry::ProviderRegistry;
