//! # Scribe Config
//!
//! Application configuration and settings storage for Scribe.

mod error;
mod loader;
mod schema;
mod store;
mod validator;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
pub use store::{FileSettingsStore, MemorySettingsStore, seed_defaults};
pub use validator::{ConfigValidator, ValidationError, ValidationResult, ValidationWarning};
