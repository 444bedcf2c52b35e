//! Error types for the Scribe protocol layer.

mod provider;
mod store;

pub use provider::*;
pub use store::*;
