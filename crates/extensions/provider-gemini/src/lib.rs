//! # Scribe Provider - Gemini
//!
//! Google Gemini backend for Scribe (the primary provider).

mod client;
mod provider;
mod types;

pub use provider::{GeminiConfig, GeminiProvider};
pub use types::*;
