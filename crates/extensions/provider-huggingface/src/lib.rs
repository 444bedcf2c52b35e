//! # Scribe Provider - Hugging Face
//!
//! Hugging Face Inference API backend for Scribe (the secondary provider).

mod api;
mod provider;

pub use api::{ApiRequest, GenerationParameters, extract_generated_text};
pub use provider::{HuggingFaceConfig, HuggingFaceProvider};
