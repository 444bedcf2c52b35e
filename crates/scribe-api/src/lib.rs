//! # Scribe API
//!
//! Self-hosted translation endpoint. Clients post text and a target
//! language; the server asks a Hugging Face hosted instruction model for a
//! translation that keeps the original style.
//!
//! ```text
//! POST /api/translate   {"text", "target_language"} -> {"translation"}
//! GET  /health          -> {"status": "ok", "model"}
//! ```

pub mod error;
pub mod http;
pub mod server;
pub mod state;
pub mod translate;

pub use error::ApiError;
pub use http::handlers::{HealthResponse, TranslateRequest, TranslateResponse};
pub use http::routes::create_router;
pub use server::TranslateServer;
pub use state::AppState;
