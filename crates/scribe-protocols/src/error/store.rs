//! Settings store errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Settings store IO error: {0}")]
    Io(String),

    #[error("Settings store format error: {0}")]
    Format(String),

    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}
