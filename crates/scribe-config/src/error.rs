//! Configuration errors.

use scribe_protocols::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(String),

    #[error("Invalid config format: {0}")]
    InvalidFormat(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Environment variable not set: {0}")]
    EnvVarNotSet(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<ConfigError> for StoreError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Store(inner) => inner,
            ConfigError::Io(e) => StoreError::Io(e.to_string()),
            ConfigError::InvalidValue { field, message } => StoreError::InvalidValue {
                key: field,
                message,
            },
            other => StoreError::Format(other.to_string()),
        }
    }
}
