//! Configuration schema definitions.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub pipeline: PipelineConfig,

    #[serde(default)]
    pub presenter: PresenterConfig,

    #[serde(default)]
    pub providers: ProvidersConfig,

    #[serde(default)]
    pub settings: SettingsFileConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

/// Debounce and dedup tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Quiet period after the last input event before text is processed.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Minimum number of whitespace-separated words worth correcting.
    #[serde(default = "default_min_words")]
    pub min_words: usize,

    /// Drop results that arrive after focus moved to another element.
    #[serde(default)]
    pub discard_stale_responses: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            min_words: default_min_words(),
            discard_stale_responses: false,
        }
    }
}

fn default_debounce_ms() -> u64 {
    1000
}

fn default_min_words() -> usize {
    2
}

/// Overlay timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresenterConfig {
    #[serde(default = "default_success_toast_ms")]
    pub success_toast_ms: u64,

    #[serde(default = "default_error_toast_ms")]
    pub error_toast_ms: u64,
}

impl Default for PresenterConfig {
    fn default() -> Self {
        Self {
            success_toast_ms: default_success_toast_ms(),
            error_toast_ms: default_error_toast_ms(),
        }
    }
}

fn default_success_toast_ms() -> u64 {
    2000
}

fn default_error_toast_ms() -> u64 {
    3000
}

/// Per-backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvidersConfig {
    #[serde(default = "ProviderConfig::gemini")]
    pub gemini: ProviderConfig,

    #[serde(default = "ProviderConfig::huggingface")]
    pub huggingface: ProviderConfig,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            gemini: ProviderConfig::gemini(),
            huggingface: ProviderConfig::huggingface(),
        }
    }
}

/// Backend endpoint and generation parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub base_url: String,

    /// Fixed model. When unset the backend uses the `modelId` setting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ProviderConfig {
    pub fn gemini() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: Some("gemini-2.0-flash-exp".to_string()),
            temperature: default_temperature(),
            max_output_tokens: default_max_output_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }

    pub fn huggingface() -> Self {
        Self {
            base_url: "https://api-inference.huggingface.co".to_string(),
            model: None,
            temperature: default_temperature(),
            max_output_tokens: default_max_output_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_temperature() -> f32 {
    0.1
}

fn default_max_output_tokens() -> u32 {
    150
}

fn default_timeout_secs() -> u64 {
    30
}

/// Location of the persisted settings file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsFileConfig {
    #[serde(default = "default_settings_path")]
    pub path: String,
}

impl Default for SettingsFileConfig {
    fn default() -> Self {
        Self {
            path: default_settings_path(),
        }
    }
}

fn default_settings_path() -> String {
    "~/.scribe/settings.toml".to_string()
}

/// Self-hosted translation endpoint (`scribe serve`).
///
/// The Hugging Face token is never read from the file; it comes from the
/// `HF_TOKEN` environment variable or the command line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,

    #[serde(default = "default_server_port")]
    pub port: u16,

    /// Model the endpoint translates with.
    #[serde(default = "default_server_model")]
    pub model: String,
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            model: default_server_model(),
        }
    }
}

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    8000
}

fn default_server_model() -> String {
    "microsoft/Phi-3-mini-4k-instruct".to_string()
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
