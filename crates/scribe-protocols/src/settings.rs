//! User settings and the settings store protocol.
//!
//! Settings are a small key-value mapping persisted by the host. The pipeline
//! reads them through [`SettingsStore`] and keeps an in-memory [`Settings`]
//! snapshot that is updated in place from change notifications.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::error::StoreError;

/// Default language suggestions are rewritten into.
pub const DEFAULT_TARGET_LANGUAGE: &str = "English";

/// Default model for the Hugging Face backend.
pub const DEFAULT_MODEL_ID: &str = "mistralai/Mixtral-8x7B-Instruct-v0.1";

/// Remote text-generation backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    /// Google Gemini, the primary backend.
    #[default]
    #[serde(alias = "primary")]
    Gemini,
    /// Hugging Face Inference API, the secondary backend.
    #[serde(alias = "secondary")]
    HuggingFace,
}

impl ProviderId {
    pub const ALL: [ProviderId; 2] = [ProviderId::Gemini, ProviderId::HuggingFace];

    /// Parse a provider id. Accepts the backend names and the
    /// `primary`/`secondary` role names.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "gemini" | "primary" => Some(ProviderId::Gemini),
            "huggingface" | "secondary" => Some(ProviderId::HuggingFace),
            _ => None,
        }
    }

    /// Stable identifier used in the settings store and the registry.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Gemini => "gemini",
            ProviderId::HuggingFace => "huggingface",
        }
    }

    /// Human-readable name used in error messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderId::Gemini => "Gemini",
            ProviderId::HuggingFace => "HuggingFace",
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key of a single entry in the settings store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SettingKey {
    TargetLanguage,
    ApiKey,
    ApiProvider,
    ModelId,
    /// Hugging Face key kept while another backend is active.
    HfApiKey,
}

impl SettingKey {
    pub const ALL: [SettingKey; 5] = [
        SettingKey::TargetLanguage,
        SettingKey::ApiKey,
        SettingKey::ApiProvider,
        SettingKey::ModelId,
        SettingKey::HfApiKey,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SettingKey::TargetLanguage => "targetLanguage",
            SettingKey::ApiKey => "apiKey",
            SettingKey::ApiProvider => "apiProvider",
            SettingKey::ModelId => "modelId",
            SettingKey::HfApiKey => "hfApiKey",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == s)
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Process-wide user settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub target_language: String,
    /// Key for the active backend.
    pub api_key: String,
    pub api_provider: ProviderId,
    /// Model used by the Hugging Face backend.
    pub model_id: String,
    pub hf_api_key: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            target_language: DEFAULT_TARGET_LANGUAGE.to_string(),
            api_key: String::new(),
            api_provider: ProviderId::default(),
            model_id: DEFAULT_MODEL_ID.to_string(),
            hf_api_key: String::new(),
        }
    }
}

impl Settings {
    /// Build settings from raw store values, falling back to defaults for
    /// missing or empty entries.
    pub fn from_values(values: &HashMap<SettingKey, String>) -> Result<Self, StoreError> {
        let mut settings = Settings::default();
        settings.apply(values)?;
        Ok(settings)
    }

    /// Raw store values for every key.
    pub fn to_values(&self) -> HashMap<SettingKey, String> {
        let mut values = HashMap::new();
        values.insert(SettingKey::TargetLanguage, self.target_language.clone());
        values.insert(SettingKey::ApiKey, self.api_key.clone());
        values.insert(SettingKey::ApiProvider, self.api_provider.to_string());
        values.insert(SettingKey::ModelId, self.model_id.clone());
        values.insert(SettingKey::HfApiKey, self.hf_api_key.clone());
        values
    }

    /// Apply a set of changed values in place.
    ///
    /// The provider is validated before anything is written, so an invalid
    /// change leaves the settings untouched. Empty language and model values
    /// fall back to their defaults; an empty API key clears the credential.
    pub fn apply(&mut self, values: &HashMap<SettingKey, String>) -> Result<(), StoreError> {
        let provider = match values.get(&SettingKey::ApiProvider) {
            Some(raw) if !raw.trim().is_empty() => {
                Some(ProviderId::parse(raw).ok_or_else(|| StoreError::InvalidValue {
                    key: SettingKey::ApiProvider.to_string(),
                    message: format!("unknown provider '{}'", raw),
                })?)
            }
            _ => None,
        };

        if let Some(provider) = provider {
            self.api_provider = provider;
        }
        if let Some(language) = values.get(&SettingKey::TargetLanguage) {
            self.target_language = non_empty_or(language, DEFAULT_TARGET_LANGUAGE);
        }
        if let Some(model) = values.get(&SettingKey::ModelId) {
            self.model_id = non_empty_or(model, DEFAULT_MODEL_ID);
        }
        if let Some(key) = values.get(&SettingKey::ApiKey) {
            self.api_key = key.trim().to_string();
        }
        if let Some(key) = values.get(&SettingKey::HfApiKey) {
            self.hf_api_key = key.trim().to_string();
        }
        Ok(())
    }

    /// Whether a network call may be attempted.
    pub fn has_credentials(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// API key with everything but the last four characters hidden.
    pub fn masked_api_key(&self) -> String {
        mask(&self.api_key)
    }

    pub fn masked_hf_api_key(&self) -> String {
        mask(&self.hf_api_key)
    }

    /// Values to write alongside `changes` so the active key and the stored
    /// Hugging Face key stay linked.
    ///
    /// With the Hugging Face backend selected both keys hold the same value:
    /// an explicit key wins, otherwise the stored Hugging Face key is
    /// reactivated. With any other backend the Hugging Face key is only
    /// touched when given explicitly. Returns `changes` extended as needed.
    pub fn link_provider_keys(
        &self,
        mut changes: HashMap<SettingKey, String>,
    ) -> HashMap<SettingKey, String> {
        let touches_keys = [SettingKey::ApiKey, SettingKey::HfApiKey, SettingKey::ApiProvider]
            .iter()
            .any(|k| changes.contains_key(k));
        if !touches_keys {
            return changes;
        }

        let provider = changes
            .get(&SettingKey::ApiProvider)
            .and_then(|raw| ProviderId::parse(raw))
            .unwrap_or(self.api_provider);
        if provider != ProviderId::HuggingFace {
            return changes;
        }

        let explicit = |key: SettingKey| {
            changes
                .get(&key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let key = explicit(SettingKey::ApiKey)
            .or_else(|| explicit(SettingKey::HfApiKey))
            .or_else(|| Some(self.hf_api_key.clone()).filter(|v| !v.is_empty()))
            .unwrap_or_else(|| self.api_key.clone());

        if !key.is_empty() {
            changes.insert(SettingKey::ApiKey, key.clone());
            changes.insert(SettingKey::HfApiKey, key);
        }
        changes
    }
}

fn mask(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.is_empty() {
        return "(not set)".to_string();
    }
    let visible = chars.len().min(4);
    let tail: String = chars[chars.len() - visible..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - visible), tail)
}

fn non_empty_or(value: &str, default: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Notification that one or more settings were written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsChange {
    /// New values of the keys that were written.
    pub values: HashMap<SettingKey, String>,
}

impl SettingsChange {
    pub fn new(values: HashMap<SettingKey, String>) -> Self {
        Self { values }
    }

    pub fn contains(&self, key: SettingKey) -> bool {
        self.values.contains_key(&key)
    }
}

/// Persisted key-value settings store.
pub trait SettingsStore: Send + Sync {
    /// Read the requested keys. Keys that were never written are absent.
    fn get(&self, keys: &[SettingKey]) -> Result<HashMap<SettingKey, String>, StoreError>;

    /// Write values and notify subscribers.
    fn set(&self, values: HashMap<SettingKey, String>) -> Result<(), StoreError>;

    /// Subscribe to change notifications.
    fn subscribe(&self) -> broadcast::Receiver<SettingsChange>;

    /// Read every key and build a [`Settings`] snapshot.
    fn load(&self) -> Result<Settings, StoreError> {
        let values = self.get(&SettingKey::ALL)?;
        Settings::from_values(&values)
    }
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
