//! Configuration and settings validation.

use scribe_protocols::{ProviderId, SettingKey, Settings};

use crate::error::ConfigError;
use crate::schema::{Config, ProviderConfig};

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Convert the first error into a [`ConfigError`].
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        match self.errors.into_iter().next() {
            Some(error) => Err(ConfigError::InvalidValue {
                field: error.path,
                message: error.message,
            }),
            None => Ok(self.warnings),
        }
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the application configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_pipeline(config, &mut result);
        Self::validate_presenter(config, &mut result);
        Self::validate_provider("providers.gemini", &config.providers.gemini, &mut result);
        Self::validate_provider(
            "providers.huggingface",
            &config.providers.huggingface,
            &mut result,
        );
        Self::validate_server(config, &mut result);

        result
    }

    /// Validate user settings before they are saved.
    pub fn validate_settings(settings: &Settings) -> ValidationResult {
        let mut result = ValidationResult::default();

        if settings.api_key.trim().is_empty() {
            let message = match settings.api_provider {
                ProviderId::Gemini => "Please enter a Gemini API key",
                ProviderId::HuggingFace => "Please enter a Hugging Face API key",
            };
            result.add_error(ValidationError::new(SettingKey::ApiKey.as_str(), message));
        }

        if settings.target_language.trim().is_empty() {
            result.add_error(ValidationError::new(
                SettingKey::TargetLanguage.as_str(),
                "Target language cannot be empty",
            ));
        }

        if settings.api_provider == ProviderId::HuggingFace && !settings.model_id.contains('/') {
            result.add_warning(ValidationWarning::new(
                SettingKey::ModelId.as_str(),
                "Hugging Face model ids usually look like 'owner/model'",
            ));
        }

        result
    }

    fn validate_pipeline(config: &Config, result: &mut ValidationResult) {
        if config.pipeline.debounce_ms == 0 {
            result.add_error(ValidationError::new(
                "pipeline.debounce_ms",
                "debounce_ms must be greater than 0",
            ));
        } else if config.pipeline.debounce_ms < 200 {
            result.add_warning(ValidationWarning::new(
                "pipeline.debounce_ms",
                "debounce_ms below 200 sends a request for nearly every keystroke",
            ));
        }

        if config.pipeline.min_words == 0 {
            result.add_error(ValidationError::new(
                "pipeline.min_words",
                "min_words must be at least 1",
            ));
        }
    }

    fn validate_presenter(config: &Config, result: &mut ValidationResult) {
        if config.presenter.success_toast_ms == 0 {
            result.add_error(ValidationError::new(
                "presenter.success_toast_ms",
                "success_toast_ms must be greater than 0",
            ));
        }
        if config.presenter.error_toast_ms == 0 {
            result.add_error(ValidationError::new(
                "presenter.error_toast_ms",
                "error_toast_ms must be greater than 0",
            ));
        }
    }

    fn validate_server(config: &Config, result: &mut ValidationResult) {
        if config.server.host.trim().is_empty() {
            result.add_error(ValidationError::new("server.host", "host cannot be empty"));
        }
        if !config.server.model.contains('/') {
            result.add_warning(ValidationWarning::new(
                "server.model",
                "Hugging Face model ids usually look like 'owner/model'",
            ));
        }
    }

    fn validate_provider(path: &str, provider: &ProviderConfig, result: &mut ValidationResult) {
        if !(provider.base_url.starts_with("http://") || provider.base_url.starts_with("https://"))
        {
            result.add_error(ValidationError::new(
                format!("{}.base_url", path),
                "base_url must be an http(s) URL",
            ));
        }

        if !(0.0..=2.0).contains(&provider.temperature) {
            result.add_error(ValidationError::new(
                format!("{}.temperature", path),
                "temperature must be between 0.0 and 2.0",
            ));
        }

        if provider.max_output_tokens == 0 {
            result.add_error(ValidationError::new(
                format!("{}.max_output_tokens", path),
                "max_output_tokens must be greater than 0",
            ));
        }

        if provider.timeout_secs == 0 {
            result.add_error(ValidationError::new(
                format!("{}.timeout_secs", path),
                "timeout_secs must be greater than 0",
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
