use super::*;

#[test]
fn test_default_config_is_valid() {
    let result = ConfigValidator::validate(&Config::default());
    assert!(result.is_valid());
    assert!(result.warnings.is_empty());
}

#[test]
fn test_zero_debounce_is_error() {
    let mut config = Config::default();
    config.pipeline.debounce_ms = 0;
    let result = ConfigValidator::validate(&config);
    assert!(!result.is_valid());
    assert_eq!(result.errors[0].path, "pipeline.debounce_ms");
}

#[test]
fn test_short_debounce_is_warning() {
    let mut config = Config::default();
    config.pipeline.debounce_ms = 50;
    let result = ConfigValidator::validate(&config);
    assert!(result.is_valid());
    assert_eq!(result.warnings.len(), 1);
}

#[test]
fn test_bad_base_url() {
    let mut config = Config::default();
    config.providers.huggingface.base_url = "api-inference.huggingface.co".to_string();
    let result = ConfigValidator::validate(&config);
    assert!(!result.is_valid());
    assert_eq!(result.errors[0].path, "providers.huggingface.base_url");
}

#[test]
fn test_temperature_out_of_range() {
    let mut config = Config::default();
    config.providers.gemini.temperature = 3.5;
    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "providers.gemini.temperature"));
}

#[test]
fn test_settings_missing_gemini_key() {
    let settings = Settings::default();
    let result = ConfigValidator::validate_settings(&settings);
    assert!(!result.is_valid());
    assert_eq!(result.errors[0].path, "apiKey");
    assert!(result.errors[0].message.contains("Gemini"));
}

#[test]
fn test_settings_missing_huggingface_key() {
    let settings = Settings {
        api_provider: ProviderId::HuggingFace,
        ..Default::default()
    };
    let result = ConfigValidator::validate_settings(&settings);
    assert!(result.errors[0].message.contains("Hugging Face"));
}

#[test]
fn test_settings_valid() {
    let settings = Settings {
        api_key: "key".to_string(),
        ..Default::default()
    };
    assert!(ConfigValidator::validate_settings(&settings).is_valid());
}

#[test]
fn test_settings_model_warning() {
    let settings = Settings {
        api_key: "key".to_string(),
        api_provider: ProviderId::HuggingFace,
        model_id: "mixtral".to_string(),
        ..Default::default()
    };
    let result = ConfigValidator::validate_settings(&settings);
    assert!(result.is_valid());
    assert_eq!(result.warnings.len(), 1);
}

#[test]
fn test_into_result() {
    let settings = Settings::default();
    let err = ConfigValidator::validate_settings(&settings)
        .into_result()
        .unwrap_err();
    assert!(err.to_string().contains("apiKey"));
}

#[test]
fn test_server_checks() {
    let mut config = Config::default();
    config.server.host = " ".to_string();
    config.server.model = "phi3".to_string();
    let result = ConfigValidator::validate(&config);
    assert_eq!(result.errors[0].path, "server.host");
    assert_eq!(result.warnings[0].path, "server.model");
}
