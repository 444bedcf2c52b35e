use super::*;

fn values(pairs: &[(SettingKey, &str)]) -> HashMap<SettingKey, String> {
    pairs
        .iter()
        .map(|(k, v)| (*k, v.to_string()))
        .collect()
}

#[test]
fn test_provider_id_parse() {
    assert_eq!(ProviderId::parse("gemini"), Some(ProviderId::Gemini));
    assert_eq!(ProviderId::parse("Primary"), Some(ProviderId::Gemini));
    assert_eq!(ProviderId::parse("huggingface"), Some(ProviderId::HuggingFace));
    assert_eq!(ProviderId::parse(" secondary "), Some(ProviderId::HuggingFace));
    assert_eq!(ProviderId::parse("openai"), None);
}

#[test]
fn test_provider_id_serde() {
    let json = serde_json::to_string(&ProviderId::HuggingFace).unwrap();
    assert_eq!(json, "\"huggingface\"");

    let parsed: ProviderId = serde_json::from_str("\"secondary\"").unwrap();
    assert_eq!(parsed, ProviderId::HuggingFace);
    let parsed: ProviderId = serde_json::from_str("\"primary\"").unwrap();
    assert_eq!(parsed, ProviderId::Gemini);
}

#[test]
fn test_setting_key_round_trip_names() {
    for key in SettingKey::ALL {
        assert_eq!(SettingKey::parse(key.as_str()), Some(key));
    }
    assert_eq!(SettingKey::parse("hfModel"), None);
}

#[test]
fn test_settings_default() {
    let settings = Settings::default();
    assert_eq!(settings.target_language, "English");
    assert_eq!(settings.api_provider, ProviderId::Gemini);
    assert_eq!(settings.model_id, DEFAULT_MODEL_ID);
    assert!(!settings.has_credentials());
}

#[test]
fn test_settings_from_values_fills_defaults() {
    let settings = Settings::from_values(&values(&[(SettingKey::ApiKey, "k-123")])).unwrap();
    assert_eq!(settings.api_key, "k-123");
    assert_eq!(settings.target_language, "English");
    assert!(settings.has_credentials());
}

#[test]
fn test_settings_apply_invalid_provider_leaves_settings_untouched() {
    let mut settings = Settings::default();
    let result = settings.apply(&values(&[
        (SettingKey::TargetLanguage, "Italian"),
        (SettingKey::ApiProvider, "bard"),
    ]));
    assert!(result.is_err());
    assert_eq!(settings, Settings::default());
}

#[test]
fn test_settings_apply_empty_language_falls_back() {
    let mut settings = Settings::default();
    settings.target_language = "German".to_string();
    settings
        .apply(&values(&[(SettingKey::TargetLanguage, "  ")]))
        .unwrap();
    assert_eq!(settings.target_language, "English");
}

#[test]
fn test_settings_to_values_contains_every_key() {
    let settings = Settings::default();
    let values = settings.to_values();
    for key in SettingKey::ALL {
        assert!(values.contains_key(&key));
    }
    assert_eq!(values[&SettingKey::ApiProvider], "gemini");
}

#[test]
fn test_settings_serde_camel_case() {
    let settings = Settings {
        api_key: "abc".to_string(),
        api_provider: ProviderId::HuggingFace,
        ..Default::default()
    };
    let json = serde_json::to_value(&settings).unwrap();
    assert_eq!(json["apiKey"], "abc");
    assert_eq!(json["apiProvider"], "huggingface");
    assert_eq!(json["targetLanguage"], "English");
}

#[test]
fn test_masked_api_key() {
    let mut settings = Settings::default();
    assert_eq!(settings.masked_api_key(), "(not set)");
    settings.api_key = "AIzaSecret1234".to_string();
    assert_eq!(settings.masked_api_key(), "**********1234");
    settings.api_key = "abc".to_string();
    assert_eq!(settings.masked_api_key(), "abc");
}

#[test]
fn test_settings_change_contains() {
    let change = SettingsChange::new(values(&[(SettingKey::ApiKey, "x")]));
    assert!(change.contains(SettingKey::ApiKey));
    assert!(!change.contains(SettingKey::ModelId));
}

#[test]
fn test_hf_api_key_applied_and_masked() {
    let settings = Settings::from_values(&values(&[(SettingKey::HfApiKey, " hf_abcd1234 ")])).unwrap();
    assert_eq!(settings.hf_api_key, "hf_abcd1234");
    assert_eq!(settings.masked_hf_api_key(), "*******1234");
    assert!(!settings.has_credentials());
    assert_eq!(SettingKey::parse("hfApiKey"), Some(SettingKey::HfApiKey));
}

#[test]
fn test_link_keys_mirrors_active_key_for_hugging_face() {
    let settings = Settings::default();
    let linked = settings.link_provider_keys(values(&[
        (SettingKey::ApiProvider, "huggingface"),
        (SettingKey::ApiKey, "hf_new"),
    ]));
    assert_eq!(linked[&SettingKey::ApiKey], "hf_new");
    assert_eq!(linked[&SettingKey::HfApiKey], "hf_new");
}

#[test]
fn test_link_keys_reactivates_stored_hugging_face_key() {
    let settings = Settings {
        api_key: "gemini-key".to_string(),
        hf_api_key: "hf_stored".to_string(),
        ..Default::default()
    };
    let linked = settings.link_provider_keys(values(&[(SettingKey::ApiProvider, "secondary")]));
    assert_eq!(linked[&SettingKey::ApiKey], "hf_stored");
    assert_eq!(linked[&SettingKey::HfApiKey], "hf_stored");
}

#[test]
fn test_link_keys_leaves_gemini_changes_alone() {
    let settings = Settings {
        hf_api_key: "hf_stored".to_string(),
        ..Default::default()
    };
    let changes = values(&[
        (SettingKey::ApiKey, "gemini-key"),
        (SettingKey::HfApiKey, "hf_other"),
    ]);
    let linked = settings.link_provider_keys(changes.clone());
    assert_eq!(linked, changes);
}

#[test]
fn test_link_keys_ignores_unrelated_changes() {
    let settings = Settings {
        api_provider: ProviderId::HuggingFace,
        api_key: "hf_a".to_string(),
        ..Default::default()
    };
    let changes = values(&[(SettingKey::TargetLanguage, "French")]);
    assert_eq!(settings.link_provider_keys(changes.clone()), changes);
}
