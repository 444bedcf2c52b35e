//! Settings subcommand handlers for Scribe.

use std::collections::HashMap;

use tracing::info;

use scribe_config::{ConfigValidator, FileSettingsStore, seed_defaults};
use scribe_protocols::{SettingKey, SettingsStore};

use crate::cli::SettingsAction;

/// Handle settings subcommands.
pub(crate) fn handle_settings_command(
    action: SettingsAction,
    store: &FileSettingsStore,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        SettingsAction::Show => settings_show(store),
        SettingsAction::Init => settings_init(store),
        SettingsAction::Set {
            language,
            api_key,
            hf_api_key,
            provider,
            model,
        } => {
            let values = collect_values(language, api_key, hf_api_key, provider, model);
            settings_set(store, values)
        }
    }
}

fn settings_show(store: &FileSettingsStore) -> Result<(), Box<dyn std::error::Error>> {
    let settings = store.load()?;

    println!("Settings file: {}", store.path().display());
    println!("  targetLanguage: {}", settings.target_language);
    println!("  apiProvider:    {}", settings.api_provider);
    println!("  apiKey:         {}", settings.masked_api_key());
    println!("  modelId:        {}", settings.model_id);
    println!("  hfApiKey:       {}", settings.masked_hf_api_key());
    Ok(())
}

fn settings_init(store: &FileSettingsStore) -> Result<(), Box<dyn std::error::Error>> {
    let written = seed_defaults(store)?;

    if written.is_empty() {
        println!("All settings already present in {}", store.path().display());
        return Ok(());
    }

    let mut keys: Vec<_> = written.into_iter().collect();
    keys.sort_by_key(|(key, _)| key.as_str());
    for (key, value) in keys {
        println!("  {} = {}", key, value);
    }
    info!("Default settings written to {}", store.path().display());
    Ok(())
}

fn settings_set(
    store: &FileSettingsStore,
    values: HashMap<SettingKey, String>,
) -> Result<(), Box<dyn std::error::Error>> {
    if values.is_empty() {
        return Err("nothing to update; pass at least one of --language, --api-key, --hf-api-key, --provider, --model".into());
    }

    let current = store.load()?;
    let values = current.link_provider_keys(values);
    let mut candidate = current;
    candidate.apply(&values)?;

    let warnings = ConfigValidator::validate_settings(&candidate).into_result()?;
    for warning in &warnings {
        println!("warning: {}: {}", warning.path, warning.message);
    }

    store.set(values)?;
    println!("Settings saved");
    Ok(())
}

fn collect_values(
    language: Option<String>,
    api_key: Option<String>,
    hf_api_key: Option<String>,
    provider: Option<String>,
    model: Option<String>,
) -> HashMap<SettingKey, String> {
    [
        (SettingKey::TargetLanguage, language),
        (SettingKey::ApiKey, api_key),
        (SettingKey::HfApiKey, hf_api_key),
        (SettingKey::ApiProvider, provider),
        (SettingKey::ModelId, model),
    ]
    .into_iter()
    .filter_map(|(key, value)| value.map(|v| (key, v.trim().to_string())))
    .collect()
}
