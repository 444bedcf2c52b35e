//! Settings store implementations.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use tokio::sync::broadcast;
use tracing::{debug, info};

use scribe_protocols::settings::{DEFAULT_MODEL_ID, DEFAULT_TARGET_LANGUAGE};
use scribe_protocols::{ProviderId, SettingKey, SettingsChange, SettingsStore, StoreError};

use crate::error::ConfigError;

const CHANGE_CHANNEL_CAPACITY: usize = 16;

/// Reject values the pipeline could not interpret.
fn validate_values(values: &HashMap<SettingKey, String>) -> Result<(), StoreError> {
    if let Some(raw) = values.get(&SettingKey::ApiProvider) {
        if ProviderId::parse(raw).is_none() {
            return Err(StoreError::InvalidValue {
                key: SettingKey::ApiProvider.to_string(),
                message: format!("unknown provider '{}'", raw),
            });
        }
    }
    Ok(())
}

fn select(
    values: &HashMap<SettingKey, String>,
    keys: &[SettingKey],
) -> HashMap<SettingKey, String> {
    keys.iter()
        .filter_map(|k| values.get(k).map(|v| (*k, v.clone())))
        .collect()
}

/// In-memory settings store.
pub struct MemorySettingsStore {
    values: RwLock<HashMap<SettingKey, String>>,
    sender: broadcast::Sender<SettingsChange>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::with_values(HashMap::new())
    }

    pub fn with_values(values: HashMap<SettingKey, String>) -> Self {
        let (sender, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            values: RwLock::new(values),
            sender,
        }
    }
}

impl Default for MemorySettingsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsStore for MemorySettingsStore {
    fn get(&self, keys: &[SettingKey]) -> Result<HashMap<SettingKey, String>, StoreError> {
        Ok(select(&self.values.read(), keys))
    }

    fn set(&self, values: HashMap<SettingKey, String>) -> Result<(), StoreError> {
        validate_values(&values)?;
        self.values.write().extend(values.clone());
        let _ = self.sender.send(SettingsChange::new(values));
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<SettingsChange> {
        self.sender.subscribe()
    }
}

/// Settings store persisted as a flat TOML table.
pub struct FileSettingsStore {
    path: PathBuf,
    values: RwLock<HashMap<SettingKey, String>>,
    sender: broadcast::Sender<SettingsChange>,
}

impl FileSettingsStore {
    /// Open the store, reading existing values if the file exists.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let values = if path.exists() {
            Self::read_file(&path)?
        } else {
            debug!("Settings file {} not found, starting empty", path.display());
            HashMap::new()
        };
        let (sender, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Ok(Self {
            path,
            values: RwLock::new(values),
            sender,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_file(path: &Path) -> Result<HashMap<SettingKey, String>, ConfigError> {
        let content = fs::read_to_string(path)?;
        let raw: BTreeMap<String, String> = toml::from_str(&content)?;
        let mut values = HashMap::new();
        for (name, value) in raw {
            match SettingKey::parse(&name) {
                Some(key) => {
                    values.insert(key, value);
                }
                None => debug!("Ignoring unknown setting '{}'", name),
            }
        }
        Ok(values)
    }

    fn write_file(&self, values: &HashMap<SettingKey, String>) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw: BTreeMap<&str, &str> = values
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        fs::write(&self.path, toml::to_string(&raw)?)?;
        Ok(())
    }
}

impl SettingsStore for FileSettingsStore {
    fn get(&self, keys: &[SettingKey]) -> Result<HashMap<SettingKey, String>, StoreError> {
        Ok(select(&self.values.read(), keys))
    }

    fn set(&self, values: HashMap<SettingKey, String>) -> Result<(), StoreError> {
        validate_values(&values)?;
        {
            let mut current = self.values.write();
            let mut next = current.clone();
            next.extend(values.clone());
            self.write_file(&next)?;
            *current = next;
        }
        let _ = self.sender.send(SettingsChange::new(values));
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<SettingsChange> {
        self.sender.subscribe()
    }
}

/// Write defaults for settings that were never set.
///
/// Existing values are left alone. Returns the values that were written.
pub fn seed_defaults(store: &dyn SettingsStore) -> Result<HashMap<SettingKey, String>, StoreError> {
    let existing = store.get(&SettingKey::ALL)?;
    let defaults = [
        (SettingKey::TargetLanguage, DEFAULT_TARGET_LANGUAGE.to_string()),
        (SettingKey::ApiProvider, ProviderId::default().to_string()),
        (SettingKey::ModelId, DEFAULT_MODEL_ID.to_string()),
    ];

    let missing: HashMap<SettingKey, String> = defaults
        .into_iter()
        .filter(|(key, _)| existing.get(key).is_none_or(|v| v.is_empty()))
        .collect();

    if !missing.is_empty() {
        info!("Seeding {} default setting(s)", missing.len());
        store.set(missing.clone())?;
    }
    Ok(missing)
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
