//! JSON file settings store.
//!
//! Keeps every key in one JSON object on disk. Each write rewrites the whole
//! file through a sibling temp file and a rename, so readers never see a
//! half-written file.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use crate::application::ports::{SettingsStore, StoreError};

/// File-backed implementation of `SettingsStore`.
#[derive(Debug)]
pub struct JsonFileSettingsStore {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, String>>,
}

impl JsonFileSettingsStore {
    /// Open the store at `path`. A missing file is an empty store.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the file exists but cannot be read and
    /// [`StoreError::Corrupt`] if it is not a JSON object of strings.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(contents) if contents.trim().is_empty() => BTreeMap::new(),
            Ok(contents) => serde_json::from_str(&contents)
                .map_err(|e| StoreError::Corrupt(format!("{}: {e}", path.display())))?,
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(StoreError::Io(e)),
        };

        tracing::debug!(path = %path.display(), keys = entries.len(), "Opened settings file");

        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(entries)
            .map_err(|e| StoreError::Corrupt(e.to_string()))?;
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, contents)?;
        fs::rename(&staging, &self.path)?;
        Ok(())
    }
}

impl SettingsStore for JsonFileSettingsStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set_many(&self, batch: &[(&str, &str)]) -> Result<(), StoreError> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let previous: Vec<(String, Option<String>)> = batch
            .iter()
            .map(|(key, value)| {
                let old = entries.insert((*key).to_string(), (*value).to_string());
                ((*key).to_string(), old)
            })
            .collect();

        if let Err(e) = self.flush(&entries) {
            // Memory must match what is on disk.
            for (key, old) in previous.into_iter().rev() {
                match old {
                    Some(old) => entries.insert(key, old),
                    None => entries.remove(&key),
                };
            }
            return Err(e);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileSettingsStore::open(dir.path().join("settings.json")).unwrap();
        assert_eq!(store.get("interestRates").unwrap(), None);
    }

    #[test]
    fn values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let store = JsonFileSettingsStore::open(&path).unwrap();
        store.set("downPaymentOptions", "[0.3]").unwrap();
        store.set("downPaymentOptions", "[0.4]").unwrap();
        drop(store);

        let reopened = JsonFileSettingsStore::open(&path).unwrap();
        assert_eq!(
            reopened.get("downPaymentOptions").unwrap().as_deref(),
            Some("[0.4]")
        );
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "not json").unwrap();

        let err = JsonFileSettingsStore::open(&path).unwrap_err();
        assert!(matches!(err, StoreError::Corrupt(_)));
    }

    #[test]
    fn failed_write_rolls_back_memory() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be makes the rename fail.
        let path = dir.path().join("settings.json");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("occupied"), "x").unwrap();

        let store = JsonFileSettingsStore {
            path,
            entries: RwLock::new(BTreeMap::new()),
        };
        assert!(store.set("interestRates", "{}").is_err());
        assert_eq!(store.get("interestRates").unwrap(), None);
    }

    #[test]
    fn batch_is_written_in_one_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let store = JsonFileSettingsStore::open(&path).unwrap();
        store
            .set_many(&[("downPaymentOptions", "[0.5]"), ("interestRates", "{}")])
            .unwrap();
        assert_eq!(store.path(), path.as_path());

        let reopened = JsonFileSettingsStore::open(&path).unwrap();
        assert_eq!(reopened.get("downPaymentOptions").unwrap().as_deref(), Some("[0.5]"));
        assert_eq!(reopened.get("interestRates").unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn failed_batch_restores_every_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("occupied"), "x").unwrap();

        let mut entries = BTreeMap::new();
        entries.insert("downPaymentOptions".to_string(), "[0.3]".to_string());
        let store = JsonFileSettingsStore {
            path,
            entries: RwLock::new(entries),
        };

        let result = store.set_many(&[("downPaymentOptions", "[0.5]"), ("interestRates", "{}")]);
        assert!(result.is_err());
        assert_eq!(store.get("downPaymentOptions").unwrap().as_deref(), Some("[0.3]"));
        assert_eq!(store.get("interestRates").unwrap(), None);
    }
}
