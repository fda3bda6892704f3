//! Settings storage configuration.

use serde::{Deserialize, Serialize};

/// Where operator settings are persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Persist settings to disk. When false, settings live for one run only.
    #[serde(default = "default_storage_enabled")]
    pub enabled: bool,
    /// Settings file path.
    #[serde(default = "default_storage_path")]
    pub path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            enabled: default_storage_enabled(),
            path: default_storage_path(),
        }
    }
}

const fn default_storage_enabled() -> bool {
    true
}

fn default_storage_path() -> String {
    "./data/lease-quote-settings.json".to_string()
}
