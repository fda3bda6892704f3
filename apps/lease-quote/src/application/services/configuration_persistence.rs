//! Configuration Persistence
//!
//! Loads and saves the calculator configuration through a [`SettingsStore`].
//!
//! Loading never fails: each persisted field falls back to its built-in
//! default on its own when absent or unusable. Saving writes both fields in
//! one batch and never fails outward; on failure the store keeps its previous
//! contents and the caller's in-memory configuration stays live.

use crate::application::dto::{
    ConfigParseError, RATES_KEY, RATIOS_KEY, decode_rates, decode_ratios, encode_rates,
    encode_ratios,
};
use crate::application::ports::{SettingsStore, StoreError};
use crate::domain::rate_table::Configuration;

/// Result of persisting a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Both keys were written.
    Persisted,
    /// The write failed; neither key changed.
    Failed {
        /// Failure description.
        reason: String,
    },
}

impl SaveOutcome {
    /// Returns true if both keys were written.
    #[must_use]
    pub const fn is_persisted(&self) -> bool {
        matches!(self, Self::Persisted)
    }
}

/// Load the configuration from `store`, field by field.
pub fn load_configuration<S: SettingsStore + ?Sized>(store: &S) -> Configuration {
    let mut config = Configuration::default();
    if let Some(ratios) = read_field(store, RATIOS_KEY, decode_ratios) {
        config = config.with_ratios(ratios);
    }
    if let Some(rates) = read_field(store, RATES_KEY, decode_rates) {
        config = config.with_rates(rates);
    }

    tracing::debug!(
        ratios = config.ratios().len(),
        periods = config.rates().len(),
        "Loaded calculator configuration"
    );
    config
}

/// Write both persisted keys for `config`.
pub fn save_configuration<S: SettingsStore + ?Sized>(
    config: &Configuration,
    store: &S,
) -> SaveOutcome {
    match write_all(config, store) {
        Ok(()) => SaveOutcome::Persisted,
        Err(reason) => {
            tracing::warn!(%reason, "Failed to persist settings, keeping in-memory copy");
            SaveOutcome::Failed { reason }
        }
    }
}

fn write_all<S: SettingsStore + ?Sized>(config: &Configuration, store: &S) -> Result<(), String> {
    let ratios = encode_ratios(config.ratios()).map_err(|e| format!("{RATIOS_KEY}: {e}"))?;
    let rates = encode_rates(config.rates()).map_err(|e| format!("{RATES_KEY}: {e}"))?;
    store
        .set_many(&[(RATIOS_KEY, &ratios), (RATES_KEY, &rates)])
        .map_err(|e: StoreError| e.to_string())
}

fn read_field<S, T>(
    store: &S,
    key: &'static str,
    decode: fn(&str) -> Result<T, ConfigParseError>,
) -> Option<T>
where
    S: SettingsStore + ?Sized,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            tracing::debug!(key, "No stored value, using default");
            return None;
        }
        Err(e) => {
            tracing::warn!(key, error = %e, "Settings store read failed, using default");
            return None;
        }
    };

    match decode(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "Stored settings unusable, using default");
            None
        }
    }
}
