//! Configuration module for the lease calculator.
//!
//! Provides configuration loading, validation, and environment variable
//! interpolation for the calculator binary.
//!
//! # Usage
//!
//! ```rust,ignore
//! use lease_quote::config::load_config;
//!
//! // Load from LEASE_QUOTE_CONFIG or lease-quote.yaml
//! let config = load_config(None)?;
//! let policy = config.calculator_policy()?;
//! ```

mod calculator;
mod observability;
mod storage;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use calculator::{CalculatorConfig, GateConfig};
pub use observability::{LoggingConfig, ObservabilityConfig};
pub use storage::StorageConfig;

use crate::application::services::CalculatorPolicy;
use crate::domain::rate_table::{OptionDeriver, PeriodGate};
use crate::domain::shared::{Period, Ratio};

/// Default configuration file path.
pub const DEFAULT_CONFIG_PATH: &str = "lease-quote.yaml";

/// Environment variable overriding the configuration file path.
pub const CONFIG_PATH_ENV: &str = "LEASE_QUOTE_CONFIG";

const LOG_FORMATS: [&str; 3] = ["pretty", "json", "compact"];

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Calculator behavior.
    #[serde(default)]
    pub calculator: CalculatorConfig,
    /// Settings storage.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Config {
    /// Build the calculator policy from this configuration.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if a percentage or period is out of range.
    pub fn calculator_policy(&self) -> Result<CalculatorPolicy, ConfigError> {
        let calculator = &self.calculator;
        let preferred_ratio = Ratio::from_percent(calculator.default_ratio_percent)
            .map_err(|e| ConfigError::ValidationError(format!("default_ratio_percent: {e}")))?;
        let min_ratio = Ratio::from_percent(calculator.gate.min_ratio_percent)
            .map_err(|e| ConfigError::ValidationError(format!("gate.min_ratio_percent: {e}")))?;
        let preferred_period = Period::new(calculator.default_period)
            .map_err(|e| ConfigError::ValidationError(format!("default_period: {e}")))?;

        Ok(CalculatorPolicy {
            admin_trigger: calculator.admin_trigger.clone(),
            deriver: OptionDeriver {
                gate: PeriodGate {
                    min_ratio: min_ratio.value(),
                    rule: calculator.gate.rule,
                },
                preferred_period,
                preferred_ratio,
            },
        })
    }
}

// ============================================
// Configuration Loading
// ============================================

/// Load configuration from a YAML file with environment variable interpolation.
///
/// # Arguments
///
/// * `path` - Optional path to the config file. Defaults to `LEASE_QUOTE_CONFIG`,
///   then "lease-quote.yaml". A missing file yields the defaults.
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let path = path.map_or_else(
        || std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string()),
        str::to_string,
    );

    let contents = match std::fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Config::default()),
        Err(e) => return Err(ConfigError::ReadError { path, source: e }),
    };

    load_config_from_string(&contents)
}

/// Load configuration from a YAML string (useful for testing).
///
/// # Errors
///
/// Returns a `ConfigError` if the YAML cannot be parsed or validated.
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    if interpolated.trim().is_empty() {
        return Ok(Config::default());
    }
    let config: Config = serde_yaml_bw::from_str(&interpolated)?;
    validate_config(&config)?;
    Ok(config)
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax.
#[allow(clippy::expect_used)] // Regex is compile-time constant; expect() is safe here
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    re.replace_all(input, |cap: &regex::Captures<'_>| {
        let default_value = cap.get(2).map_or("", |m| m.as_str());
        match std::env::var(&cap[1]) {
            Ok(v) if !v.is_empty() => v,
            _ => default_value.to_string(),
        }
    })
    .into_owned()
}

/// Validate configuration values.
fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let calculator = &config.calculator;

    if calculator.admin_trigger.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "calculator.admin_trigger must not be empty".to_string(),
        ));
    }

    if !(1..=100).contains(&calculator.default_ratio_percent) {
        return Err(ConfigError::ValidationError(
            "calculator.default_ratio_percent must be between 1 and 100".to_string(),
        ));
    }

    if calculator.default_period == 0 {
        return Err(ConfigError::ValidationError(
            "calculator.default_period must be positive".to_string(),
        ));
    }

    if !(1..=100).contains(&calculator.gate.min_ratio_percent) {
        return Err(ConfigError::ValidationError(
            "calculator.gate.min_ratio_percent must be between 1 and 100".to_string(),
        ));
    }

    if config.storage.enabled && config.storage.path.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "storage.path must be set when storage is enabled".to_string(),
        ));
    }

    let format = config.observability.logging.format.as_str();
    if !LOG_FORMATS.contains(&format) {
        return Err(ConfigError::ValidationError(format!(
            "observability.logging.format must be one of: {LOG_FORMATS:?}"
        )));
    }

    Ok(())
}
