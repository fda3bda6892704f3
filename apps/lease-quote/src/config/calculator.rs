//! Calculator behavior configuration.

use serde::{Deserialize, Serialize};

use crate::domain::quoting::DEFAULT_ADMIN_TRIGGER;
use crate::domain::rate_table::GateRule;
use crate::domain::shared::Period;

/// Calculator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatorConfig {
    /// Phrase that opens the settings editor.
    #[serde(default = "default_admin_trigger")]
    pub admin_trigger: String,
    /// Down payment pre-selected when offered, in whole percent.
    #[serde(default = "default_ratio_percent")]
    pub default_ratio_percent: u32,
    /// Period pre-selected when offered.
    #[serde(default = "default_period")]
    pub default_period: u32,
    /// Long-period gating.
    #[serde(default)]
    pub gate: GateConfig,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            admin_trigger: default_admin_trigger(),
            default_ratio_percent: default_ratio_percent(),
            default_period: default_period(),
            gate: GateConfig::default(),
        }
    }
}

/// Period gate configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateConfig {
    /// Down payment unlocking every period, in whole percent.
    #[serde(default = "default_min_ratio_percent")]
    pub min_ratio_percent: u32,
    /// Periods offered to any down payment.
    #[serde(default = "default_gate_rule")]
    pub rule: GateRule,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            min_ratio_percent: default_min_ratio_percent(),
            rule: default_gate_rule(),
        }
    }
}

fn default_admin_trigger() -> String {
    DEFAULT_ADMIN_TRIGGER.to_string()
}

const fn default_ratio_percent() -> u32 {
    30
}

const fn default_period() -> u32 {
    6
}

const fn default_min_ratio_percent() -> u32 {
    35
}

fn default_gate_rule() -> GateRule {
    GateRule::Except(Period::literal(12))
}
