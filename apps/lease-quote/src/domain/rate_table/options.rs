//! Option derivation: which ratios and periods the calculator offers.
//!
//! Long periods are reserved for customers paying a larger share up front.
//! The cutoff is a [`PeriodGate`] policy rather than a hard-coded period so
//! operators can move it without a rebuild.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::configuration::Configuration;
use crate::domain::shared::{Period, Ratio};

/// Which periods are offered regardless of the selected ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "period", rename_all = "snake_case")]
pub enum GateRule {
    /// Periods up to and including the threshold are unconditional.
    AtMost(Period),
    /// Every period except this one is unconditional.
    Except(Period),
}

impl GateRule {
    /// Returns true if `period` is offered without a ratio requirement.
    #[must_use]
    pub fn is_unconditional(&self, period: Period) -> bool {
        match self {
            Self::AtMost(threshold) => period <= *threshold,
            Self::Except(gated) => period != *gated,
        }
    }
}

/// Ratio requirement for gated periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodGate {
    /// Minimum ratio unlocking every configured period.
    pub min_ratio: Decimal,
    /// Periods offered to any ratio.
    pub rule: GateRule,
}

impl PeriodGate {
    /// Returns true if `period` may be offered with `ratio` selected.
    ///
    /// An unset ratio never unlocks gated periods.
    #[must_use]
    pub fn admits(&self, period: Period, ratio: Option<Ratio>) -> bool {
        let unlocked = ratio.is_some_and(|r| r.value() >= self.min_ratio);
        unlocked || self.rule.is_unconditional(period)
    }
}

impl Default for PeriodGate {
    fn default() -> Self {
        Self {
            min_ratio: dec!(0.35),
            rule: GateRule::Except(Period::literal(12)),
        }
    }
}

/// Ordered choices plus the pre-selected entry, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options<T> {
    /// Choices in ascending order.
    pub choices: Vec<T>,
    /// Choice selected by default.
    pub selected: Option<T>,
}

impl<T: PartialEq> Options<T> {
    /// Returns true if `value` is one of the choices.
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.choices.contains(value)
    }
}

/// Derives the offerable ratios and periods from a configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionDeriver {
    /// Period gating policy.
    pub gate: PeriodGate,
    /// Period pre-selected when offerable.
    pub preferred_period: Period,
    /// Ratio pre-selected when configured.
    pub preferred_ratio: Ratio,
}

impl Default for OptionDeriver {
    fn default() -> Self {
        Self {
            gate: PeriodGate::default(),
            preferred_period: Period::literal(6),
            preferred_ratio: Ratio::literal(dec!(0.3)),
        }
    }
}

impl OptionDeriver {
    /// Ratios in ascending order; the preferred ratio is selected when
    /// present, otherwise the smallest.
    #[must_use]
    pub fn ratio_options(&self, config: &Configuration) -> Options<Ratio> {
        let choices: Vec<Ratio> = config.ratios().iter().copied().collect();
        let selected = if config.has_ratio(self.preferred_ratio) {
            Some(self.preferred_ratio)
        } else {
            choices.first().copied()
        };
        Options { choices, selected }
    }

    /// Periods offerable for `selected_ratio`, ascending.
    ///
    /// The preferred period is selected only when it survives the gate.
    #[must_use]
    pub fn offerable_periods(
        &self,
        config: &Configuration,
        selected_ratio: Option<Ratio>,
    ) -> Options<Period> {
        let choices: Vec<Period> = config
            .periods()
            .filter(|period| self.gate.admits(*period, selected_ratio))
            .collect();
        let selected = choices
            .contains(&self.preferred_period)
            .then_some(self.preferred_period);
        Options { choices, selected }
    }
}
