//! Calculator Service
//!
//! Owns the live configuration and turns front-end events into domain calls:
//! option lists, quote requests and settings saves.

use std::collections::BTreeSet;
use std::sync::Arc;

use super::configuration_persistence::{SaveOutcome, load_configuration, save_configuration};
use crate::application::ports::SettingsStore;
use crate::domain::quoting::{
    DEFAULT_ADMIN_TRIGGER, Quote, QuoteError, compute_quote, is_admin_trigger, is_valid_price,
    parse_price,
};
use crate::domain::rate_table::{
    Configuration, OptionDeriver, Options, RateCells, SettingsDraft, apply_edits,
};
use crate::domain::shared::{DomainError, Period, Ratio};

/// Behavior knobs for the calculator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculatorPolicy {
    /// Phrase that opens the settings editor when typed as the price.
    pub admin_trigger: String,
    /// Option derivation and gating.
    pub deriver: OptionDeriver,
}

impl Default for CalculatorPolicy {
    fn default() -> Self {
        Self {
            admin_trigger: DEFAULT_ADMIN_TRIGGER.to_string(),
            deriver: OptionDeriver::default(),
        }
    }
}

/// Calculator controller over a settings store.
pub struct CalculatorService<S>
where
    S: SettingsStore,
{
    store: Arc<S>,
    configuration: Configuration,
    policy: CalculatorPolicy,
}

impl<S> CalculatorService<S>
where
    S: SettingsStore,
{
    /// Create the service, loading the configuration from `store`.
    pub fn new(store: Arc<S>, policy: CalculatorPolicy) -> Self {
        let configuration = load_configuration(store.as_ref());
        Self {
            store,
            configuration,
            policy,
        }
    }

    /// The live configuration.
    #[must_use]
    pub const fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// The active policy.
    #[must_use]
    pub const fn policy(&self) -> &CalculatorPolicy {
        &self.policy
    }

    /// Ratios on offer with the default selection.
    #[must_use]
    pub fn ratio_options(&self) -> Options<Ratio> {
        self.policy.deriver.ratio_options(&self.configuration)
    }

    /// Periods on offer for the selected ratio.
    #[must_use]
    pub fn period_options(&self, selected_ratio: Option<Ratio>) -> Options<Period> {
        self.policy
            .deriver
            .offerable_periods(&self.configuration, selected_ratio)
    }

    /// Returns true if `text` is the settings editor phrase.
    #[must_use]
    pub fn is_admin_trigger(&self, text: &str) -> bool {
        is_admin_trigger(text, &self.policy.admin_trigger)
    }

    /// Returns true if `text` is an acceptable price.
    #[must_use]
    pub fn is_valid_price(&self, text: &str) -> bool {
        is_valid_price(text)
    }

    /// Quote `price_text` for a selected ratio and period.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::Validation`] if the price is malformed or the
    /// ratio or period is not currently on offer, and
    /// [`QuoteError::Computation`] if the arithmetic fails.
    pub fn on_calculate(
        &self,
        price_text: &str,
        ratio: Ratio,
        period: Period,
    ) -> Result<Quote, QuoteError> {
        let price = parse_price(price_text)?;

        if !self.configuration.has_ratio(ratio) {
            return Err(QuoteError::validation(
                "ratio",
                format!("{ratio} is not an offered down payment"),
            ));
        }
        if !self.period_options(Some(ratio)).contains(&period) {
            return Err(QuoteError::validation(
                "period",
                format!("{period} installments is not offered with {ratio} down"),
            ));
        }

        compute_quote(price, ratio, period, &self.configuration).inspect_err(|e| {
            if !e.is_validation() {
                tracing::error!(%price, %ratio, %period, error = %e, "Quote computation failed");
            }
        })
    }

    /// Editable copy of the live configuration.
    #[must_use]
    pub fn settings_draft(&self) -> SettingsDraft {
        SettingsDraft::from_configuration(&self.configuration)
    }

    /// Replace the configuration with an edited one and persist it.
    ///
    /// The new configuration is live even when persisting fails.
    ///
    /// # Errors
    ///
    /// Returns error if `ratios` or `periods` is empty; the live
    /// configuration is unchanged.
    pub fn on_save_settings(
        &mut self,
        ratios: &BTreeSet<Ratio>,
        periods: &BTreeSet<Period>,
        cells: &RateCells,
    ) -> Result<SaveOutcome, DomainError> {
        let next = apply_edits(&self.configuration, ratios, periods, cells)?;
        self.configuration = next;

        let outcome = save_configuration(&self.configuration, self.store.as_ref());
        tracing::info!(
            ratios = ratios.len(),
            periods = periods.len(),
            persisted = outcome.is_persisted(),
            "Saved calculator settings"
        );
        Ok(outcome)
    }

    /// Validate a settings draft and save it.
    ///
    /// # Errors
    ///
    /// Returns error if the draft holds an out-of-range entry.
    pub fn save_draft(&mut self, draft: SettingsDraft) -> Result<SaveOutcome, DomainError> {
        let edits = draft.into_edits()?;
        self.on_save_settings(&edits.ratios, &edits.periods, &edits.cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::{RATES_KEY, RATIOS_KEY};
    use crate::application::ports::InMemorySettingsStore;
    use rust_decimal_macros::dec;

    fn ratio(percent: u32) -> Ratio {
        Ratio::from_percent(percent).unwrap()
    }

    fn period(n: u32) -> Period {
        Period::new(n).unwrap()
    }

    fn service() -> CalculatorService<InMemorySettingsStore> {
        CalculatorService::new(
            Arc::new(InMemorySettingsStore::new()),
            CalculatorPolicy::default(),
        )
    }

    #[test]
    fn quotes_the_reference_scenario() {
        let quote = service().on_calculate("10000", ratio(30), period(6)).unwrap();
        assert_eq!(quote.total.amount(), dec!(12350.00));
        assert_eq!(quote.down_payment.amount(), dec!(3000.00));
        assert_eq!(quote.installment_amount.amount(), dec!(1870.00));
        assert_eq!(quote.installment_count, 5);
    }

    #[test]
    fn rejects_bad_price_text() {
        let service = service();
        for text in ["", "abc", "-5", "0", "1.234"] {
            let err = service.on_calculate(text, ratio(30), period(6)).unwrap_err();
            assert!(err.is_validation(), "{text:?} should be a validation error");
        }
    }

    #[test]
    fn rejects_selections_not_on_offer() {
        let service = service();
        let err = service.on_calculate("100", ratio(50), period(6)).unwrap_err();
        assert!(matches!(err, QuoteError::Validation { ref field, .. } if field == "ratio"));

        let err = service.on_calculate("100", ratio(25), period(12)).unwrap_err();
        assert!(matches!(err, QuoteError::Validation { ref field, .. } if field == "period"));

        assert!(service.on_calculate("100", ratio(40), period(12)).is_ok());
    }

    #[test]
    fn admin_trigger_uses_policy_phrase() {
        let service = CalculatorService::new(
            Arc::new(InMemorySettingsStore::new()),
            CalculatorPolicy {
                admin_trigger: "open sesame".to_string(),
                ..CalculatorPolicy::default()
            },
        );
        assert!(service.is_admin_trigger("open sesame"));
        assert!(!service.is_admin_trigger(DEFAULT_ADMIN_TRIGGER));
        assert!(service.is_valid_price("12.50"));
    }

    #[test]
    fn save_settings_replaces_and_persists() {
        let store = Arc::new(InMemorySettingsStore::new());
        let mut service = CalculatorService::new(Arc::clone(&store), CalculatorPolicy::default());

        let mut draft = service.settings_draft();
        draft.add_period();
        let outcome = service.save_draft(draft).unwrap();

        assert!(outcome.is_persisted());
        assert!(service.configuration().has_period(period(15)));
        assert!(store.get(RATIOS_KEY).unwrap().is_some());
        assert!(store.get(RATES_KEY).unwrap().is_some());

        let reloaded = CalculatorService::new(store, CalculatorPolicy::default());
        assert_eq!(reloaded.configuration(), service.configuration());
    }

    #[test]
    fn invalid_edit_leaves_configuration_untouched() {
        let mut service = service();
        let before = service.configuration().clone();
        let result =
            service.on_save_settings(&BTreeSet::new(), &[period(6)].into(), &RateCells::new());
        assert!(result.is_err());
        assert_eq!(service.configuration(), &before);
    }

    #[test]
    fn failed_persist_keeps_new_configuration_live() {
        let mut service = CalculatorService::new(
            Arc::new(InMemorySettingsStore::with_quota(4)),
            CalculatorPolicy::default(),
        );
        let outcome = service
            .on_save_settings(&[ratio(50)].into(), &[period(3)].into(), &RateCells::new())
            .unwrap();

        assert!(!outcome.is_persisted());
        assert!(service.configuration().has_ratio(ratio(50)));
        assert!(service.configuration().has_period(period(3)));
    }
}
