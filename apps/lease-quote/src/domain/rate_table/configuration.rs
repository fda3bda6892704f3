//! Rate table configuration: allowed ratios, allowed periods and the rate matrix.

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal_macros::dec;

use crate::domain::shared::{DomainError, Period, Rate, Ratio};

/// Rates keyed by period, then by down-payment ratio.
///
/// The set of configured periods is exactly the set of keys of this matrix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RateMatrix(BTreeMap<Period, BTreeMap<Ratio, Rate>>);

impl RateMatrix {
    /// Create an empty matrix.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configured rate for a cell, if any.
    #[must_use]
    pub fn get(&self, period: Period, ratio: Ratio) -> Option<Rate> {
        self.0.get(&period).and_then(|row| row.get(&ratio)).copied()
    }

    /// Set the rate for a cell, creating the period row when needed.
    pub fn insert(&mut self, period: Period, ratio: Ratio, rate: Rate) {
        self.0.entry(period).or_default().insert(ratio, rate);
    }

    /// Register a period with no rates yet.
    pub fn insert_period(&mut self, period: Period) {
        self.0.entry(period).or_default();
    }

    /// Periods in ascending order.
    pub fn periods(&self) -> impl Iterator<Item = Period> + '_ {
        self.0.keys().copied()
    }

    /// Returns true if the period has a row.
    #[must_use]
    pub fn contains_period(&self, period: Period) -> bool {
        self.0.contains_key(&period)
    }

    /// Every configured cell, ordered by period then ratio.
    pub fn cells(&self) -> impl Iterator<Item = (Period, Ratio, Rate)> + '_ {
        self.0.iter().flat_map(|(period, row)| {
            row.iter().map(move |(ratio, rate)| (*period, *ratio, *rate))
        })
    }

    /// Number of periods.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no period is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(Period, Ratio, Rate)> for RateMatrix {
    fn from_iter<I: IntoIterator<Item = (Period, Ratio, Rate)>>(iter: I) -> Self {
        let mut matrix = Self::new();
        for (period, ratio, rate) in iter {
            matrix.insert(period, ratio, rate);
        }
        matrix
    }
}

/// The complete, persisted unit of calculator settings.
///
/// Both the ratio set and the matrix are non-empty. Periods are derived from
/// the matrix keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    ratios: BTreeSet<Ratio>,
    rates: RateMatrix,
}

impl Configuration {
    /// Create a configuration.
    ///
    /// # Errors
    ///
    /// Returns error if there are no ratios or no periods.
    pub fn new(ratios: BTreeSet<Ratio>, rates: RateMatrix) -> Result<Self, DomainError> {
        if ratios.is_empty() {
            return Err(DomainError::rule(
                "NON_EMPTY_RATIOS",
                "at least one down-payment ratio is required",
            ));
        }
        if rates.is_empty() {
            return Err(DomainError::rule(
                "NON_EMPTY_PERIODS",
                "at least one lease period is required",
            ));
        }
        Ok(Self { ratios, rates })
    }

    /// Built-in ratios: 25%, 30%, 35%, 40%.
    #[must_use]
    pub fn default_ratios() -> BTreeSet<Ratio> {
        [dec!(0.25), dec!(0.3), dec!(0.35), dec!(0.4)]
            .into_iter()
            .map(Ratio::literal)
            .collect()
    }

    /// Built-in rate matrix for periods 6, 9 and 12.
    #[must_use]
    pub fn default_rates() -> RateMatrix {
        let ratios = [dec!(0.25), dec!(0.3), dec!(0.35), dec!(0.4)];
        let rows = [
            (6, [dec!(0.255), dec!(0.235), dec!(0.23), dec!(0.22)]),
            (9, [dec!(0.275), dec!(0.268), dec!(0.268), dec!(0.265)]),
            (12, [dec!(0.298), dec!(0.298), dec!(0.295), dec!(0.285)]),
        ];

        rows.into_iter()
            .flat_map(|(period, rates)| {
                ratios.into_iter().zip(rates).map(move |(ratio, rate)| {
                    (Period::literal(period), Ratio::literal(ratio), Rate::literal(rate))
                })
            })
            .collect()
    }

    /// Allowed ratios, ascending.
    #[must_use]
    pub const fn ratios(&self) -> &BTreeSet<Ratio> {
        &self.ratios
    }

    /// Allowed periods, ascending.
    pub fn periods(&self) -> impl Iterator<Item = Period> + '_ {
        self.rates.periods()
    }

    /// The rate matrix.
    #[must_use]
    pub const fn rates(&self) -> &RateMatrix {
        &self.rates
    }

    /// Returns true if the ratio is offered.
    #[must_use]
    pub fn has_ratio(&self, ratio: Ratio) -> bool {
        self.ratios.contains(&ratio)
    }

    /// Returns true if the period is offered.
    #[must_use]
    pub fn has_period(&self, period: Period) -> bool {
        self.rates.contains_period(period)
    }

    /// Markup rate for a period/ratio pair, [`Rate::FALLBACK`] when unconfigured.
    #[must_use]
    pub fn lookup_rate(&self, period: Period, ratio: Ratio) -> Rate {
        self.rates.get(period, ratio).unwrap_or_else(|| {
            tracing::debug!(%period, %ratio, "No configured rate, using fallback");
            Rate::FALLBACK
        })
    }

    /// Replace the ratio set, keeping the matrix.
    #[must_use]
    pub fn with_ratios(self, ratios: BTreeSet<Ratio>) -> Self {
        if ratios.is_empty() {
            return self;
        }
        Self { ratios, ..self }
    }

    /// Replace the matrix, keeping the ratio set.
    #[must_use]
    pub fn with_rates(self, rates: RateMatrix) -> Self {
        if rates.is_empty() {
            return self;
        }
        Self { rates, ..self }
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            ratios: Self::default_ratios(),
            rates: Self::default_rates(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn ratio(percent: u32) -> Ratio {
        Ratio::from_percent(percent).unwrap()
    }

    fn period(n: u32) -> Period {
        Period::new(n).unwrap()
    }

    #[test]
    fn default_configuration_shape() {
        let config = Configuration::default();
        let ratios: Vec<Decimal> = config.ratios().iter().map(|r| r.value()).collect();
        assert_eq!(ratios, vec![dec!(0.25), dec!(0.3), dec!(0.35), dec!(0.4)]);

        let periods: Vec<u32> = config.periods().map(|p| p.get()).collect();
        assert_eq!(periods, vec![6, 9, 12]);
        assert_eq!(config.rates().cells().count(), 12);
    }

    #[test]
    fn lookup_returns_stored_rate() {
        let config = Configuration::default();
        assert_eq!(config.lookup_rate(period(6), ratio(30)).value(), dec!(0.235));
        assert_eq!(config.lookup_rate(period(12), ratio(40)).value(), dec!(0.285));
        assert_eq!(config.lookup_rate(period(9), ratio(25)).value(), dec!(0.275));
    }

    #[test]
    fn lookup_falls_back_for_unconfigured_pairs() {
        let config = Configuration::default();
        assert_eq!(config.lookup_rate(period(99), ratio(30)), Rate::FALLBACK);
        assert_eq!(config.lookup_rate(period(6), ratio(50)), Rate::FALLBACK);
    }

    #[test]
    fn lookup_treats_equal_decimals_as_same_ratio() {
        let config = Configuration::default();
        let padded = Ratio::new(dec!(0.300)).unwrap();
        assert_eq!(config.lookup_rate(period(6), padded).value(), dec!(0.235));
    }

    #[test]
    fn new_rejects_empty_sets() {
        assert!(Configuration::new(BTreeSet::new(), Configuration::default_rates()).is_err());
        assert!(Configuration::new(Configuration::default_ratios(), RateMatrix::new()).is_err());
    }

    #[test]
    fn periods_come_from_matrix_keys() {
        let mut rates = RateMatrix::new();
        rates.insert_period(period(3));
        rates.insert(period(24), ratio(50), Rate::FALLBACK);
        let config = Configuration::new([ratio(50)].into(), rates).unwrap();

        let periods: Vec<u32> = config.periods().map(|p| p.get()).collect();
        assert_eq!(periods, vec![3, 24]);
        assert!(config.has_period(period(3)));
        assert!(!config.has_period(period(6)));
    }

    #[test]
    fn with_ratios_ignores_empty_replacement() {
        let config = Configuration::default().with_ratios(BTreeSet::new());
        assert_eq!(config.ratios().len(), 4);
    }
}
