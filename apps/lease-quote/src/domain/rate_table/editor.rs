//! Configuration editor: turns a batch of operator edits into a new configuration.

use std::collections::{BTreeMap, BTreeSet};

use super::configuration::{Configuration, RateMatrix};
use crate::domain::shared::{DomainError, Period, Rate, Ratio};

/// Explicit rate edits keyed by (period, ratio).
pub type RateCells = BTreeMap<(Period, Ratio), Rate>;

/// A complete batch of settings edits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigurationEdits {
    /// New ratio set.
    pub ratios: BTreeSet<Ratio>,
    /// New period set.
    pub periods: BTreeSet<Period>,
    /// Rates supplied by the operator.
    pub cells: RateCells,
}

impl ConfigurationEdits {
    /// Apply this batch to `current`. See [`apply_edits`].
    ///
    /// # Errors
    ///
    /// Returns error if the batch has no ratios or no periods.
    pub fn apply_to(&self, current: &Configuration) -> Result<Configuration, DomainError> {
        apply_edits(current, &self.ratios, &self.periods, &self.cells)
    }
}

/// Build the configuration that replaces `current`.
///
/// The new matrix is exactly `periods x ratios`. Each cell takes the edited
/// rate when supplied and [`Rate::FALLBACK`] otherwise; edited cells outside
/// the new cross product are dropped.
///
/// # Errors
///
/// Returns error if `ratios` or `periods` is empty.
pub fn apply_edits(
    current: &Configuration,
    ratios: &BTreeSet<Ratio>,
    periods: &BTreeSet<Period>,
    cells: &RateCells,
) -> Result<Configuration, DomainError> {
    if periods.is_empty() {
        return Err(DomainError::rule(
            "NON_EMPTY_PERIODS",
            "at least one lease period is required",
        ));
    }

    let mut rates = RateMatrix::new();
    let mut filled = 0_usize;
    for period in periods {
        for ratio in ratios {
            let rate = cells.get(&(*period, *ratio)).copied().unwrap_or_else(|| {
                filled += 1;
                Rate::FALLBACK
            });
            rates.insert(*period, *ratio, rate);
        }
    }

    let dropped = cells
        .keys()
        .filter(|(period, ratio)| !periods.contains(period) || !ratios.contains(ratio))
        .count();
    let removed_periods = current.periods().filter(|p| !periods.contains(p)).count();
    let removed_ratios = current.ratios().difference(ratios).count();

    let next = Configuration::new(ratios.clone(), rates)?;

    tracing::debug!(
        ratios = ratios.len(),
        periods = periods.len(),
        filled,
        dropped,
        removed_periods,
        removed_ratios,
        "Applied rate table edits"
    );

    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn ratio(percent: u32) -> Ratio {
        Ratio::from_percent(percent).unwrap()
    }

    fn period(n: u32) -> Period {
        Period::new(n).unwrap()
    }

    fn rate(value: rust_decimal::Decimal) -> Rate {
        Rate::new(value).unwrap()
    }

    #[test]
    fn fills_every_gap_with_fallback() {
        let current = Configuration::default();
        let ratios: BTreeSet<Ratio> = [ratio(30), ratio(50)].into();
        let periods: BTreeSet<Period> = [period(6), period(18)].into();
        let mut cells = RateCells::new();
        cells.insert((period(6), ratio(30)), rate(dec!(0.2)));

        let next = apply_edits(&current, &ratios, &periods, &cells).unwrap();

        assert_eq!(next.rates().get(period(6), ratio(30)), Some(rate(dec!(0.2))));
        assert_eq!(next.rates().get(period(6), ratio(50)), Some(Rate::FALLBACK));
        assert_eq!(next.rates().get(period(18), ratio(30)), Some(Rate::FALLBACK));
        assert_eq!(next.rates().get(period(18), ratio(50)), Some(Rate::FALLBACK));
        assert_eq!(next.rates().cells().count(), 4);
    }

    #[test]
    fn drops_pairs_outside_new_cross_product() {
        let current = Configuration::default();
        let ratios: BTreeSet<Ratio> = [ratio(30)].into();
        let periods: BTreeSet<Period> = [period(6)].into();
        let mut cells = RateCells::new();
        cells.insert((period(6), ratio(30)), rate(dec!(0.235)));
        cells.insert((period(12), ratio(30)), rate(dec!(0.298)));
        cells.insert((period(6), ratio(25)), rate(dec!(0.255)));

        let next = apply_edits(&current, &ratios, &periods, &cells).unwrap();

        let all: Vec<_> = next.rates().cells().collect();
        assert_eq!(all, vec![(period(6), ratio(30), rate(dec!(0.235)))]);
        assert!(!next.has_period(period(12)));
        assert!(!next.has_ratio(ratio(25)));
    }

    #[test]
    fn periods_follow_the_edit() {
        let current = Configuration::default();
        let ratios = current.ratios().clone();
        let periods: BTreeSet<Period> = [period(3), period(6), period(36)].into();

        let next = apply_edits(&current, &ratios, &periods, &RateCells::new()).unwrap();
        let got: Vec<u32> = next.periods().map(|p| p.get()).collect();
        assert_eq!(got, vec![3, 6, 36]);
    }

    #[test]
    fn rejects_empty_sets() {
        let current = Configuration::default();
        let periods: BTreeSet<Period> = [period(6)].into();
        let ratios: BTreeSet<Ratio> = [ratio(30)].into();

        assert!(apply_edits(&current, &BTreeSet::new(), &periods, &RateCells::new()).is_err());
        assert!(apply_edits(&current, &ratios, &BTreeSet::new(), &RateCells::new()).is_err());
    }

    #[test]
    fn edits_struct_applies_the_same_rule() {
        let current = Configuration::default();
        let edits = ConfigurationEdits {
            ratios: [ratio(40)].into(),
            periods: [period(9)].into(),
            cells: RateCells::new(),
        };
        let next = edits.apply_to(&current).unwrap();
        assert_eq!(next.lookup_rate(period(9), ratio(40)), Rate::FALLBACK);
        assert_eq!(next.ratios().len(), 1);
    }
}
