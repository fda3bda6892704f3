//! Settings draft: the editable state behind the hidden settings panel.
//!
//! A draft starts as a copy of the live configuration expressed the way an
//! operator types it (whole percentages, period counts, rate percentages with
//! one decimal). Nothing changes in the live configuration until the draft is
//! turned into [`ConfigurationEdits`] and applied.

use std::collections::BTreeSet;

use rust_decimal::{Decimal, RoundingStrategy};

use super::configuration::Configuration;
use super::editor::{ConfigurationEdits, RateCells};
use crate::domain::shared::{DomainError, Period, Rate, Ratio};

/// Percentage added by [`SettingsDraft::add_ratio`].
pub const NEW_RATIO_PERCENT: u32 = 5;

/// Step added to the largest period by [`SettingsDraft::add_period`].
pub const NEW_PERIOD_STEP: u32 = 3;

/// One editable cell of the rate table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DraftCell {
    /// Row period.
    pub period: Period,
    /// Column ratio.
    pub ratio: Ratio,
    /// Rate as a percentage.
    pub percent: Decimal,
}

/// Editable copy of the settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsDraft {
    ratio_percents: Vec<u32>,
    periods: Vec<u32>,
    cells: Vec<DraftCell>,
}

impl SettingsDraft {
    /// Snapshot `config` into a draft.
    ///
    /// Rate cells cover the current ratios x periods. Cells without a
    /// configured rate start at 0.
    #[must_use]
    pub fn from_configuration(config: &Configuration) -> Self {
        let ratio_percents = config
            .ratios()
            .iter()
            .map(|ratio| whole_percent(ratio.as_percent()))
            .collect();
        let periods = config.periods().map(|p| p.get()).collect();
        let cells = config
            .periods()
            .flat_map(|period| {
                config.ratios().iter().map(move |ratio| DraftCell {
                    period,
                    ratio: *ratio,
                    percent: config.rates().get(period, *ratio).map_or(Decimal::ZERO, |rate| {
                        rate.as_percent()
                            .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
                    }),
                })
            })
            .collect();

        Self {
            ratio_percents,
            periods,
            cells,
        }
    }

    /// Ratio entries as whole percentages, in panel order.
    #[must_use]
    pub fn ratio_percents(&self) -> &[u32] {
        &self.ratio_percents
    }

    /// Period entries, in panel order.
    #[must_use]
    pub fn periods(&self) -> &[u32] {
        &self.periods
    }

    /// Rate table cells.
    #[must_use]
    pub fn cells(&self) -> &[DraftCell] {
        &self.cells
    }

    /// Append a 5% ratio entry.
    pub fn add_ratio(&mut self) {
        self.ratio_percents.push(NEW_RATIO_PERCENT);
    }

    /// Append a period three longer than the longest one.
    pub fn add_period(&mut self) {
        let longest = self.periods.iter().copied().max().unwrap_or(0);
        self.periods.push(longest + NEW_PERIOD_STEP);
    }

    /// Overwrite a ratio entry.
    ///
    /// # Errors
    ///
    /// Returns error if `index` is out of range.
    pub fn set_ratio(&mut self, index: usize, percent: u32) -> Result<(), DomainError> {
        let slot = self
            .ratio_percents
            .get_mut(index)
            .ok_or_else(|| DomainError::invalid("ratio", format!("no entry at {index}")))?;
        *slot = percent;
        Ok(())
    }

    /// Overwrite a period entry.
    ///
    /// # Errors
    ///
    /// Returns error if `index` is out of range.
    pub fn set_period(&mut self, index: usize, installments: u32) -> Result<(), DomainError> {
        let slot = self
            .periods
            .get_mut(index)
            .ok_or_else(|| DomainError::invalid("period", format!("no entry at {index}")))?;
        *slot = installments;
        Ok(())
    }

    /// Remove a ratio entry, keeping at least one.
    ///
    /// # Errors
    ///
    /// Returns error if `index` is out of range or it is the last entry.
    pub fn remove_ratio(&mut self, index: usize) -> Result<u32, DomainError> {
        remove_keeping_one(&mut self.ratio_percents, index, "ratio")
    }

    /// Remove a period entry, keeping at least one.
    ///
    /// # Errors
    ///
    /// Returns error if `index` is out of range or it is the last entry.
    pub fn remove_period(&mut self, index: usize) -> Result<u32, DomainError> {
        remove_keeping_one(&mut self.periods, index, "period")
    }

    /// Set a rate table cell, as a percentage in 0..=100.
    ///
    /// # Errors
    ///
    /// Returns error if the cell is not in the table or the percentage is out
    /// of range.
    pub fn set_rate(
        &mut self,
        period: Period,
        ratio: Ratio,
        percent: Decimal,
    ) -> Result<(), DomainError> {
        if percent < Decimal::ZERO || percent > Decimal::ONE_HUNDRED {
            return Err(DomainError::invalid(
                "rate",
                format!("{percent}% is outside 0..=100"),
            ));
        }
        let cell = self
            .cells
            .iter_mut()
            .find(|cell| cell.period == period && cell.ratio == ratio)
            .ok_or_else(|| {
                DomainError::invalid("rate", format!("no cell for period {period}, ratio {ratio}"))
            })?;
        cell.percent = percent;
        Ok(())
    }

    /// Validate the draft and convert it into an edit batch.
    ///
    /// # Errors
    ///
    /// Returns error if a ratio is outside 1..=100%, a period is outside
    /// 1..=36, or a cell holds a negative rate.
    pub fn into_edits(self) -> Result<ConfigurationEdits, DomainError> {
        let ratios = self
            .ratio_percents
            .iter()
            .map(|percent| Ratio::from_percent(*percent))
            .collect::<Result<BTreeSet<_>, _>>()?;
        let periods = self
            .periods
            .iter()
            .map(|installments| Period::editable(*installments))
            .collect::<Result<BTreeSet<_>, _>>()?;
        let cells = self
            .cells
            .iter()
            .map(|cell| Ok(((cell.period, cell.ratio), Rate::from_percent(cell.percent)?)))
            .collect::<Result<RateCells, DomainError>>()?;

        Ok(ConfigurationEdits {
            ratios,
            periods,
            cells,
        })
    }
}

fn whole_percent(percent: Decimal) -> u32 {
    percent
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .mantissa()
        .try_into()
        .unwrap_or(0)
}

fn remove_keeping_one(
    entries: &mut Vec<u32>,
    index: usize,
    field: &str,
) -> Result<u32, DomainError> {
    if index >= entries.len() {
        return Err(DomainError::invalid(field, format!("no entry at {index}")));
    }
    if entries.len() == 1 {
        return Err(DomainError::rule(
            "KEEP_ONE_OPTION",
            format!("at least one {field} option must remain"),
        ));
    }
    Ok(entries.remove(index))
}
