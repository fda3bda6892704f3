//! Quote engine: price, ratio and period in, down payment and schedule out.
//!
//! All amounts are decimal. Down payment and total are rounded to cents
//! first; the remainder is split into equal installments truncated to the
//! cent, and the leftover cents go to the final installment so the schedule
//! always adds back up to the total.

use rust_decimal::Decimal;

use super::errors::QuoteError;
use super::quote::{Installment, Quote};
use crate::domain::rate_table::Configuration;
use crate::domain::shared::{Money, Period, Ratio};

/// Compute a quote from validated selections.
///
/// `ratio` and `period` are expected to be checked against the active option
/// sets by the caller; an unconfigured pair is priced at the fallback rate.
///
/// # Errors
///
/// Returns [`QuoteError::Validation`] if the price is not a positive amount
/// in whole cents, and [`QuoteError::Computation`] on decimal overflow.
pub fn compute_quote(
    price: Money,
    ratio: Ratio,
    period: Period,
    config: &Configuration,
) -> Result<Quote, QuoteError> {
    price.validate_as_price()?;

    let rate = config.lookup_rate(period, ratio);
    let total = price
        .checked_mul(Decimal::ONE + rate.value())
        .ok_or_else(|| QuoteError::computation("total amount overflowed"))?
        .round();
    let down_payment = price
        .checked_mul(ratio.value())
        .ok_or_else(|| QuoteError::computation("down payment overflowed"))?
        .round();
    let remaining = total - down_payment;
    let installment_count = period.billed_installments();
    let schedule = split_installments(remaining, installment_count)?;
    let installment_amount = schedule.first().map_or(Money::ZERO, |i| i.amount);

    tracing::debug!(
        %price,
        %ratio,
        %period,
        %rate,
        %total,
        %down_payment,
        installment_count,
        "Computed quote"
    );

    Ok(Quote {
        price,
        ratio,
        period,
        rate,
        down_payment,
        total,
        remaining,
        installment_amount,
        installment_count,
        schedule,
    })
}

/// Split `remaining` into `count` installments numbered from 2.
fn split_installments(remaining: Money, count: u32) -> Result<Vec<Installment>, QuoteError> {
    if count == 0 {
        return Ok(Vec::new());
    }

    let base = remaining
        .checked_div(count)
        .ok_or_else(|| QuoteError::computation("installment split overflowed"))?
        .truncate();
    let leftover = remaining - base * count;

    Ok((0..count)
        .map(|index| Installment {
            number: index + 2,
            amount: if index + 1 == count { base + leftover } else { base },
        })
        .collect())
}
