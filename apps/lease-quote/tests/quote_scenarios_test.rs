//! Quote Scenario Tests
//!
//! End-to-end quote behavior through the public library API: reference
//! scenarios, fallback pricing, period gating and the repayment identity.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use lease_quote::application::ports::InMemorySettingsStore;
use lease_quote::application::services::{CalculatorPolicy, CalculatorService};
use lease_quote::domain::quoting::compute_quote;
use lease_quote::domain::rate_table::{Configuration, RateMatrix};
use lease_quote::domain::shared::{Money, Period, Rate, Ratio};

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

// =============================================================================
// Reference scenarios
// =============================================================================

#[test]
fn ten_thousand_at_thirty_percent_over_six() {
    let quote = service().on_calculate("10000", ratio(30), period(6)).unwrap();

    assert_eq!(quote.rate.value(), dec!(0.235));
    assert_eq!(quote.total.amount(), dec!(12350.00));
    assert_eq!(quote.down_payment.amount(), dec!(3000.00));
    assert_eq!(quote.remaining.amount(), dec!(9350.00));
    assert_eq!(quote.installment_count, 5);
    assert!(
        quote
            .schedule
            .iter()
            .all(|i| i.amount.amount() == dec!(1870.00))
    );
}

#[test]
fn unconfigured_period_uses_fallback_rate() {
    let quote = compute_quote(
        Money::new(dec!(5000)),
        ratio(30),
        period(99),
        &Configuration::default(),
    )
    .unwrap();

    assert_eq!(quote.rate, Rate::FALLBACK);
    assert_eq!(quote.total.amount(), dec!(5850.00));
    assert_eq!(quote.down_payment.amount(), dec!(1500.00));
    assert_eq!(quote.installment_count, 98);
}

#[test]
fn single_period_has_no_installments() {
    let rates: RateMatrix = [(period(1), ratio(30), Rate::new(dec!(0.1)).unwrap())]
        .into_iter()
        .collect();
    let config = Configuration::new([ratio(30)].into(), rates).unwrap();

    let quote = compute_quote(Money::new(dec!(800)), ratio(30), period(1), &config).unwrap();

    assert!(quote.installment_amount.is_zero());
    assert_eq!(quote.installment_count, 0);
    assert!(quote.schedule.is_empty());
    assert_eq!(quote.total.amount(), dec!(880.00));
}

#[test]
fn uneven_split_puts_leftover_cents_last() {
    let quote = service().on_calculate("99.99", ratio(30), period(6)).unwrap();

    // 99.99 * 1.235 = 123.49 after rounding, minus 30.00 down leaves 93.49 over 5.
    assert_eq!(quote.total.amount(), dec!(123.49));
    assert_eq!(quote.down_payment.amount(), dec!(30.00));
    assert_eq!(quote.remaining.amount(), dec!(93.49));
    assert_eq!(quote.installment_amount.amount(), dec!(18.69));
    assert!(quote.schedule[..4].iter().all(|i| i.amount.amount() == dec!(18.69)));
    assert_eq!(quote.schedule[4].amount.amount(), dec!(18.73));
    assert_eq!(quote.repaid_total(), quote.total);
}

// =============================================================================
// Gating
// =============================================================================

#[test]
fn low_down_payment_cannot_take_twelve_periods() {
    let service = service();

    let offered: Vec<u32> = service
        .period_options(Some(ratio(25)))
        .choices
        .iter()
        .map(|p| p.get())
        .collect();
    assert_eq!(offered, vec![6, 9]);

    let err = service.on_calculate("1000", ratio(25), period(12)).unwrap_err();
    assert!(err.is_validation());
}

#[test]
fn high_down_payment_unlocks_every_period() {
    let service = service();
    let offered: Vec<u32> = service
        .period_options(Some(ratio(40)))
        .choices
        .iter()
        .map(|p| p.get())
        .collect();
    assert_eq!(offered, vec![6, 9, 12]);

    let quote = service.on_calculate("1000", ratio(40), period(12)).unwrap();
    assert_eq!(quote.rate.value(), dec!(0.285));
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn schedule_adds_up_to_total(
        cents in 1_i64..=1_000_000_000,
        ratio_percent in 1_u32..=100,
        installments in 2_u32..=36,
        rate_permille in 0_u32..=1000,
    ) {
        let ratio = ratio(ratio_percent);
        let period = period(installments);
        let rate = Rate::new(Decimal::new(i64::from(rate_permille), 3)).unwrap();
        let rates: RateMatrix = [(period, ratio, rate)].into_iter().collect();
        let config = Configuration::new([ratio].into(), rates).unwrap();

        let quote = compute_quote(Money::from_cents(cents), ratio, period, &config).unwrap();

        prop_assert_eq!(quote.repaid_total(), quote.total);
        prop_assert_eq!(quote.schedule.len() as u32, installments - 1);
        prop_assert!(quote.schedule.iter().all(|i| !i.amount.is_negative()));
        prop_assert!(quote.schedule.iter().all(|i| i.amount.is_whole_cents()));

        let numbers: Vec<u32> = quote.schedule.iter().map(|i| i.number).collect();
        prop_assert_eq!(numbers, (2..=installments).collect::<Vec<_>>());
    }

    #[test]
    fn only_final_installment_differs(
        cents in 1_i64..=100_000_000,
        installments in 2_u32..=36,
    ) {
        let quote = compute_quote(
            Money::from_cents(cents),
            ratio(30),
            period(installments),
            &Configuration::default(),
        )
        .unwrap();

        let (last, rest) = quote.schedule.split_last().unwrap();
        prop_assert!(rest.iter().all(|i| i.amount == quote.installment_amount));
        let extra = last.amount - quote.installment_amount;
        prop_assert!(!extra.is_negative());
        prop_assert!(extra < Money::from_cents(i64::from(installments)));
    }
}
