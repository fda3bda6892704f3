//! Presentation views for quotes and the rate table.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::domain::quoting::Quote;
use crate::domain::rate_table::Configuration;
use crate::domain::shared::{CENT_SCALE, Money};

/// Format an amount as `¥12,350.00元`.
#[must_use]
pub fn format_currency(amount: Money) -> String {
    let rounded = amount
        .amount()
        .round_dp_with_strategy(CENT_SCALE, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}¥{grouped}.{cents}元")
}

/// One schedule row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallmentRow {
    /// Installment number.
    pub number: u32,
    /// Formatted amount.
    pub amount: String,
}

/// A quote formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuoteView {
    /// Product price.
    pub price: String,
    /// Down-payment ratio, e.g. `30%`.
    pub ratio: String,
    /// Lease period.
    pub period: u32,
    /// Markup rate, e.g. `23.5%`.
    pub rate: String,
    /// Amount paid up front.
    pub down_payment: String,
    /// Total repayment.
    pub total: String,
    /// Total minus down payment.
    pub remaining: String,
    /// Regular installment amount.
    pub installment_amount: String,
    /// Number of billed installments.
    pub installment_count: u32,
    /// Billed installments.
    pub schedule: Vec<InstallmentRow>,
}

impl From<&Quote> for QuoteView {
    fn from(quote: &Quote) -> Self {
        Self {
            price: format_currency(quote.price),
            ratio: quote.ratio.to_string(),
            period: quote.period.get(),
            rate: quote.rate.to_string(),
            down_payment: format_currency(quote.down_payment),
            total: format_currency(quote.total),
            remaining: format_currency(quote.remaining),
            installment_amount: format_currency(quote.installment_amount),
            installment_count: quote.installment_count,
            schedule: quote
                .schedule
                .iter()
                .map(|i| InstallmentRow {
                    number: i.number,
                    amount: format_currency(i.amount),
                })
                .collect(),
        }
    }
}

impl QuoteView {
    /// Render as text lines.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("price        {}", self.price),
            format!("down payment {} ({})", self.down_payment, self.ratio),
            format!("total        {} ({} over {} installments)", self.total, self.rate, self.period),
        ];
        if self.schedule.is_empty() {
            lines.push("no further installments".to_string());
        }
        for row in &self.schedule {
            lines.push(format!("  #{:<3} {}", row.number, row.amount));
        }
        lines
    }
}

/// The rate matrix formatted as a grid: one row per period, one column per ratio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RateTableView {
    /// Column headers, e.g. `30%`.
    pub ratios: Vec<String>,
    /// Period label and one cell per ratio; `-` when unconfigured.
    pub rows: Vec<(u32, Vec<String>)>,
}

impl From<&Configuration> for RateTableView {
    fn from(config: &Configuration) -> Self {
        let ratios = config.ratios().iter().map(ToString::to_string).collect();
        let rows = config
            .periods()
            .map(|period| {
                let cells = config
                    .ratios()
                    .iter()
                    .map(|ratio| {
                        config
                            .rates()
                            .get(period, *ratio)
                            .map_or_else(|| "-".to_string(), |rate| rate.to_string())
                    })
                    .collect();
                (period.get(), cells)
            })
            .collect();
        Self { ratios, rows }
    }
}

impl RateTableView {
    /// Render as aligned text lines.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let header = self
            .ratios
            .iter()
            .fold(String::from("period"), |acc, r| format!("{acc} {r:>7}"));
        let mut lines = vec![header];
        for (period, cells) in &self.rows {
            let row = cells
                .iter()
                .fold(format!("{period:>6}"), |acc, c| format!("{acc} {c:>7}"));
            lines.push(row);
        }
        lines
    }
}

/// One-decimal label for a rate percentage, as the settings editor shows it.
#[must_use]
pub fn percent_label(percent: Decimal) -> String {
    format!("{:.1}%", percent.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero))
}
