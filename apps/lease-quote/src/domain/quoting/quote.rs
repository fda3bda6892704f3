//! Quote result types.

use serde::Serialize;

use crate::domain::shared::{Money, Period, Rate, Ratio};

/// One billed installment after the down payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Installment {
    /// Installment number; the down payment is number 1.
    pub number: u32,
    /// Amount due.
    pub amount: Money,
}

/// A computed lease quote. Created per request and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quote {
    /// Product price.
    pub price: Money,
    /// Down-payment ratio.
    pub ratio: Ratio,
    /// Lease period.
    pub period: Period,
    /// Markup rate applied.
    pub rate: Rate,
    /// Amount paid up front.
    pub down_payment: Money,
    /// Total repayment, down payment included.
    pub total: Money,
    /// Total minus down payment.
    pub remaining: Money,
    /// Regular installment amount; the final one may carry extra cents.
    pub installment_amount: Money,
    /// Number of billed installments.
    pub installment_count: u32,
    /// Billed installments, numbered from 2.
    pub schedule: Vec<Installment>,
}

impl Quote {
    /// Down payment plus every scheduled installment.
    #[must_use]
    pub fn repaid_total(&self) -> Money {
        self.down_payment + self.schedule.iter().map(|i| i.amount).sum::<Money>()
    }
}
