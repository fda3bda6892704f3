//! Data Transfer Objects
//!
//! Wire format for persisted settings and display views.

pub mod quote_dto;
pub mod settings_dto;

pub use quote_dto::{InstallmentRow, QuoteView, RateTableView, format_currency, percent_label};
pub use settings_dto::{
    ConfigParseError, RATES_KEY, RATIOS_KEY, decode_rates, decode_ratios, encode_rates,
    encode_ratios,
};
