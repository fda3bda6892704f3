//! Price field input: validation and the settings panel trigger.
//!
//! The two checks are independent. Typing the trigger phrase opens the
//! settings panel; it is never a valid price and never reports a price error
//! by itself.

use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use rust_decimal::Decimal;

use super::errors::QuoteError;
use crate::domain::shared::Money;

/// Phrase that opens the settings panel when typed into the price field.
pub const DEFAULT_ADMIN_TRIGGER: &str = "今天开心888";

#[allow(clippy::expect_used)] // Regex is compile-time constant; expect() is safe here
fn price_pattern() -> &'static Regex {
    static PRICE_REGEX: OnceLock<Regex> = OnceLock::new();
    PRICE_REGEX.get_or_init(|| {
        Regex::new(r"^[0-9]+(?:\.[0-9]{1,2})?$").expect("price regex is valid")
    })
}

/// Parse price text: digits with at most two decimal places, greater than zero.
///
/// # Errors
///
/// Returns [`QuoteError::Validation`] describing why the text was rejected.
pub fn parse_price(text: &str) -> Result<Money, QuoteError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(QuoteError::validation("price", "a product price is required"));
    }
    if !price_pattern().is_match(text) {
        return Err(QuoteError::validation(
            "price",
            format!("'{text}' is not an amount with at most two decimal places"),
        ));
    }

    let amount = Decimal::from_str(text)
        .map_err(|e| QuoteError::validation("price", format!("'{text}': {e}")))?;
    let price = Money::new(amount);
    price.validate_as_price()?;
    Ok(price)
}

/// Returns true if `text` is an acceptable price.
#[must_use]
pub fn is_valid_price(text: &str) -> bool {
    parse_price(text).is_ok()
}

/// Returns true if `text` is exactly the settings panel trigger phrase.
#[must_use]
pub fn is_admin_trigger(text: &str, phrase: &str) -> bool {
    !phrase.is_empty() && text == phrase
}
