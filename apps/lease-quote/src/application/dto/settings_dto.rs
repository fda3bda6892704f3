//! Persisted settings wire format.
//!
//! Two independent JSON strings:
//!
//! - `downPaymentOptions`: array of ratios, e.g. `[0.25,0.3,0.35,0.4]`
//! - `interestRates`: object keyed by period, then ratio, e.g.
//!   `{"6":{"0.25":0.255,"0.3":0.235}}`
//!
//! Numbers are converted through their shortest decimal text, never through
//! binary floats, so a stored `0.235` loads back as exactly `0.235`.

use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Number;
use thiserror::Error;

use crate::domain::rate_table::RateMatrix;
use crate::domain::shared::{Period, Rate, Ratio};

/// Store key for the rate matrix.
pub const RATES_KEY: &str = "interestRates";

/// Store key for the ratio list.
pub const RATIOS_KEY: &str = "downPaymentOptions";

/// Stored settings that cannot be used.
#[derive(Debug, Error)]
pub enum ConfigParseError {
    /// Value is not JSON of the expected shape.
    #[error("Malformed JSON in '{key}': {source}")]
    Json {
        /// Store key.
        key: &'static str,
        /// Parser error.
        source: serde_json::Error,
    },

    /// JSON parsed but an entry is out of range.
    #[error("Invalid entry in '{key}': {message}")]
    Invalid {
        /// Store key.
        key: &'static str,
        /// Error message.
        message: String,
    },

    /// JSON parsed but holds nothing.
    #[error("'{key}' holds no entries")]
    Empty {
        /// Store key.
        key: &'static str,
    },
}

/// Encode a ratio set as a JSON array.
///
/// # Errors
///
/// Returns error if a ratio cannot be represented as a JSON number.
pub fn encode_ratios(ratios: &BTreeSet<Ratio>) -> Result<String, serde_json::Error> {
    let numbers = ratios
        .iter()
        .map(|ratio| number_from_decimal(ratio.value()))
        .collect::<Result<Vec<_>, _>>()?;
    serde_json::to_string(&numbers)
}

/// Decode a JSON array of ratios.
///
/// # Errors
///
/// Returns error if the text is not an array of numbers in (0, 1], or is empty.
pub fn decode_ratios(raw: &str) -> Result<BTreeSet<Ratio>, ConfigParseError> {
    let numbers: Vec<Number> = serde_json::from_str(raw).map_err(|source| {
        ConfigParseError::Json {
            key: RATIOS_KEY,
            source,
        }
    })?;

    let ratios = numbers
        .iter()
        .map(|number| {
            let value = decimal_from_text(&number.to_string(), RATIOS_KEY)?;
            Ratio::new(value).map_err(|e| invalid(RATIOS_KEY, e))
        })
        .collect::<Result<BTreeSet<_>, _>>()?;

    if ratios.is_empty() {
        return Err(ConfigParseError::Empty { key: RATIOS_KEY });
    }
    Ok(ratios)
}

/// Encode a rate matrix as nested JSON objects.
///
/// # Errors
///
/// Returns error if a rate cannot be represented as a JSON number.
pub fn encode_rates(rates: &RateMatrix) -> Result<String, serde_json::Error> {
    let mut wire: BTreeMap<String, BTreeMap<String, Number>> = BTreeMap::new();
    for period in rates.periods() {
        wire.entry(period.to_string()).or_default();
    }
    for (period, ratio, rate) in rates.cells() {
        wire.entry(period.to_string())
            .or_default()
            .insert(ratio.value().normalize().to_string(), number_from_decimal(rate.value())?);
    }
    serde_json::to_string(&wire)
}

/// Decode nested JSON objects into a rate matrix.
///
/// # Errors
///
/// Returns error if the shape is wrong, a key or rate is out of range, or no
/// period is present.
pub fn decode_rates(raw: &str) -> Result<RateMatrix, ConfigParseError> {
    let wire: BTreeMap<String, BTreeMap<String, Option<Number>>> = serde_json::from_str(raw)
        .map_err(|source| ConfigParseError::Json {
            key: RATES_KEY,
            source,
        })?;

    let mut rates = RateMatrix::new();
    for (period_key, row) in &wire {
        let period = Period::from_str(period_key).map_err(|e| invalid(RATES_KEY, e))?;
        rates.insert_period(period);
        for (ratio_key, number) in row {
            // A cleared rate input is stored as null.
            let Some(number) = number else {
                tracing::warn!(
                    period = %period_key,
                    ratio = %ratio_key,
                    "Skipping null stored rate"
                );
                continue;
            };
            let ratio = Ratio::new(decimal_from_text(ratio_key, RATES_KEY)?)
                .map_err(|e| invalid(RATES_KEY, e))?;
            let rate = Rate::new(decimal_from_text(&number.to_string(), RATES_KEY)?)
                .map_err(|e| invalid(RATES_KEY, e))?;
            rates.insert(period, ratio, rate);
        }
    }

    if rates.is_empty() {
        return Err(ConfigParseError::Empty { key: RATES_KEY });
    }
    Ok(rates)
}

fn number_from_decimal(value: Decimal) -> Result<Number, serde_json::Error> {
    serde_json::from_str(&value.normalize().to_string())
}

fn decimal_from_text(text: &str, key: &'static str) -> Result<Decimal, ConfigParseError> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .map(|d| d.normalize())
        .map_err(|e| invalid(key, format!("'{text}': {e}")))
}

fn invalid(key: &'static str, message: impl ToString) -> ConfigParseError {
    ConfigParseError::Invalid {
        key,
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::rate_table::Configuration;
    use rust_decimal_macros::dec;

    #[test]
    fn ratios_encode_in_shortest_form() {
        let encoded = encode_ratios(&Configuration::default_ratios()).unwrap();
        assert_eq!(encoded, "[0.25,0.3,0.35,0.4]");
    }

    #[test]
    fn rates_encode_with_string_keys() {
        let mut rates = RateMatrix::new();
        rates.insert(
            Period::new(6).unwrap(),
            Ratio::new(dec!(0.30)).unwrap(),
            Rate::new(dec!(0.235)).unwrap(),
        );
        assert_eq!(encode_rates(&rates).unwrap(), r#"{"6":{"0.3":0.235}}"#);
    }

    #[test]
    fn decodes_browser_written_values() {
        let rates = decode_rates(
            r#"{"6":{"0.25":0.255,"0.3":0.235,"0.35":0.23,"0.4":0.22},"12":{"0.4":0.285}}"#,
        )
        .unwrap();
        assert_eq!(
            rates.get(Period::new(6).unwrap(), Ratio::from_percent(30).unwrap()),
            Some(Rate::new(dec!(0.235)).unwrap())
        );
        let periods: Vec<u32> = rates.periods().map(|p| p.get()).collect();
        assert_eq!(periods, vec![6, 12]);

        let ratios = decode_ratios("[0.25, 0.3, 0.35, 0.4]").unwrap();
        assert_eq!(ratios, Configuration::default_ratios());
    }

    #[test]
    fn default_matrix_survives_a_round_trip() {
        let rates = Configuration::default_rates();
        let decoded = decode_rates(&encode_rates(&rates).unwrap()).unwrap();
        assert_eq!(decoded, rates);
    }

    #[test]
    fn empty_period_row_is_kept() {
        let rates = decode_rates(r#"{"3":{}}"#).unwrap();
        assert!(rates.contains_period(Period::new(3).unwrap()));
        assert_eq!(encode_rates(&rates).unwrap(), r#"{"3":{}}"#);
    }

    #[test]
    fn null_cell_is_skipped() {
        let rates = decode_rates(r#"{"6":{"0.25":null,"0.3":0.235}}"#).unwrap();
        let six = Period::new(6).unwrap();
        assert_eq!(rates.get(six, Ratio::from_percent(25).unwrap()), None);
        assert_eq!(
            rates.get(six, Ratio::from_percent(30).unwrap()),
            Some(Rate::new(dec!(0.235)).unwrap())
        );
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            decode_ratios("not json"),
            Err(ConfigParseError::Json { .. })
        ));
        assert!(matches!(
            decode_rates("{\"6\":"),
            Err(ConfigParseError::Json { .. })
        ));
        assert!(matches!(
            decode_rates("[1,2,3]"),
            Err(ConfigParseError::Json { .. })
        ));
    }

    #[test]
    fn rejects_out_of_range_entries() {
        assert!(matches!(
            decode_ratios("[0.3, 1.5]"),
            Err(ConfigParseError::Invalid { .. })
        ));
        assert!(matches!(
            decode_rates(r#"{"0":{"0.3":0.2}}"#),
            Err(ConfigParseError::Invalid { .. })
        ));
        assert!(matches!(
            decode_rates(r#"{"six":{"0.3":0.2}}"#),
            Err(ConfigParseError::Invalid { .. })
        ));
        assert!(matches!(
            decode_rates(r#"{"6":{"0.3":-0.2}}"#),
            Err(ConfigParseError::Invalid { .. })
        ));
    }

    #[test]
    fn rejects_empty_collections() {
        assert!(matches!(
            decode_ratios("[]"),
            Err(ConfigParseError::Empty { .. })
        ));
        assert!(matches!(
            decode_rates("{}"),
            Err(ConfigParseError::Empty { .. })
        ));
    }
}
