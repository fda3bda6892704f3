//! Quoting
//!
//! Price input checks and the quote arithmetic.

pub mod engine;
pub mod errors;
pub mod price_input;
pub mod quote;

pub use engine::compute_quote;
pub use errors::QuoteError;
pub use price_input::{DEFAULT_ADMIN_TRIGGER, is_admin_trigger, is_valid_price, parse_price};
pub use quote::{Installment, Quote};
