//! Shared Value Objects
//!
//! Immutable domain types used across the calculator.
//! Value objects are compared by value, not identity.

mod money;
mod period;
mod rate;
mod ratio;

pub use money::{CENT_SCALE, Money};
pub use period::Period;
pub use rate::Rate;
pub use ratio::Ratio;
