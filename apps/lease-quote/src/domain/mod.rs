//! Domain Layer
//!
//! The innermost layer containing business logic with zero infrastructure dependencies.
//! This layer defines:
//!
//! - **Value Objects**: Immutable domain types with equality by value
//! - **Domain Services**: Stateless business logic
//!
//! # Bounded Contexts
//!
//! - [`rate_table`]: Ratios, periods, rate matrix, option gating and editing
//! - [`quoting`]: Price input and quote arithmetic

pub mod quoting;
pub mod rate_table;
pub mod shared;
