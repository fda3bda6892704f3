// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::needless_collect,
        clippy::default_trait_access,
        clippy::items_after_statements
    )
)]

//! Lease Quote - Rent-to-own Calculator Library
//!
//! Quotes lease plans for a product price: down payment, total repayment and
//! an installment schedule, driven by an operator-editable rate table.
//!
//! # Architecture (Clean Architecture + DDD + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Core business logic
//!   - `shared`: `Money`, `Ratio`, `Period`, `Rate`
//!   - `rate_table`: Configuration, option gating, settings editing
//!   - `quoting`: Price input and the quote engine
//!
//! - **Application**: Orchestration
//!   - `ports`: `SettingsStore`
//!   - `services`: Configuration persistence, `CalculatorService`
//!   - `dto`: Persisted settings format, quote and rate table views
//!
//! - **Infrastructure**: Adapters
//!   - `persistence`: JSON file settings store
//!   - `console`: Line-oriented front end
//!
//! - **Config**: YAML configuration with environment interpolation

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Domain layer - Core business logic with no external dependencies.
pub mod domain;

/// Application layer - Services and port definitions.
pub mod application;

/// Infrastructure layer - Adapters.
pub mod infrastructure;

/// Configuration loading.
pub mod config;

/// Error categories.
pub mod error;

// =============================================================================
// Re-exports
// =============================================================================

// Domain re-exports
pub use domain::quoting::{Installment, Quote, QuoteError, compute_quote};
pub use domain::rate_table::{Configuration, OptionDeriver, PeriodGate, SettingsDraft};
pub use domain::shared::{DomainError, Money, Period, Rate, Ratio};

// Application re-exports
pub use application::dto::{QuoteView, RateTableView};
pub use application::ports::{InMemorySettingsStore, SettingsStore, StoreError};
pub use application::services::{CalculatorPolicy, CalculatorService, SaveOutcome};

// Infrastructure re-exports
pub use infrastructure::console::ConsoleSession;
pub use infrastructure::persistence::JsonFileSettingsStore;

pub use error::ErrorCode;
