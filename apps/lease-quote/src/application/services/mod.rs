//! Application Services
//!
//! Configuration persistence and the calculator controller.

mod calculator_service;
mod configuration_persistence;

pub use calculator_service::{CalculatorPolicy, CalculatorService};
pub use configuration_persistence::{SaveOutcome, load_configuration, save_configuration};
