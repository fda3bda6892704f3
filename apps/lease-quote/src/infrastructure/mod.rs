//! Infrastructure Layer
//!
//! Adapters for the ports defined in the application layer:
//!
//! - **Driven Adapters (Outbound)**
//!   - `persistence/`: JSON file settings store
//!
//! - **Driver Adapters (Inbound)**
//!   - `console/`: line-oriented calculator front end

pub mod console;
pub mod persistence;

pub use console::{ConsoleSession, Reply};
pub use persistence::JsonFileSettingsStore;
