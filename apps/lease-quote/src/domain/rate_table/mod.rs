//! Rate Table
//!
//! The operator-editable settings behind every quote:
//!
//! - [`configuration`]: allowed ratios, rate matrix, rate lookup with fallback
//! - [`options`]: which ratios and periods are offered
//! - [`editor`]: applying a batch of edits atomically
//! - [`draft`]: the settings panel's editable copy

pub mod configuration;
pub mod draft;
pub mod editor;
pub mod options;

pub use configuration::{Configuration, RateMatrix};
pub use draft::{DraftCell, SettingsDraft};
pub use editor::{ConfigurationEdits, RateCells, apply_edits};
pub use options::{GateRule, OptionDeriver, Options, PeriodGate};
