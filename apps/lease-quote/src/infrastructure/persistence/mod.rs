//! Persistence Adapters
//!
//! Settings store implementations backed by the filesystem.

pub mod json_file;

pub use json_file::JsonFileSettingsStore;
