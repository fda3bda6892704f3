//! Application Layer
//!
//! The application layer wires the domain to storage and the front end.
//! It defines:
//!
//! - **Ports**: The settings store interface
//! - **Services**: Configuration persistence and the calculator controller
//! - **DTOs**: The persisted settings format and display views

pub mod dto;
pub mod ports;
pub mod services;

pub use dto::*;
pub use ports::*;
pub use services::*;
