//! Console adapter.
//!
//! Inbound adapter reading calculator commands line by line and delegating to
//! the calculator service.

mod command;
mod session;

pub use command::{Command, CommandError, EDITOR_HELP, HELP};
pub use session::{ConsoleSession, Reply};
