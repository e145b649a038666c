//! View-level state machines. Each view keeps an explicit status enum and a
//! pure reducer; the async controllers only call services and dispatch.

mod auth_forms;
mod notifications_console;

pub use auth_forms::*;
pub use notifications_console::*;

/// Transient message for the toast area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flash {
    Success(String),
    Error(String),
}
