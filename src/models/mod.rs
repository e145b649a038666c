mod auth;
mod common;
mod notification;

pub use auth::*;
pub use common::*;
pub use notification::*;
