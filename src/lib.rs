//! EcoCollect client core: credential storage, the request/response
//! interception pipeline, the auth and notifications services, and the
//! view state machines built on top of them.

pub mod config;
pub mod error;
pub mod events;
pub mod messages;
pub mod middleware;
pub mod models;
pub mod services;
pub mod storage;
pub mod utils;
pub mod views;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use events::{ClientEvent, EventBus};
