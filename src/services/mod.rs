mod api_client;
mod auth_service;
mod notification_service;

pub use api_client::*;
pub use auth_service::*;
pub use notification_service::*;

#[cfg(test)]
mod tests;
