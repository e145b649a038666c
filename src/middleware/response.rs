use reqwest::Response;

use crate::error::{AppError, AppResult};
use crate::events::EventBus;
use crate::messages::Messages;
use crate::utils::error_from_response;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// 401 or 403
    Authentication,
    /// 5xx
    Server,
    /// Any other failure; no signal.
    Other,
}

pub fn classify_status(status: u16) -> FailureClass {
    match status {
        401 | 403 => FailureClass::Authentication,
        s if s >= 500 => FailureClass::Server,
        _ => FailureClass::Other,
    }
}

/// Incoming hook: passes successes through and raises a signal for
/// authentication and server failures. The failure is always returned to the
/// caller as well.
#[derive(Clone)]
pub struct ResponseInterceptor {
    events: EventBus,
    messages: Messages,
}

impl ResponseInterceptor {
    pub fn new(events: EventBus, messages: Messages) -> Self {
        Self { events, messages }
    }

    pub async fn inspect(&self, result: Result<Response, reqwest::Error>) -> AppResult<Response> {
        let response = match result {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Request did not complete: {}", e);
                return Err(AppError::from(e));
            }
        };

        if response.status().is_success() {
            return Ok(response);
        }

        let err = error_from_response(response, self.messages.generic_failure()).await;
        Err(self.signal(err))
    }

    /// Raise the signal matching `err`'s status and hand the error back.
    pub fn signal(&self, err: AppError) -> AppError {
        let Some(status) = err.status() else {
            return err;
        };

        match classify_status(status) {
            FailureClass::Authentication => {
                tracing::warn!(status, "Authentication failure: {}", err);
                self.events
                    .authentication_error(self.messages.session_expired(), Some(status));
            }
            FailureClass::Server => {
                tracing::error!(status, "Server failure: {}", err);
                self.events.server_error(self.messages.server_error(), status);
            }
            FailureClass::Other => {
                tracing::debug!(status, "Request rejected: {}", err);
            }
        }

        err
    }
}
