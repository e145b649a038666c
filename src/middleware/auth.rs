use reqwest::RequestBuilder;

use crate::error::{AppError, AppResult};
use crate::events::EventBus;
use crate::messages::Messages;
use crate::storage::TokenStore;

/// Outgoing hook: attaches the stored credential as a bearer token.
#[derive(Clone)]
pub struct AuthInterceptor {
    tokens: TokenStore,
    events: EventBus,
    messages: Messages,
}

impl AuthInterceptor {
    pub fn new(tokens: TokenStore, events: EventBus, messages: Messages) -> Self {
        Self {
            tokens,
            events,
            messages,
        }
    }

    /// With no stored token the request goes out without an
    /// `Authorization` header. If the store itself cannot be read the request
    /// is aborted and an authentication signal is raised.
    pub fn apply(&self, request: RequestBuilder) -> AppResult<RequestBuilder> {
        match self.tokens.get() {
            Ok(Some(token)) => Ok(request.bearer_auth(token)),
            Ok(None) => {
                tracing::warn!("No stored credential, sending request without Authorization header");
                Ok(request)
            }
            Err(e) => {
                tracing::error!("Credential store unreadable: {}", e);
                self.events
                    .authentication_error(self.messages.credential_unreadable(), None);
                Err(AppError::from(e))
            }
        }
    }
}
