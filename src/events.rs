use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast;

const EVENT_CAPACITY: usize = 64;

/// Process-wide signals raised by the transport layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientEvent {
    #[serde(rename_all = "camelCase")]
    AuthenticationError {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        status: Option<u16>,
    },
    #[serde(rename_all = "camelCase")]
    ServerError { message: String, status: u16 },
    #[serde(rename_all = "camelCase")]
    NetworkStatusChange { is_online: bool },
}

/// Broadcast channel of [`ClientEvent`]s.
///
/// Emitting never fails: with no subscribers the event is dropped.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<ClientEvent>,
    online: Arc<AtomicBool>,
}

impl EventBus {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            sender,
            online: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ClientEvent> {
        self.sender.subscribe()
    }

    pub fn emit(&self, event: ClientEvent) {
        tracing::debug!(?event, "Dispatching client event");
        let _ = self.sender.send(event);
    }

    pub fn authentication_error(&self, message: &str, status: Option<u16>) {
        self.emit(ClientEvent::AuthenticationError {
            message: message.to_string(),
            status,
        });
    }

    pub fn server_error(&self, message: &str, status: u16) {
        self.emit(ClientEvent::ServerError {
            message: message.to_string(),
            status,
        });
    }

    /// Record connectivity as seen by the host. Emits only on transitions.
    pub fn report_connectivity(&self, is_online: bool) {
        let previous = self.online.swap(is_online, Ordering::SeqCst);
        if previous != is_online {
            tracing::info!(is_online, "Network status changed");
            self.emit(ClientEvent::NetworkStatusChange { is_online });
        }
    }

    pub fn is_online(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
