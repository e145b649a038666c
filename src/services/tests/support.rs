use actix_web::dev::Service;
use actix_web::{web, App, HttpServer};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};

use crate::config::Config;
use crate::events::{ClientEvent, EventBus};
use crate::messages::Locale;
use crate::services::ApiClient;
use crate::storage::{MemoryStorage, TokenStore};

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: String,
    pub authorization: Option<String>,
}

#[derive(Clone, Default)]
pub struct Recorder(Arc<Mutex<Vec<RecordedRequest>>>);

impl Recorder {
    fn push(&self, request: RecordedRequest) {
        self.0.lock().unwrap().push(request);
    }

    pub fn all(&self) -> Vec<RecordedRequest> {
        self.0.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.0.lock().unwrap().len()
    }

    pub fn last(&self) -> RecordedRequest {
        self.all().pop().expect("no request reached the backend")
    }
}

pub struct FakeBackend {
    pub base_url: String,
    pub recorder: Recorder,
}

/// Start an in-process backend on an ephemeral port. Every request that
/// reaches it is recorded before routing.
pub async fn spawn_backend<F>(routes: F) -> FakeBackend
where
    F: Fn(&mut web::ServiceConfig) + Send + Clone + 'static,
{
    let recorder = Recorder::default();
    let app_recorder = recorder.clone();

    let server = HttpServer::new(move || {
        let recorder = app_recorder.clone();
        App::new()
            .wrap_fn(move |req, srv| {
                recorder.push(RecordedRequest {
                    method: req.method().to_string(),
                    path: req.path().to_string(),
                    query: req.query_string().to_string(),
                    authorization: req
                        .headers()
                        .get("Authorization")
                        .and_then(|h| h.to_str().ok())
                        .map(|h| h.to_string()),
                });
                srv.call(req)
            })
            .configure(routes.clone())
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .expect("Failed to bind fake backend");

    let port = server.addrs()[0].port();
    actix_rt::spawn(server.run());

    FakeBackend {
        base_url: format!("http://127.0.0.1:{}", port),
        recorder,
    }
}

/// Base URL of a port with nothing listening.
pub fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to reserve port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

pub fn test_config(base_url: &str) -> Config {
    Config {
        api_base_url: base_url.to_string(),
        request_timeout_secs: 5,
        locale: Locale::En,
        ..Config::default()
    }
}

pub fn client_for(base_url: &str) -> (ApiClient, TokenStore) {
    let tokens = TokenStore::new(Arc::new(MemoryStorage::new()));
    let api = ApiClient::new(Arc::new(test_config(base_url)), tokens.clone(), EventBus::new())
        .expect("Failed to build client");
    (api, tokens)
}

pub fn drain(rx: &mut tokio::sync::broadcast::Receiver<ClientEvent>) -> Vec<ClientEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

pub fn notification_json(id: i64, is_read: bool) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "userId": 5,
        "notificationType": "COLLECTION_REMINDER",
        "message": format!("Recolección programada #{}", id),
        "isRead": is_read,
        "createdAt": "2024-05-01T10:30:00",
        "readAt": if is_read { serde_json::json!("2024-05-02T09:00:00") } else { serde_json::Value::Null },
    })
}
