use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::events::EventBus;
use crate::messages::Messages;
use crate::middleware::{AuthInterceptor, Pipeline, ResponseInterceptor};
use crate::storage::{FileStorage, TokenStore};
use crate::utils::json_or_none;

/// HTTP client shared by every service. All calls go through the
/// interception pipeline.
#[derive(Clone)]
pub struct ApiClient {
    config: Arc<Config>,
    http: reqwest::Client,
    pipeline: Pipeline,
    tokens: TokenStore,
    events: EventBus,
    messages: Messages,
}

impl ApiClient {
    pub fn new(config: Arc<Config>, tokens: TokenStore, events: EventBus) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        let messages = Messages::new(config.locale);

        let pipeline = Pipeline::new(
            AuthInterceptor::new(tokens.clone(), events.clone(), messages),
            ResponseInterceptor::new(events.clone(), messages),
        );

        Ok(Self {
            config,
            http,
            pipeline,
            tokens,
            events,
            messages,
        })
    }

    /// Client persisting its credential in the file named by the config.
    pub fn from_config(config: Arc<Config>) -> AppResult<Self> {
        let storage = Arc::new(FileStorage::new(config.token_store_path.clone()));
        let tokens = TokenStore::with_key(storage, &config.token_storage_key);
        Self::new(config, tokens, EventBus::new())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn messages(&self) -> &Messages {
        &self.messages
    }

    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, self.config.endpoint(path))
    }

    pub async fn send(&self, request: RequestBuilder) -> AppResult<reqwest::Response> {
        self.pipeline.execute(request).await
    }

    pub async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> AppResult<T> {
        let response = self.send(request).await?;
        json_or_none(response)
            .await?
            .ok_or_else(|| AppError::Decode("Expected a response body".to_string()))
    }

    /// For endpoints answering 204 or an empty body.
    pub async fn send_optional<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> AppResult<Option<T>> {
        let response = self.send(request).await?;
        json_or_none(response).await
    }

    /// Succeeds on any 2xx; the body, if any, is ignored.
    pub async fn send_empty(&self, request: RequestBuilder) -> AppResult<()> {
        self.send(request).await?;
        Ok(())
    }
}
