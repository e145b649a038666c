mod auth;
mod response;

pub use auth::*;
pub use response::*;

use reqwest::{RequestBuilder, Response};

use crate::error::AppResult;

/// Outgoing and incoming hooks applied to every backend call.
#[derive(Clone)]
pub struct Pipeline {
    outgoing: AuthInterceptor,
    incoming: ResponseInterceptor,
}

impl Pipeline {
    pub fn new(outgoing: AuthInterceptor, incoming: ResponseInterceptor) -> Self {
        Self { outgoing, incoming }
    }

    pub async fn execute(&self, request: RequestBuilder) -> AppResult<Response> {
        let request = self.outgoing.apply(request)?;
        self.incoming.inspect(request.send().await).await
    }
}
