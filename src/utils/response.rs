use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::error::{AppError, AppResult};
use crate::models::ApiErrorBody;

/// Pull the backend's error message out of a response body.
pub fn extract_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(ApiErrorBody::best_message)
}

/// Build the error for a failed response, consuming its body.
pub async fn error_from_response(response: Response, fallback: &str) -> AppError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = extract_error_message(&body).unwrap_or_else(|| fallback.to_string());
    AppError::from_status(status, message)
}

/// Decode a JSON body, treating 204 as "nothing".
pub async fn json_or_none<T: DeserializeOwned>(response: Response) -> AppResult<Option<T>> {
    if response.status() == StatusCode::NO_CONTENT {
        return Ok(None);
    }

    let body = response.text().await?;
    if body.trim().is_empty() {
        return Ok(None);
    }

    Ok(Some(serde_json::from_str(&body)?))
}
