use reqwest::Method;

use crate::error::{AppError, AppResult};
use crate::models::{
    MarkAllReadResponse, Notification, NotificationFilters, NotificationId, NotificationPage,
    UserId,
};

use super::ApiClient;

/// Query and mutation calls against `/notifications`.
#[derive(Clone)]
pub struct NotificationService {
    api: ApiClient,
}

impl NotificationService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// One page of a user's notifications.
    pub async fn list(&self, user_id: UserId, filters: &NotificationFilters) -> AppResult<NotificationPage> {
        if filters.size == 0 {
            return Err(AppError::ValidationError("Page size must be greater than zero".to_string()));
        }

        let request = self
            .api
            .request(Method::GET, &format!("/notifications/user/{}", user_id))
            .query(&filters.query_pairs());

        let page: NotificationPage = self.api.send_json(request).await?;
        tracing::debug!(
            user_id,
            page = filters.page,
            items = page.content.len(),
            total_pages = page.total_pages,
            "Loaded notifications page"
        );
        Ok(page)
    }

    pub async fn mark_read(&self, id: NotificationId) -> AppResult<Notification> {
        let request = self
            .api
            .request(Method::PUT, &format!("/notifications/{}/mark-read", id));
        self.api.send_json(request).await
    }

    pub async fn mark_unread(&self, id: NotificationId) -> AppResult<Notification> {
        let request = self
            .api
            .request(Method::PUT, &format!("/notifications/{}/mark-unread", id));
        self.api.send_json(request).await
    }

    /// Deletes on the backend only; callers reload their page afterwards.
    pub async fn delete(&self, id: NotificationId) -> AppResult<()> {
        let request = self
            .api
            .request(Method::DELETE, &format!("/notifications/{}", id));
        self.api.send_empty(request).await?;
        tracing::info!(id, "Notification deleted");
        Ok(())
    }

    /// Number of notifications that went from unread to read.
    pub async fn mark_all_read_for_user(&self, user_id: UserId) -> AppResult<u64> {
        let request = self.api.request(
            Method::PUT,
            &format!("/notifications/user/{}/mark-all-read", user_id),
        );
        let response: MarkAllReadResponse = self.api.send_json(request).await?;
        tracing::info!(user_id, count = response.count(), "Marked all notifications read");
        Ok(response.count())
    }

    /// Most relevant unread ALERT, or `None` when the backend answers 204.
    pub async fn get_alert_status(&self) -> AppResult<Option<Notification>> {
        let request = self.api.request(Method::GET, "/notifications/alert-status");
        self.api.send_optional(request).await
    }
}
