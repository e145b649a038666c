use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::{flexible_datetime, UnknownVariant};

pub type NotificationId = i64;
pub type UserId = i64;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationType {
    Alert,
    Reminder,
    Info,
    SystemMessage,
    PaymentConfirmation,
    DisputeResolution,
    ServiceRequestUpdate,
    NewServiceRequest,
    CollectionReminder,
}

impl NotificationType {
    pub const ALL: [NotificationType; 9] = [
        NotificationType::Alert,
        NotificationType::Reminder,
        NotificationType::Info,
        NotificationType::SystemMessage,
        NotificationType::PaymentConfirmation,
        NotificationType::DisputeResolution,
        NotificationType::ServiceRequestUpdate,
        NotificationType::NewServiceRequest,
        NotificationType::CollectionReminder,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::Alert => "ALERT",
            NotificationType::Reminder => "REMINDER",
            NotificationType::Info => "INFO",
            NotificationType::SystemMessage => "SYSTEM_MESSAGE",
            NotificationType::PaymentConfirmation => "PAYMENT_CONFIRMATION",
            NotificationType::DisputeResolution => "DISPUTE_RESOLUTION",
            NotificationType::ServiceRequestUpdate => "SERVICE_REQUEST_UPDATE",
            NotificationType::NewServiceRequest => "NEW_SERVICE_REQUEST",
            NotificationType::CollectionReminder => "COLLECTION_REMINDER",
        }
    }
}

impl std::fmt::Display for NotificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for NotificationType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NotificationType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownVariant::new("notification type", s))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: NotificationId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    pub notification_type: NotificationType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub message: String,
    pub is_read: bool,
    #[serde(with = "flexible_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(default, with = "flexible_datetime::option")]
    pub read_at: Option<DateTime<Utc>>,
}

/// Read-status filter of the notifications console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Read,
    Unread,
}

impl StatusFilter {
    /// Value of the `isRead` query parameter; `None` means omit it.
    pub fn is_read(&self) -> Option<bool> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Read => Some(true),
            StatusFilter::Unread => Some(false),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(StatusFilter::All),
            "read" => Ok(StatusFilter::Read),
            "unread" => Ok(StatusFilter::Unread),
            other => Err(UnknownVariant::new("status filter", other)),
        }
    }
}

/// Everything that determines one notifications query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationFilters {
    pub page: u32,
    pub size: u32,
    pub sort: String,
    pub status: StatusFilter,
    /// `None` selects every type.
    pub notification_type: Option<NotificationType>,
}

impl Default for NotificationFilters {
    fn default() -> Self {
        Self {
            page: 0,
            size: 10,
            sort: "createdAt,desc".to_string(),
            status: StatusFilter::All,
            notification_type: None,
        }
    }
}

impl NotificationFilters {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("size", self.size.to_string()),
            ("sort", self.sort.clone()),
        ];
        if let Some(is_read) = self.status.is_read() {
            pairs.push(("isRead", is_read.to_string()));
        }
        if let Some(kind) = self.notification_type {
            pairs.push(("notificationType", kind.as_str().to_string()));
        }
        pairs
    }
}

pub type NotificationPage = super::Page<Notification>;

/// Body of the mark-all-read response. The backend has returned a bare
/// number as well as an object.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MarkAllReadResponse {
    Count(u64),
    Object {
        #[serde(alias = "updatedCount", alias = "updated")]
        count: u64,
    },
}

impl MarkAllReadResponse {
    pub fn count(&self) -> u64 {
        match self {
            MarkAllReadResponse::Count(n) => *n,
            MarkAllReadResponse::Object { count } => *count,
        }
    }
}
