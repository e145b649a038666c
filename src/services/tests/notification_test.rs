use actix_web::{web, HttpResponse};
use serde_json::json;

use super::support::{client_for, drain, notification_json, spawn_backend};
use crate::error::AppError;
use crate::models::{NotificationFilters, NotificationType, StatusFilter};
use crate::services::NotificationService;

fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/notifications/user/{user_id}",
        web::get().to(|| async {
            HttpResponse::Ok().json(json!({
                "content": [notification_json(1, false), notification_json(2, true)],
                "totalPages": 3,
                "totalElements": 25,
                "number": 0
            }))
        }),
    )
    .route(
        "/notifications/alert-status",
        web::get().to(|| async { HttpResponse::NoContent().finish() }),
    )
    .route(
        "/notifications/{id}/mark-read",
        web::put().to(|id: web::Path<i64>| async move {
            let mut body = notification_json(id.into_inner(), true);
            body["readAt"] = json!("2024-06-01T12:00:00Z");
            HttpResponse::Ok().json(body)
        }),
    )
    .route(
        "/notifications/{id}/mark-unread",
        web::put().to(|id: web::Path<i64>| async move {
            HttpResponse::Ok().json(notification_json(id.into_inner(), false))
        }),
    )
    .route(
        "/notifications/{id}",
        web::delete().to(|id: web::Path<i64>| async move {
            if id.into_inner() == 42 {
                HttpResponse::NoContent().finish()
            } else {
                HttpResponse::NotFound().json(json!({"message": "Notification not found"}))
            }
        }),
    )
    .route(
        "/notifications/user/{user_id}/mark-all-read",
        web::put().to(|| async { HttpResponse::Ok().json(4) }),
    );
}

#[actix_rt::test]
async fn test_list_unread_sends_is_read_false_with_bearer() {
    let backend = spawn_backend(routes).await;
    let (api, tokens) = client_for(&backend.base_url);
    tokens.set("admin-token").unwrap();
    let service = NotificationService::new(api);

    let filters = NotificationFilters {
        status: StatusFilter::Unread,
        ..Default::default()
    };
    let page = service.list(5, &filters).await.unwrap();

    assert_eq!(page.content.len(), 2);
    assert_eq!(page.total_pages, 3);

    let request = backend.recorder.last();
    assert_eq!(request.method, "GET");
    assert_eq!(request.path, "/notifications/user/5");
    assert!(request.query.contains("isRead=false"));
    assert!(!request.query.contains("isRead=true"));
    assert!(request.query.contains("page=0"));
    assert!(request.query.contains("size=10"));
    assert_eq!(request.authorization.as_deref(), Some("Bearer admin-token"));
}

#[actix_rt::test]
async fn test_list_all_omits_is_read() {
    let backend = spawn_backend(routes).await;
    let (api, _) = client_for(&backend.base_url);
    let service = NotificationService::new(api);

    let filters = NotificationFilters {
        status: StatusFilter::All,
        notification_type: Some(NotificationType::Alert),
        ..Default::default()
    };
    service.list(5, &filters).await.unwrap();

    let request = backend.recorder.last();
    assert!(!request.query.contains("isRead"));
    assert!(request.query.contains("notificationType=ALERT"));
    assert_eq!(request.authorization, None);
}

#[actix_rt::test]
async fn test_list_rejects_zero_page_size_locally() {
    let backend = spawn_backend(routes).await;
    let (api, _) = client_for(&backend.base_url);
    let service = NotificationService::new(api);

    let filters = NotificationFilters {
        size: 0,
        ..Default::default()
    };
    let result = service.list(5, &filters).await;

    assert!(matches!(result, Err(AppError::ValidationError(_))));
    assert_eq!(backend.recorder.count(), 0);
}

#[actix_rt::test]
async fn test_mark_read_returns_read_notification() {
    let backend = spawn_backend(routes).await;
    let (api, _) = client_for(&backend.base_url);
    let service = NotificationService::new(api);

    let updated = service.mark_read(7).await.unwrap();

    assert_eq!(updated.id, 7);
    assert!(updated.is_read);
    assert!(updated.read_at.is_some());
    let request = backend.recorder.last();
    assert_eq!(request.method, "PUT");
    assert_eq!(request.path, "/notifications/7/mark-read");
}

#[actix_rt::test]
async fn test_mark_unread_returns_unread_notification() {
    let backend = spawn_backend(routes).await;
    let (api, _) = client_for(&backend.base_url);
    let service = NotificationService::new(api);

    let updated = service.mark_unread(8).await.unwrap();

    assert!(!updated.is_read);
    assert_eq!(updated.read_at, None);
    assert_eq!(backend.recorder.last().path, "/notifications/8/mark-unread");
}

#[actix_rt::test]
async fn test_delete_no_content_resolves_empty() {
    let backend = spawn_backend(routes).await;
    let (api, _) = client_for(&backend.base_url);
    let service = NotificationService::new(api);

    service.delete(42).await.unwrap();

    let request = backend.recorder.last();
    assert_eq!(request.method, "DELETE");
    assert_eq!(request.path, "/notifications/42");
    assert_eq!(backend.recorder.count(), 1);
}

#[actix_rt::test]
async fn test_delete_missing_carries_backend_message_without_signal() {
    let backend = spawn_backend(routes).await;
    let (api, _) = client_for(&backend.base_url);
    let mut rx = api.events().subscribe();
    let service = NotificationService::new(api);

    let err = service.delete(99).await.unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
    assert_eq!(err.user_message(), "Notification not found");
    assert!(drain(&mut rx).is_empty());
}

#[actix_rt::test]
async fn test_mark_all_read_returns_count() {
    let backend = spawn_backend(routes).await;
    let (api, _) = client_for(&backend.base_url);
    let service = NotificationService::new(api);

    assert_eq!(service.mark_all_read_for_user(5).await.unwrap(), 4);
    let request = backend.recorder.last();
    assert_eq!(request.method, "PUT");
    assert_eq!(request.path, "/notifications/user/5/mark-all-read");
}

#[actix_rt::test]
async fn test_alert_status_no_content_is_none() {
    let backend = spawn_backend(routes).await;
    let (api, _) = client_for(&backend.base_url);
    let service = NotificationService::new(api);

    assert_eq!(service.get_alert_status().await.unwrap(), None);
}

#[actix_rt::test]
async fn test_alert_status_returns_alert() {
    let backend = spawn_backend(|cfg: &mut web::ServiceConfig| {
        cfg.route(
            "/notifications/alert-status",
            web::get().to(|| async {
                let mut alert = notification_json(11, false);
                alert["notificationType"] = json!("ALERT");
                HttpResponse::Ok().json(alert)
            }),
        );
    })
    .await;
    let (api, _) = client_for(&backend.base_url);
    let service = NotificationService::new(api);

    let alert = service.get_alert_status().await.unwrap().unwrap();
    assert_eq!(alert.id, 11);
    assert_eq!(alert.notification_type, NotificationType::Alert);
}
