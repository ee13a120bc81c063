use crate::models::{Notification, User};
use crate::services::{follow_up_service, visibility_service};
use crate::state::{Action, Store};
use actix_web::{web, HttpResponse, Responder};

/// GET /api/v1/notifications - Reminder feed for the caller's team
#[utoipa::path(
    get,
    path = "/api/v1/notifications",
    tag = "Notifications",
    responses((status = 200, description = "Notifications, newest first", body = Vec<Notification>))
)]
pub async fn list_notifications(user: web::ReqData<User>, store: web::Data<Store>) -> impl Responder {
    let notifications = follow_up_service::notifications_for(&store, &user);
    let unread = notifications.iter().filter(|n| !n.read).count();

    HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "notifications": notifications,
        "unread": unread
    }))
}

/// POST /api/v1/notifications/read - Marks the caller's feed as read
#[utoipa::path(
    post,
    path = "/api/v1/notifications/read",
    tag = "Notifications",
    responses((status = 200, description = "Feed marked read"))
)]
pub async fn mark_read(user: web::ReqData<User>, store: web::Data<Store>) -> impl Responder {
    let scope = store.read(|state| visibility_service::allowed_assignees(&user, &state.users));
    store.dispatch(Action::NotificationsRead(scope));

    HttpResponse::Ok().json(serde_json::json!({
        "success": true
    }))
}
