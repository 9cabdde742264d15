use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
};

use super::dto::{
    CreateNotificationRequest, NotificationListResponse, NotificationQueryParams,
    NotificationResponse,
};
use crate::app::AppState;
use crate::error::ApiError;
use crate::extractor::AuthClaims;
use crate::repositories::NotificationRepository;
use crate::routes::IdResponse;

pub fn create_route() -> Router<AppState> {
    Router::new()
        .route(
            "/api/notifications",
            get(get_notifications).post(create_notification),
        )
        .route("/api/notifications/read-all", put(mark_all_notifications_read))
        .route("/api/notifications/{id}/read", put(mark_notification_read))
}

/// Inbox of the authenticated user, newest first.
#[utoipa::path(
    get,
    path = "/api/notifications",
    params(NotificationQueryParams),
    responses(
        (status = 200, description = "Notifications retrieved", body = NotificationListResponse),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Notifications"
)]
pub async fn get_notifications(
    State(state): State<AppState>,
    AuthClaims(auth_claims): AuthClaims,
    Query(params): Query<NotificationQueryParams>,
) -> Result<(StatusCode, Json<NotificationListResponse>), ApiError> {
    let notification_repo = NotificationRepository::new(&state.db);

    let notifications = notification_repo
        .find_by_user(auth_claims.user_id, params.unread_only)
        .await
        .map_err(ApiError::internal)?;

    Ok((
        StatusCode::OK,
        Json(NotificationListResponse {
            success: true,
            data: notifications
                .into_iter()
                .map(NotificationResponse::from)
                .collect(),
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/notifications",
    request_body = CreateNotificationRequest,
    responses(
        (status = 201, description = "Notification created", body = IdResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Notifications"
)]
pub async fn create_notification(
    State(state): State<AppState>,
    Json(payload): Json<CreateNotificationRequest>,
) -> Result<(StatusCode, Json<IdResponse>), ApiError> {
    let notification_repo = NotificationRepository::new(&state.db);

    let notification = notification_repo
        .create(
            payload.user_id,
            payload.title,
            payload.content,
            payload.kind,
        )
        .await
        .map_err(ApiError::internal)?;

    Ok((StatusCode::CREATED, Json(IdResponse::new(notification.id))))
}

#[utoipa::path(
    put,
    path = "/api/notifications/{id}/read",
    params(("id" = i32, Path, description = "Notification ID")),
    responses(
        (status = 200, description = "Notification marked as read"),
        (status = 404, description = "Notification not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Notifications"
)]
pub async fn mark_notification_read(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let notification_repo = NotificationRepository::new(&state.db);

    notification_repo
        .mark_as_read(id)
        .await
        .map_err(ApiError::internal)?
        .ok_or(ApiError::NotFound("Notification"))?;

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({ "success": true })),
    ))
}

/// Marks every unread notification of the authenticated user in one batch,
/// all sharing a single read timestamp.
#[utoipa::path(
    put,
    path = "/api/notifications/read-all",
    responses(
        (status = 200, description = "All notifications marked as read"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Notifications"
)]
pub async fn mark_all_notifications_read(
    State(state): State<AppState>,
    AuthClaims(auth_claims): AuthClaims,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let notification_repo = NotificationRepository::new(&state.db);

    notification_repo
        .mark_all_as_read(auth_claims.user_id)
        .await
        .map_err(ApiError::internal)?;

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({ "success": true })),
    ))
}
