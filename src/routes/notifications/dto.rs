use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::notification;

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateNotificationRequest {
    #[serde(rename = "userId")]
    pub user_id: i32,

    #[schema(example = "Class cancelled")]
    pub title: String,

    pub content: String,

    #[serde(rename = "type")]
    #[schema(example = "course")]
    pub kind: String,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct NotificationQueryParams {
    #[serde(default, rename = "unreadOnly")]
    pub unread_only: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NotificationResponse {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub is_read: bool,
    pub read_at: Option<chrono::NaiveDateTime>,
    pub created_at: chrono::NaiveDateTime,
}

impl From<notification::Model> for NotificationResponse {
    fn from(notification: notification::Model) -> Self {
        Self {
            id: notification.id,
            user_id: notification.user_id,
            title: notification.title,
            content: notification.content,
            kind: notification.r#type,
            is_read: notification.is_read,
            read_at: notification.read_at,
            created_at: notification.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NotificationListResponse {
    pub success: bool,
    pub data: Vec<NotificationResponse>,
}
