use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::sea_orm_active_enums::{RoleEnum, UserStatus};
use crate::entities::user;

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "teacher")]
    pub username: String,

    #[schema(example = "password123")]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub success: bool,
    pub data: LoginData,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginData {
    pub token: String,
    pub user: AuthenticatedUser,
}

/// The stored user record with the password hash projected out.
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthenticatedUser {
    pub id: i32,
    pub name: String,
    pub username: String,
    pub email: Option<String>,
    pub role: RoleEnum,
    pub status: UserStatus,
    pub student_no: Option<String>,
    pub created_at: chrono::NaiveDateTime,
}

impl From<user::Model> for AuthenticatedUser {
    fn from(user: user::Model) -> Self {
        Self {
            id: user.id,
            name: user.name,
            username: user.username,
            email: user.email,
            role: user.role,
            status: user.status,
            student_no: user.student_no,
            created_at: user.created_at,
        }
    }
}
