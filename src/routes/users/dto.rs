use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::sea_orm_active_enums::{RoleEnum, UserStatus};
use crate::entities::user;

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateUserRequest {
    #[schema(example = "Student User")]
    pub name: String,

    #[schema(example = "student")]
    pub username: String,

    #[schema(example = "student@example.com")]
    pub email: Option<String>,

    #[schema(example = "password123")]
    pub password: String,

    #[schema(example = "student")]
    pub role: RoleEnum,

    #[schema(example = "S12345")]
    pub student_no: Option<String>,

    #[serde(default, rename = "creatorId")]
    pub creator_id: Option<i32>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,

    /// New password (optional) - re-hashed only when supplied
    pub password: Option<String>,

    pub role: Option<RoleEnum>,
    pub status: Option<UserStatus>,
    pub student_no: Option<String>,
}

/// User projection without the password hash.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserSummary {
    pub id: i32,
    pub name: String,
    pub username: String,
    pub email: Option<String>,
    pub role: RoleEnum,
    pub status: UserStatus,
    pub student_no: Option<String>,
    pub created_at: chrono::NaiveDateTime,
}

impl From<user::Model> for UserSummary {
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

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub success: bool,
    pub data: UserSummary,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserListResponse {
    pub success: bool,
    pub data: Vec<UserSummary>,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct UserQueryParams {
    pub role: Option<RoleEnum>,
}
