use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::class_group;
use crate::routes::Pagination;

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateClassGroupRequest {
    #[schema(example = "Class 1A")]
    pub name: String,

    #[schema(example = "2025")]
    pub academic_year: String,

    #[schema(example = "1")]
    pub semester: String,

    #[schema(example = "active")]
    pub status: String,

    pub description: Option<String>,
    pub created_by: i32,
    pub class_teacher_id: Option<i32>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateClassGroupRequest {
    pub name: Option<String>,
    pub academic_year: Option<String>,
    pub semester: Option<String>,
    pub status: Option<String>,
    pub description: Option<String>,
    pub class_teacher_id: Option<i32>,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct ClassGroupQueryParams {
    #[serde(default = "default_page")]
    pub page: u64,

    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_page() -> u64 {
    1
}

fn default_limit() -> u64 {
    10
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ClassGroupResponse {
    pub id: i32,
    pub name: String,
    pub academic_year: String,
    pub semester: String,
    pub status: String,
    pub description: Option<String>,
    pub created_by: i32,
    pub class_teacher_id: Option<i32>,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

impl From<class_group::Model> for ClassGroupResponse {
    fn from(class_group: class_group::Model) -> Self {
        Self {
            id: class_group.id,
            name: class_group.name,
            academic_year: class_group.academic_year,
            semester: class_group.semester,
            status: class_group.status,
            description: class_group.description,
            created_by: class_group.created_by,
            class_teacher_id: class_group.class_teacher_id,
            created_at: class_group.created_at,
            updated_at: class_group.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ClassGroupDataResponse {
    pub success: bool,
    pub data: ClassGroupResponse,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ClassGroupListResponse {
    pub success: bool,
    pub data: Vec<ClassGroupResponse>,
    pub pagination: Pagination,
}
