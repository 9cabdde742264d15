use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::student_parent;

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateParentRequest {
    #[serde(rename = "parentName")]
    #[schema(example = "Jane Doe")]
    pub parent_name: String,

    #[schema(example = "mother")]
    pub relationship: String,

    pub phone: Option<String>,
    pub email: Option<String>,

    #[serde(default, rename = "isPrimary")]
    pub is_primary: bool,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateParentRequest {
    #[serde(rename = "parentName")]
    pub parent_name: Option<String>,

    pub relationship: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,

    #[serde(rename = "isPrimary")]
    pub is_primary: Option<bool>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ParentResponse {
    pub id: i32,
    pub student_id: i32,
    pub parent_name: String,
    pub relationship: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub is_primary: bool,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

impl From<student_parent::Model> for ParentResponse {
    fn from(parent: student_parent::Model) -> Self {
        Self {
            id: parent.id,
            student_id: parent.student_id,
            parent_name: parent.parent_name,
            relationship: parent.relationship,
            phone: parent.phone,
            email: parent.email,
            is_primary: parent.is_primary,
            created_at: parent.created_at,
            updated_at: parent.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ParentListResponse {
    pub success: bool,
    pub data: Vec<ParentResponse>,
}
