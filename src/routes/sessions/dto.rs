use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::sea_orm_active_enums::AttendanceStatus;
use crate::entities::{attendance_record, session, user};
use crate::routes::Pagination;

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateSessionRequest {
    #[serde(rename = "courseId")]
    pub course_id: i32,

    pub session_date: DateTime<Utc>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,

    #[serde(rename = "teacherId")]
    pub teacher_id: i32,

    pub content: Option<String>,

    #[serde(rename = "creatorId")]
    pub creator_id: i32,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateSessionRequest {
    pub session_date: Option<DateTime<Utc>>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,

    #[serde(rename = "teacherId")]
    pub teacher_id: Option<i32>,

    pub content: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct SessionQueryParams {
    #[serde(rename = "courseId")]
    pub course_id: Option<i32>,

    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<String>,

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
pub struct SessionResponse {
    pub id: i32,
    pub course_id: i32,
    pub session_date: chrono::NaiveDateTime,
    pub start_time: chrono::NaiveDateTime,
    pub end_time: chrono::NaiveDateTime,
    pub teacher_id: i32,
    pub content: Option<String>,
    pub status: String,
    pub created_by: i32,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

impl From<session::Model> for SessionResponse {
    fn from(session: session::Model) -> Self {
        Self {
            id: session.id,
            course_id: session.course_id,
            session_date: session.session_date,
            start_time: session.start_time,
            end_time: session.end_time,
            teacher_id: session.teacher_id,
            content: session.content,
            status: session.status,
            created_by: session.created_by,
            created_at: session.created_at,
            updated_at: session.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SessionListResponse {
    pub success: bool,
    pub data: Vec<SessionResponse>,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentBrief {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SessionAttendanceRecord {
    pub id: i32,
    pub session_id: i32,
    pub student_id: i32,
    pub status: AttendanceStatus,
    pub note: Option<String>,
    pub student: Option<StudentBrief>,
}

impl SessionAttendanceRecord {
    pub fn new(record: attendance_record::Model, student: Option<user::Model>) -> Self {
        Self {
            id: record.id,
            session_id: record.session_id,
            student_id: record.student_id,
            status: record.status,
            note: record.note,
            student: student.map(|s| StudentBrief {
                id: s.id,
                name: s.name,
            }),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SessionDetail {
    pub id: i32,
    pub course_id: i32,
    pub session_date: chrono::NaiveDateTime,
    pub start_time: chrono::NaiveDateTime,
    pub end_time: chrono::NaiveDateTime,
    pub teacher_id: i32,
    pub content: Option<String>,
    pub status: String,
    pub created_by: i32,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
    pub course_name: Option<String>,
    pub teacher_name: Option<String>,
    pub attendance_records: Vec<SessionAttendanceRecord>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SessionDetailResponse {
    pub success: bool,
    pub data: SessionDetail,
}
