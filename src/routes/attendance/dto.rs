use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::sea_orm_active_enums::AttendanceStatus;
use crate::entities::{attendance_record, session};
use crate::routes::Pagination;

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct MarkAttendanceRequest {
    #[serde(rename = "sessionId")]
    pub session_id: i32,

    #[serde(rename = "studentId")]
    pub student_id: i32,

    #[schema(example = "present")]
    pub status: AttendanceStatus,

    pub note: Option<String>,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct AttendanceQueryParams {
    #[serde(rename = "sessionId")]
    pub session_id: Option<i32>,

    #[serde(rename = "studentId")]
    pub student_id: Option<i32>,

    #[serde(rename = "startDate")]
    pub start_date: Option<NaiveDate>,

    #[serde(rename = "endDate")]
    pub end_date: Option<NaiveDate>,

    pub status: Option<AttendanceStatus>,

    #[serde(default = "default_page")]
    pub page: u64,

    #[serde(default = "default_limit")]
    pub limit: u64,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct StudentAttendanceQuery {
    #[serde(rename = "courseId")]
    pub course_id: Option<i32>,
}

fn default_page() -> u64 {
    1
}

fn default_limit() -> u64 {
    10
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SessionSummary {
    pub id: i32,
    pub course_id: i32,
    pub session_date: chrono::NaiveDateTime,
    pub start_time: chrono::NaiveDateTime,
    pub end_time: chrono::NaiveDateTime,
    pub teacher_id: i32,
    pub status: String,
}

impl From<session::Model> for SessionSummary {
    fn from(session: session::Model) -> Self {
        Self {
            id: session.id,
            course_id: session.course_id,
            session_date: session.session_date,
            start_time: session.start_time,
            end_time: session.end_time,
            teacher_id: session.teacher_id,
            status: session.status,
        }
    }
}

/// Attendance row joined with its session.
#[derive(Debug, Serialize, ToSchema)]
pub struct AttendanceRecordResponse {
    pub id: i32,
    pub session_id: i32,
    pub student_id: i32,
    pub status: AttendanceStatus,
    pub note: Option<String>,
    pub created_by: i32,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
    pub session: Option<SessionSummary>,
}

impl AttendanceRecordResponse {
    pub fn new(record: attendance_record::Model, session: Option<session::Model>) -> Self {
        Self {
            id: record.id,
            session_id: record.session_id,
            student_id: record.student_id,
            status: record.status,
            note: record.note,
            created_by: record.created_by,
            created_at: record.created_at,
            updated_at: record.updated_at,
            session: session.map(SessionSummary::from),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AttendanceListResponse {
    pub success: bool,
    pub data: Vec<AttendanceRecordResponse>,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentAttendanceResponse {
    pub success: bool,
    pub data: Vec<AttendanceRecordResponse>,
}
