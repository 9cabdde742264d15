use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::{course, enrollment, session, user};
use crate::routes::Pagination;

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateCourseRequest {
    #[schema(example = "Mathematics 101")]
    pub name: String,

    pub description: Option<String>,
    pub level: Option<String>,

    #[serde(rename = "teacherId")]
    pub teacher_id: i32,

    #[serde(rename = "classGroupId")]
    pub class_group_id: i32,

    #[serde(rename = "creatorId")]
    pub creator_id: i32,

    /// Defaults to now when omitted
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateCourseRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub level: Option<String>,

    #[serde(rename = "teacherId")]
    pub teacher_id: Option<i32>,

    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct EnrollRequest {
    pub student_ids: Vec<i32>,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct CourseQueryParams {
    pub status: Option<String>,

    #[serde(rename = "teacherId")]
    pub teacher_id: Option<i32>,

    pub search: Option<String>,

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
pub struct CourseResponse {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub level: Option<String>,
    pub class_group_id: i32,
    pub teacher_id: i32,
    pub start_date: chrono::NaiveDateTime,
    pub end_date: chrono::NaiveDateTime,
    pub status: String,
    pub created_by: i32,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

impl From<course::Model> for CourseResponse {
    fn from(course: course::Model) -> Self {
        Self {
            id: course.id,
            name: course.name,
            description: course.description,
            level: course.level,
            class_group_id: course.class_group_id,
            teacher_id: course.teacher_id,
            start_date: course.start_date,
            end_date: course.end_date,
            status: course.status,
            created_by: course.created_by,
            created_at: course.created_at,
            updated_at: course.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseListResponse {
    pub success: bool,
    pub data: Vec<CourseResponse>,
    pub pagination: Pagination,
}

/// Enrolled-student projection exposed on the course detail.
#[derive(Debug, Serialize, ToSchema)]
pub struct StudentSummary {
    pub id: i32,
    pub name: String,
    pub student_no: Option<String>,
    pub email: Option<String>,
}

impl From<user::Model> for StudentSummary {
    fn from(user: user::Model) -> Self {
        Self {
            id: user.id,
            name: user.name,
            student_no: user.student_no,
            email: user.email,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EnrollmentDetail {
    pub id: i32,
    pub course_id: i32,
    pub student_id: i32,
    pub status: String,
    pub created_by: i32,
    pub created_at: chrono::NaiveDateTime,
    pub student: Option<StudentSummary>,
}

impl EnrollmentDetail {
    pub fn new(enrollment: enrollment::Model, student: Option<user::Model>) -> Self {
        Self {
            id: enrollment.id,
            course_id: enrollment.course_id,
            student_id: enrollment.student_id,
            status: enrollment.status,
            created_by: enrollment.created_by,
            created_at: enrollment.created_at,
            student: student.map(StudentSummary::from),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseSessionResponse {
    pub id: i32,
    pub course_id: i32,
    pub session_date: chrono::NaiveDateTime,
    pub start_time: chrono::NaiveDateTime,
    pub end_time: chrono::NaiveDateTime,
    pub teacher_id: i32,
    pub content: Option<String>,
    pub status: String,
}

impl From<session::Model> for CourseSessionResponse {
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
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseDetail {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub level: Option<String>,
    pub class_group_id: i32,
    pub teacher_id: i32,
    pub start_date: chrono::NaiveDateTime,
    pub end_date: chrono::NaiveDateTime,
    pub status: String,
    pub created_by: i32,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
    pub teacher_name: Option<String>,
    pub students: Vec<StudentSummary>,
    pub enrollments: Vec<EnrollmentDetail>,
    pub sessions: Vec<CourseSessionResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseDetailResponse {
    pub success: bool,
    pub data: CourseDetail,
}
