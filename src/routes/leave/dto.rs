use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::sea_orm_active_enums::LeaveStatus;
use crate::entities::{leave_request_session, session, user};
use crate::repositories::LeaveRequestDetail;
use crate::routes::Pagination;

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateLeaveRequest {
    #[serde(rename = "studentId")]
    pub student_id: i32,

    #[serde(rename = "courseId")]
    pub course_id: i32,

    #[serde(rename = "type")]
    #[schema(example = "sick")]
    pub leave_type: String,

    pub reason: String,

    #[serde(rename = "sessionIds")]
    pub session_ids: Vec<i32>,
}

/// Unknown status strings are rejected at this boundary; the transition
/// itself is unconditional.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateLeaveStatusRequest {
    #[schema(example = "approved")]
    pub status: LeaveStatus,

    #[serde(rename = "reviewerId")]
    pub reviewer_id: i32,

    #[serde(rename = "rejectionReason")]
    pub rejection_reason: Option<String>,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct LeaveQueryParams {
    #[serde(rename = "courseId")]
    pub course_id: Option<i32>,

    #[serde(rename = "studentId")]
    pub student_id: Option<i32>,

    pub status: Option<LeaveStatus>,

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
pub struct LeaveStudent {
    pub id: i32,
    pub name: String,
    pub student_no: Option<String>,
    pub email: Option<String>,
}

impl From<user::Model> for LeaveStudent {
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
pub struct LeaveSessionSummary {
    pub id: i32,
    pub course_id: i32,
    pub session_date: chrono::NaiveDateTime,
    pub start_time: chrono::NaiveDateTime,
    pub end_time: chrono::NaiveDateTime,
    pub status: String,
}

impl From<session::Model> for LeaveSessionSummary {
    fn from(session: session::Model) -> Self {
        Self {
            id: session.id,
            course_id: session.course_id,
            session_date: session.session_date,
            start_time: session.start_time,
            end_time: session.end_time,
            status: session.status,
        }
    }
}

/// Join row with the covered session embedded.
#[derive(Debug, Serialize, ToSchema)]
pub struct LeaveSessionResponse {
    pub id: i32,
    pub leave_request_id: i32,
    pub session_id: i32,
    pub session: Option<LeaveSessionSummary>,
}

impl LeaveSessionResponse {
    pub fn new(join: leave_request_session::Model, session: Option<session::Model>) -> Self {
        Self {
            id: join.id,
            leave_request_id: join.leave_request_id,
            session_id: join.session_id,
            session: session.map(LeaveSessionSummary::from),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LeaveRequestResponse {
    pub id: i32,
    pub student_id: i32,
    pub course_id: i32,
    #[serde(rename = "type")]
    pub leave_type: String,
    pub reason: String,
    pub status: LeaveStatus,
    pub approved_by: Option<i32>,
    pub approved_at: Option<chrono::NaiveDateTime>,
    pub rejection_reason: Option<String>,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
    pub student: Option<LeaveStudent>,
    pub sessions: Vec<LeaveSessionResponse>,
}

impl From<LeaveRequestDetail> for LeaveRequestResponse {
    fn from(detail: LeaveRequestDetail) -> Self {
        Self {
            id: detail.request.id,
            student_id: detail.request.student_id,
            course_id: detail.request.course_id,
            leave_type: detail.request.r#type,
            reason: detail.request.reason,
            status: detail.request.status,
            approved_by: detail.request.approved_by,
            approved_at: detail.request.approved_at,
            rejection_reason: detail.request.rejection_reason,
            created_at: detail.request.created_at,
            updated_at: detail.request.updated_at,
            student: detail.student.map(LeaveStudent::from),
            sessions: detail
                .sessions
                .into_iter()
                .map(|(join, session)| LeaveSessionResponse::new(join, session))
                .collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LeaveListResponse {
    pub success: bool,
    pub data: Vec<LeaveRequestResponse>,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentLeaveResponse {
    pub success: bool,
    pub data: Vec<LeaveRequestResponse>,
}
