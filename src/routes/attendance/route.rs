use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};

use super::dto::{
    AttendanceListResponse, AttendanceQueryParams, AttendanceRecordResponse, MarkAttendanceRequest,
    StudentAttendanceQuery, StudentAttendanceResponse,
};
use crate::app::AppState;
use crate::error::ApiError;
use crate::extractor::AuthClaims;
use crate::repositories::{AttendanceFilters, AttendanceRepository};
use crate::routes::{Pagination, normalize_paging};

pub fn create_route() -> Router<AppState> {
    Router::new()
        .route("/api/attendance", get(get_attendance).post(mark_attendance))
        .route(
            "/api/attendance/students/{student_id}",
            get(get_student_attendance),
        )
}

#[utoipa::path(
    get,
    path = "/api/attendance",
    params(AttendanceQueryParams),
    responses(
        (status = 200, description = "Attendance records retrieved", body = AttendanceListResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn get_attendance(
    State(state): State<AppState>,
    Query(params): Query<AttendanceQueryParams>,
) -> Result<(StatusCode, Json<AttendanceListResponse>), ApiError> {
    let attendance_repo = AttendanceRepository::new(&state.db);
    let (page, limit) = normalize_paging(params.page, params.limit);

    let (records, total) = attendance_repo
        .find_with_pagination(AttendanceFilters {
            session_id: params.session_id,
            student_id: params.student_id,
            start_date: params.start_date,
            end_date: params.end_date,
            status: params.status,
            page,
            limit,
        })
        .await
        .map_err(ApiError::internal)?;

    Ok((
        StatusCode::OK,
        Json(AttendanceListResponse {
            success: true,
            data: records
                .into_iter()
                .map(|(record, session)| AttendanceRecordResponse::new(record, session))
                .collect(),
            pagination: Pagination::new(total, page, limit),
        }),
    ))
}

/// Idempotent upsert keyed on (session, student): marking twice leaves one
/// record carrying the second status. The creator comes from the bearer
/// token.
#[utoipa::path(
    post,
    path = "/api/attendance",
    request_body = MarkAttendanceRequest,
    responses(
        (status = 200, description = "Attendance marked"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn mark_attendance(
    State(state): State<AppState>,
    AuthClaims(auth_claims): AuthClaims,
    Json(payload): Json<MarkAttendanceRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let attendance_repo = AttendanceRepository::new(&state.db);

    attendance_repo
        .mark(
            payload.session_id,
            payload.student_id,
            payload.status,
            payload.note,
            auth_claims.user_id,
        )
        .await
        .map_err(ApiError::internal)?;

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({ "success": true })),
    ))
}

/// Full attendance history for one student, newest session first, optionally
/// narrowed to one course.
#[utoipa::path(
    get,
    path = "/api/attendance/students/{student_id}",
    params(
        ("student_id" = i32, Path, description = "Student ID"),
        StudentAttendanceQuery
    ),
    responses(
        (status = 200, description = "Student attendance history", body = StudentAttendanceResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn get_student_attendance(
    State(state): State<AppState>,
    Path(student_id): Path<i32>,
    Query(params): Query<StudentAttendanceQuery>,
) -> Result<(StatusCode, Json<StudentAttendanceResponse>), ApiError> {
    let attendance_repo = AttendanceRepository::new(&state.db);

    let records = attendance_repo
        .find_by_student(student_id, params.course_id)
        .await
        .map_err(ApiError::internal)?;

    Ok((
        StatusCode::OK,
        Json(StudentAttendanceResponse {
            success: true,
            data: records
                .into_iter()
                .map(|(record, session)| AttendanceRecordResponse::new(record, session))
                .collect(),
        }),
    ))
}
