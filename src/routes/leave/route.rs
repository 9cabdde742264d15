use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
};

use super::dto::{
    CreateLeaveRequest, LeaveListResponse, LeaveQueryParams, LeaveRequestResponse,
    StudentLeaveResponse, UpdateLeaveStatusRequest,
};
use crate::app::AppState;
use crate::error::ApiError;
use crate::repositories::{LeaveFilters, LeaveRepository};
use crate::routes::{IdResponse, Pagination, normalize_paging};

pub fn create_route() -> Router<AppState> {
    Router::new()
        .route("/api/leave", get(get_leave_requests).post(create_leave_request))
        .route("/api/leave/{id}/status", put(update_leave_status))
        .route("/api/leave/students/{student_id}", get(get_student_leave_requests))
}

#[utoipa::path(
    get,
    path = "/api/leave",
    params(LeaveQueryParams),
    responses(
        (status = 200, description = "Leave requests retrieved", body = LeaveListResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Leave"
)]
pub async fn get_leave_requests(
    State(state): State<AppState>,
    Query(params): Query<LeaveQueryParams>,
) -> Result<(StatusCode, Json<LeaveListResponse>), ApiError> {
    let leave_repo = LeaveRepository::new(&state.db);
    let (page, limit) = normalize_paging(params.page, params.limit);

    let (details, total) = leave_repo
        .find_all_with_pagination(LeaveFilters {
            course_id: params.course_id,
            student_id: params.student_id,
            status: params.status,
            page,
            limit,
        })
        .await
        .map_err(ApiError::internal)?;

    Ok((
        StatusCode::OK,
        Json(LeaveListResponse {
            success: true,
            data: details
                .into_iter()
                .map(LeaveRequestResponse::from)
                .collect(),
            pagination: Pagination::new(total, page, limit),
        }),
    ))
}

/// Creates the request and its per-session join rows atomically; the new
/// request always starts out pending.
#[utoipa::path(
    post,
    path = "/api/leave",
    request_body = CreateLeaveRequest,
    responses(
        (status = 201, description = "Leave request created", body = IdResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Leave"
)]
pub async fn create_leave_request(
    State(state): State<AppState>,
    Json(payload): Json<CreateLeaveRequest>,
) -> Result<(StatusCode, Json<IdResponse>), ApiError> {
    let leave_repo = LeaveRepository::new(&state.db);

    let request = leave_repo
        .create(
            payload.student_id,
            payload.course_id,
            payload.leave_type,
            payload.reason,
            payload.session_ids,
        )
        .await
        .map_err(ApiError::internal)?;

    Ok((StatusCode::CREATED, Json(IdResponse::new(request.id))))
}

/// Review a leave request. The transition is unconditional: the prior status
/// is not inspected, and the reviewer and timestamp are stamped on approval
/// and rejection alike.
#[utoipa::path(
    put,
    path = "/api/leave/{id}/status",
    params(("id" = i32, Path, description = "Leave request ID")),
    request_body = UpdateLeaveStatusRequest,
    responses(
        (status = 200, description = "Leave status updated"),
        (status = 400, description = "Unknown status value"),
        (status = 404, description = "Leave request not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Leave"
)]
pub async fn update_leave_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateLeaveStatusRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let leave_repo = LeaveRepository::new(&state.db);

    leave_repo
        .update_status(
            id,
            payload.status,
            payload.reviewer_id,
            payload.rejection_reason,
        )
        .await
        .map_err(ApiError::internal)?
        .ok_or(ApiError::NotFound("Leave request"))?;

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({ "success": true })),
    ))
}

#[utoipa::path(
    get,
    path = "/api/leave/students/{student_id}",
    params(("student_id" = i32, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student leave history", body = StudentLeaveResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Leave"
)]
pub async fn get_student_leave_requests(
    State(state): State<AppState>,
    Path(student_id): Path<i32>,
) -> Result<(StatusCode, Json<StudentLeaveResponse>), ApiError> {
    let leave_repo = LeaveRepository::new(&state.db);

    let details = leave_repo
        .find_by_student(student_id)
        .await
        .map_err(ApiError::internal)?;

    Ok((
        StatusCode::OK,
        Json(StudentLeaveResponse {
            success: true,
            data: details
                .into_iter()
                .map(LeaveRequestResponse::from)
                .collect(),
        }),
    ))
}
