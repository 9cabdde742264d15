use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};

use super::dto::{
    CreateSessionRequest, SessionAttendanceRecord, SessionDetail, SessionDetailResponse,
    SessionListResponse, SessionQueryParams, SessionResponse, UpdateSessionRequest,
};
use crate::app::AppState;
use crate::error::ApiError;
use crate::repositories::{
    CourseRepository, NewSession, SessionFilters, SessionRepository, SessionUpdate, UserRepository,
};
use crate::routes::{IdResponse, Pagination, normalize_paging};

pub fn create_route() -> Router<AppState> {
    Router::new()
        .route("/api/sessions", get(get_sessions).post(create_session))
        .route(
            "/api/sessions/{id}",
            get(get_session_by_id)
                .put(update_session)
                .delete(delete_session),
        )
}

#[utoipa::path(
    get,
    path = "/api/sessions",
    params(SessionQueryParams),
    responses(
        (status = 200, description = "Sessions retrieved successfully", body = SessionListResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Sessions"
)]
pub async fn get_sessions(
    State(state): State<AppState>,
    Query(params): Query<SessionQueryParams>,
) -> Result<(StatusCode, Json<SessionListResponse>), ApiError> {
    let session_repo = SessionRepository::new(&state.db);
    let (page, limit) = normalize_paging(params.page, params.limit);

    let (sessions, total) = session_repo
        .find_all_with_pagination(SessionFilters {
            course_id: params.course_id,
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
        Json(SessionListResponse {
            success: true,
            data: sessions.into_iter().map(SessionResponse::from).collect(),
            pagination: Pagination::new(total, page, limit),
        }),
    ))
}

/// New sessions always start out scheduled regardless of input.
#[utoipa::path(
    post,
    path = "/api/sessions",
    request_body = CreateSessionRequest,
    responses(
        (status = 201, description = "Session created successfully", body = IdResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Sessions"
)]
pub async fn create_session(
    State(state): State<AppState>,
    Json(payload): Json<CreateSessionRequest>,
) -> Result<(StatusCode, Json<IdResponse>), ApiError> {
    let session_repo = SessionRepository::new(&state.db);

    let session = session_repo
        .create(NewSession {
            course_id: payload.course_id,
            session_date: payload.session_date.naive_utc(),
            start_time: payload.start_time.naive_utc(),
            end_time: payload.end_time.naive_utc(),
            teacher_id: payload.teacher_id,
            content: payload.content,
            created_by: payload.creator_id,
        })
        .await
        .map_err(ApiError::internal)?;

    Ok((StatusCode::CREATED, Json(IdResponse::new(session.id))))
}

#[utoipa::path(
    get,
    path = "/api/sessions/{id}",
    params(("id" = i32, Path, description = "Session ID")),
    responses(
        (status = 200, description = "Session detail", body = SessionDetailResponse),
        (status = 404, description = "Session not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Sessions"
)]
pub async fn get_session_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<(StatusCode, Json<SessionDetailResponse>), ApiError> {
    let session_repo = SessionRepository::new(&state.db);
    let course_repo = CourseRepository::new(&state.db);
    let user_repo = UserRepository::new(&state.db);

    let session = session_repo
        .find_by_id(id)
        .await
        .map_err(ApiError::internal)?
        .ok_or(ApiError::NotFound("Session"))?;

    let course_name = course_repo
        .find_by_id(session.course_id)
        .await
        .map_err(ApiError::internal)?
        .map(|course| course.name);

    let teacher_name = user_repo
        .find_by_id(session.teacher_id)
        .await
        .map_err(ApiError::internal)?
        .map(|teacher| teacher.name);

    let attendance_records = session_repo
        .attendance_with_students(id)
        .await
        .map_err(ApiError::internal)?
        .into_iter()
        .map(|(record, student)| SessionAttendanceRecord::new(record, student))
        .collect();

    let detail = SessionDetail {
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
        course_name,
        teacher_name,
        attendance_records,
    };

    Ok((
        StatusCode::OK,
        Json(SessionDetailResponse {
            success: true,
            data: detail,
        }),
    ))
}

#[utoipa::path(
    put,
    path = "/api/sessions/{id}",
    params(("id" = i32, Path, description = "Session ID")),
    request_body = UpdateSessionRequest,
    responses(
        (status = 200, description = "Session updated successfully"),
        (status = 404, description = "Session not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Sessions"
)]
pub async fn update_session(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateSessionRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let session_repo = SessionRepository::new(&state.db);

    session_repo
        .update(
            id,
            SessionUpdate {
                session_date: payload.session_date.map(|d| d.naive_utc()),
                start_time: payload.start_time.map(|d| d.naive_utc()),
                end_time: payload.end_time.map(|d| d.naive_utc()),
                teacher_id: payload.teacher_id,
                content: payload.content,
                status: payload.status,
            },
        )
        .await
        .map_err(ApiError::internal)?
        .ok_or(ApiError::NotFound("Session"))?;

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({ "success": true })),
    ))
}

/// Hard delete. Attendance records and leave joins referencing the session
/// are removed by the store's cascade rules.
#[utoipa::path(
    delete,
    path = "/api/sessions/{id}",
    params(("id" = i32, Path, description = "Session ID")),
    responses(
        (status = 200, description = "Session deleted successfully"),
        (status = 404, description = "Session not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Sessions"
)]
pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let session_repo = SessionRepository::new(&state.db);

    let result = session_repo.delete(id).await.map_err(ApiError::internal)?;
    if result.rows_affected == 0 {
        return Err(ApiError::NotFound("Session"));
    }

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({ "success": true })),
    ))
}
