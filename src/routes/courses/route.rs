use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
};

use super::dto::{
    CourseDetail, CourseDetailResponse, CourseListResponse, CourseQueryParams, CourseResponse,
    CourseSessionResponse, CreateCourseRequest, EnrollRequest, EnrollmentDetail, StudentSummary,
    UpdateCourseRequest,
};
use crate::app::AppState;
use crate::error::ApiError;
use crate::extractor::AuthClaims;
use crate::repositories::{
    CourseFilters, CourseRepository, CourseUpdate, NewCourse, UserRepository,
};
use crate::routes::{IdResponse, Pagination, normalize_paging};

pub fn create_route() -> Router<AppState> {
    Router::new()
        .route("/api/courses", get(get_courses).post(create_course))
        .route(
            "/api/courses/{id}",
            get(get_course_by_id).put(update_course),
        )
        .route("/api/courses/{id}/enroll", post(enroll_students))
        .route(
            "/api/courses/{id}/enroll/{student_id}",
            delete(unenroll_student),
        )
}

#[utoipa::path(
    get,
    path = "/api/courses",
    params(CourseQueryParams),
    responses(
        (status = 200, description = "Courses retrieved successfully", body = CourseListResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Courses"
)]
pub async fn get_courses(
    State(state): State<AppState>,
    Query(params): Query<CourseQueryParams>,
) -> Result<(StatusCode, Json<CourseListResponse>), ApiError> {
    let course_repo = CourseRepository::new(&state.db);
    let (page, limit) = normalize_paging(params.page, params.limit);

    let (courses, total) = course_repo
        .find_all_with_pagination(CourseFilters {
            status: params.status,
            teacher_id: params.teacher_id,
            search: params.search,
            page,
            limit,
        })
        .await
        .map_err(ApiError::internal)?;

    Ok((
        StatusCode::OK,
        Json(CourseListResponse {
            success: true,
            data: courses.into_iter().map(CourseResponse::from).collect(),
            pagination: Pagination::new(total, page, limit),
        }),
    ))
}

/// New courses always start in draft status regardless of input.
#[utoipa::path(
    post,
    path = "/api/courses",
    request_body = CreateCourseRequest,
    responses(
        (status = 201, description = "Course created successfully", body = IdResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Courses"
)]
pub async fn create_course(
    State(state): State<AppState>,
    Json(payload): Json<CreateCourseRequest>,
) -> Result<(StatusCode, Json<IdResponse>), ApiError> {
    let course_repo = CourseRepository::new(&state.db);

    let course = course_repo
        .create(NewCourse {
            name: payload.name,
            description: payload.description,
            level: payload.level,
            class_group_id: payload.class_group_id,
            teacher_id: payload.teacher_id,
            created_by: payload.creator_id,
            start_date: payload.start_date.map(|d| d.naive_utc()),
            end_date: payload.end_date.map(|d| d.naive_utc()),
        })
        .await
        .map_err(ApiError::internal)?;

    Ok((StatusCode::CREATED, Json(IdResponse::new(course.id))))
}

#[utoipa::path(
    get,
    path = "/api/courses/{id}",
    params(("id" = i32, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course detail", body = CourseDetailResponse),
        (status = 404, description = "Course not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Courses"
)]
pub async fn get_course_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<(StatusCode, Json<CourseDetailResponse>), ApiError> {
    let course_repo = CourseRepository::new(&state.db);
    let user_repo = UserRepository::new(&state.db);

    let course = course_repo
        .find_by_id(id)
        .await
        .map_err(ApiError::internal)?
        .ok_or(ApiError::NotFound("Course"))?;

    let teacher_name = user_repo
        .find_by_id(course.teacher_id)
        .await
        .map_err(ApiError::internal)?
        .map(|teacher| teacher.name);

    let enrollment_rows = course_repo
        .enrollments_with_students(id)
        .await
        .map_err(ApiError::internal)?;

    let students: Vec<StudentSummary> = enrollment_rows
        .iter()
        .filter_map(|(_, student)| student.clone().map(StudentSummary::from))
        .collect();

    let enrollments: Vec<EnrollmentDetail> = enrollment_rows
        .into_iter()
        .map(|(enrollment, student)| EnrollmentDetail::new(enrollment, student))
        .collect();

    let sessions = course_repo
        .sessions_by_course(id)
        .await
        .map_err(ApiError::internal)?;

    let detail = CourseDetail {
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
        teacher_name,
        students,
        enrollments,
        sessions: sessions
            .into_iter()
            .map(CourseSessionResponse::from)
            .collect(),
    };

    Ok((
        StatusCode::OK,
        Json(CourseDetailResponse {
            success: true,
            data: detail,
        }),
    ))
}

#[utoipa::path(
    put,
    path = "/api/courses/{id}",
    params(("id" = i32, Path, description = "Course ID")),
    request_body = UpdateCourseRequest,
    responses(
        (status = 200, description = "Course updated successfully"),
        (status = 404, description = "Course not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Courses"
)]
pub async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateCourseRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let course_repo = CourseRepository::new(&state.db);

    course_repo
        .update(
            id,
            CourseUpdate {
                name: payload.name,
                description: payload.description,
                level: payload.level,
                teacher_id: payload.teacher_id,
                start_date: payload.start_date.map(|d| d.naive_utc()),
                end_date: payload.end_date.map(|d| d.naive_utc()),
            },
        )
        .await
        .map_err(ApiError::internal)?
        .ok_or(ApiError::NotFound("Course"))?;

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({ "success": true })),
    ))
}

/// Bulk enrollment: one enroll call per supplied student id. There is no
/// duplicate-enrollment guard.
#[utoipa::path(
    post,
    path = "/api/courses/{id}/enroll",
    params(("id" = i32, Path, description = "Course ID")),
    request_body = EnrollRequest,
    responses(
        (status = 200, description = "Students enrolled"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
pub async fn enroll_students(
    State(state): State<AppState>,
    AuthClaims(auth_claims): AuthClaims,
    Path(id): Path<i32>,
    Json(payload): Json<EnrollRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let course_repo = CourseRepository::new(&state.db);

    for student_id in payload.student_ids {
        course_repo
            .enroll_student(id, student_id, auth_claims.user_id)
            .await
            .map_err(ApiError::internal)?;
    }

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({ "success": true })),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/courses/{id}/enroll/{student_id}",
    params(
        ("id" = i32, Path, description = "Course ID"),
        ("student_id" = i32, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Student removed from course"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Courses"
)]
pub async fn unenroll_student(
    State(state): State<AppState>,
    Path((id, student_id)): Path<(i32, i32)>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let course_repo = CourseRepository::new(&state.db);

    course_repo
        .remove_student(id, student_id)
        .await
        .map_err(ApiError::internal)?;

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({ "success": true })),
    ))
}
