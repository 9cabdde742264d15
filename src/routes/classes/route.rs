use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};

use super::dto::{
    ClassGroupDataResponse, ClassGroupListResponse, ClassGroupQueryParams, ClassGroupResponse,
    CreateClassGroupRequest, UpdateClassGroupRequest,
};
use crate::app::AppState;
use crate::error::ApiError;
use crate::repositories::{ClassGroupRepository, ClassGroupUpdate, NewClassGroup};
use crate::routes::{Pagination, normalize_paging};

pub fn create_route() -> Router<AppState> {
    Router::new()
        .route("/api/classes", get(get_class_groups).post(create_class_group))
        .route(
            "/api/classes/{id}",
            get(get_class_group_by_id)
                .put(update_class_group)
                .delete(delete_class_group),
        )
}

#[utoipa::path(
    post,
    path = "/api/classes",
    request_body = CreateClassGroupRequest,
    responses(
        (status = 201, description = "Class group created", body = ClassGroupDataResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Classes"
)]
pub async fn create_class_group(
    State(state): State<AppState>,
    Json(payload): Json<CreateClassGroupRequest>,
) -> Result<(StatusCode, Json<ClassGroupDataResponse>), ApiError> {
    let class_repo = ClassGroupRepository::new(&state.db);

    let class_group = class_repo
        .create(NewClassGroup {
            name: payload.name,
            academic_year: payload.academic_year,
            semester: payload.semester,
            status: payload.status,
            description: payload.description,
            created_by: payload.created_by,
            class_teacher_id: payload.class_teacher_id,
        })
        .await
        .map_err(ApiError::internal)?;

    Ok((
        StatusCode::CREATED,
        Json(ClassGroupDataResponse {
            success: true,
            data: class_group.into(),
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/classes",
    params(ClassGroupQueryParams),
    responses(
        (status = 200, description = "Class groups retrieved", body = ClassGroupListResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Classes"
)]
pub async fn get_class_groups(
    State(state): State<AppState>,
    Query(params): Query<ClassGroupQueryParams>,
) -> Result<(StatusCode, Json<ClassGroupListResponse>), ApiError> {
    let class_repo = ClassGroupRepository::new(&state.db);
    let (page, limit) = normalize_paging(params.page, params.limit);

    let (classes, total) = class_repo
        .find_all_with_pagination(page, limit)
        .await
        .map_err(ApiError::internal)?;

    Ok((
        StatusCode::OK,
        Json(ClassGroupListResponse {
            success: true,
            data: classes.into_iter().map(ClassGroupResponse::from).collect(),
            pagination: Pagination::new(total, page, limit),
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/classes/{id}",
    params(("id" = i32, Path, description = "Class group ID")),
    responses(
        (status = 200, description = "Class group detail", body = ClassGroupDataResponse),
        (status = 404, description = "Class group not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Classes"
)]
pub async fn get_class_group_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<(StatusCode, Json<ClassGroupDataResponse>), ApiError> {
    let class_repo = ClassGroupRepository::new(&state.db);

    let class_group = class_repo
        .find_by_id(id)
        .await
        .map_err(ApiError::internal)?
        .ok_or(ApiError::NotFound("Class group"))?;

    Ok((
        StatusCode::OK,
        Json(ClassGroupDataResponse {
            success: true,
            data: class_group.into(),
        }),
    ))
}

#[utoipa::path(
    put,
    path = "/api/classes/{id}",
    params(("id" = i32, Path, description = "Class group ID")),
    request_body = UpdateClassGroupRequest,
    responses(
        (status = 200, description = "Class group updated", body = ClassGroupDataResponse),
        (status = 404, description = "Class group not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Classes"
)]
pub async fn update_class_group(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateClassGroupRequest>,
) -> Result<(StatusCode, Json<ClassGroupDataResponse>), ApiError> {
    let class_repo = ClassGroupRepository::new(&state.db);

    let class_group = class_repo
        .update(
            id,
            ClassGroupUpdate {
                name: payload.name,
                academic_year: payload.academic_year,
                semester: payload.semester,
                status: payload.status,
                description: payload.description,
                class_teacher_id: payload.class_teacher_id,
            },
        )
        .await
        .map_err(ApiError::internal)?
        .ok_or(ApiError::NotFound("Class group"))?;

    Ok((
        StatusCode::OK,
        Json(ClassGroupDataResponse {
            success: true,
            data: class_group.into(),
        }),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/classes/{id}",
    params(("id" = i32, Path, description = "Class group ID")),
    responses(
        (status = 200, description = "Class group deleted"),
        (status = 404, description = "Class group not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Classes"
)]
pub async fn delete_class_group(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let class_repo = ClassGroupRepository::new(&state.db);

    let result = class_repo.delete(id).await.map_err(ApiError::internal)?;
    if result.rows_affected == 0 {
        return Err(ApiError::NotFound("Class group"));
    }

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({ "success": true })),
    ))
}
