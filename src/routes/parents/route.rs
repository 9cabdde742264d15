use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};

use super::dto::{
    CreateParentRequest, ParentListResponse, ParentResponse, UpdateParentRequest,
};
use crate::app::AppState;
use crate::error::ApiError;
use crate::extractor::AuthClaims;
use crate::repositories::{ParentRepository, ParentUpdate};
use crate::routes::IdResponse;

pub fn create_route() -> Router<AppState> {
    Router::new()
        .route(
            "/api/students/{student_id}/parents",
            get(get_parents).post(add_parent),
        )
        .route("/api/parents/{id}", put(update_parent).delete(delete_parent))
}

#[utoipa::path(
    get,
    path = "/api/students/{student_id}/parents",
    params(("student_id" = i32, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Guardian links retrieved", body = ParentListResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Parents"
)]
pub async fn get_parents(
    State(state): State<AppState>,
    Path(student_id): Path<i32>,
) -> Result<(StatusCode, Json<ParentListResponse>), ApiError> {
    let parent_repo = ParentRepository::new(&state.db);

    let parents = parent_repo
        .find_by_student(student_id)
        .await
        .map_err(ApiError::internal)?;

    Ok((
        StatusCode::OK,
        Json(ParentListResponse {
            success: true,
            data: parents.into_iter().map(ParentResponse::from).collect(),
        }),
    ))
}

/// The creating actor comes from the bearer token.
#[utoipa::path(
    post,
    path = "/api/students/{student_id}/parents",
    params(("student_id" = i32, Path, description = "Student ID")),
    request_body = CreateParentRequest,
    responses(
        (status = 201, description = "Guardian link created", body = IdResponse),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Parents"
)]
pub async fn add_parent(
    State(state): State<AppState>,
    AuthClaims(auth_claims): AuthClaims,
    Path(student_id): Path<i32>,
    Json(payload): Json<CreateParentRequest>,
) -> Result<(StatusCode, Json<IdResponse>), ApiError> {
    let parent_repo = ParentRepository::new(&state.db);

    let parent = parent_repo
        .add(
            student_id,
            payload.parent_name,
            payload.relationship,
            payload.phone,
            payload.email,
            payload.is_primary,
            auth_claims.user_id,
        )
        .await
        .map_err(ApiError::internal)?;

    Ok((StatusCode::CREATED, Json(IdResponse::new(parent.id))))
}

#[utoipa::path(
    put,
    path = "/api/parents/{id}",
    params(("id" = i32, Path, description = "Guardian link ID")),
    request_body = UpdateParentRequest,
    responses(
        (status = 200, description = "Guardian link updated"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Parent not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Parents"
)]
pub async fn update_parent(
    State(state): State<AppState>,
    AuthClaims(auth_claims): AuthClaims,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateParentRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let parent_repo = ParentRepository::new(&state.db);

    parent_repo
        .update(
            id,
            ParentUpdate {
                parent_name: payload.parent_name,
                relationship: payload.relationship,
                phone: payload.phone,
                email: payload.email,
                is_primary: payload.is_primary,
                updated_by: Some(auth_claims.user_id),
            },
        )
        .await
        .map_err(ApiError::internal)?
        .ok_or(ApiError::NotFound("Parent"))?;

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({ "success": true })),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/parents/{id}",
    params(("id" = i32, Path, description = "Guardian link ID")),
    responses(
        (status = 200, description = "Guardian link deleted"),
        (status = 404, description = "Parent not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Parents"
)]
pub async fn delete_parent(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let parent_repo = ParentRepository::new(&state.db);

    let result = parent_repo.delete(id).await.map_err(ApiError::internal)?;
    if result.rows_affected == 0 {
        return Err(ApiError::NotFound("Parent"));
    }

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({ "success": true })),
    ))
}
