use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
};

use super::dto::{
    CreateUserRequest, UpdateUserRequest, UserListResponse, UserQueryParams, UserResponse,
    UserSummary,
};
use crate::app::AppState;
use crate::error::ApiError;
use crate::repositories::{UserRepository, user_repository::UserUpdate};

pub fn create_route() -> Router<AppState> {
    Router::new()
        .route("/api/users", get(get_users).post(create_user))
        .route("/api/users/{id}", put(update_user).delete(delete_user))
}

/// Create a user. The password is hashed before it is stored; a username
/// already in use is rejected without creating a row.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created successfully", body = UserResponse),
        (status = 400, description = "Username already exists"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Users"
)]
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let user_repo = UserRepository::new(&state.db);

    let existing = user_repo
        .find_by_username(&payload.username)
        .await
        .map_err(ApiError::internal)?;
    if existing.is_some() {
        return Err(ApiError::DuplicateUsername);
    }

    let hashed_password =
        bcrypt::hash(&payload.password, bcrypt::DEFAULT_COST).map_err(ApiError::internal)?;

    let user = user_repo
        .create(
            payload.name,
            payload.username,
            payload.email,
            hashed_password,
            payload.role,
            payload.student_no,
            payload.creator_id,
        )
        .await
        .map_err(ApiError::internal)?;

    Ok((
        StatusCode::CREATED,
        Json(UserResponse {
            success: true,
            data: user.into(),
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/users",
    params(UserQueryParams),
    responses(
        (status = 200, description = "Users retrieved successfully", body = UserListResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Users"
)]
pub async fn get_users(
    State(state): State<AppState>,
    Query(params): Query<UserQueryParams>,
) -> Result<(StatusCode, Json<UserListResponse>), ApiError> {
    let user_repo = UserRepository::new(&state.db);

    let users = user_repo
        .find_all(params.role)
        .await
        .map_err(ApiError::internal)?;

    let data: Vec<UserSummary> = users.into_iter().map(UserSummary::from).collect();

    Ok((
        StatusCode::OK,
        Json(UserListResponse {
            success: true,
            data,
        }),
    ))
}

#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id" = i32, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated successfully"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Users"
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let user_repo = UserRepository::new(&state.db);

    // Re-hash only when a new password is supplied.
    let hashed_password = match &payload.password {
        Some(password) => {
            Some(bcrypt::hash(password, bcrypt::DEFAULT_COST).map_err(ApiError::internal)?)
        }
        None => None,
    };

    let updates = UserUpdate {
        name: payload.name,
        username: payload.username,
        email: payload.email,
        password: hashed_password,
        role: payload.role,
        status: payload.status,
        student_no: payload.student_no,
    };

    user_repo
        .update(id, updates)
        .await
        .map_err(ApiError::internal)?
        .ok_or(ApiError::NotFound("User"))?;

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({ "success": true })),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted successfully"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Users"
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let user_repo = UserRepository::new(&state.db);

    let result = user_repo.delete(id).await.map_err(ApiError::internal)?;
    if result.rows_affected == 0 {
        return Err(ApiError::NotFound("User"));
    }

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({ "success": true })),
    ))
}
