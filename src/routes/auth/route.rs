use axum::{Json, Router, extract::State, http::StatusCode, routing::post};

use super::dto::{LoginData, LoginRequest, LoginResponse};
use crate::app::AppState;
use crate::config::JWT_EXPIRY_SECONDS;
use crate::entities::sea_orm_active_enums::UserStatus;
use crate::error::ApiError;
use crate::repositories::UserRepository;

pub fn create_route() -> Router<AppState> {
    Router::new().route("/api/auth/login", post(login))
}

/// Login endpoint - verifies credentials and returns a signed session token.
///
/// Unknown username and wrong password fail with the same message so callers
/// cannot probe for registered usernames from the error text.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials or inactive account"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<(StatusCode, Json<LoginResponse>), ApiError> {
    let user_repo = UserRepository::new(&state.db);

    let user_info = user_repo
        .find_by_username(&payload.username)
        .await
        .map_err(ApiError::internal)?
        .ok_or(ApiError::InvalidCredentials)?;

    if user_info.status != UserStatus::Active {
        return Err(ApiError::AccountInactive);
    }

    let password_valid =
        bcrypt::verify(&payload.password, &user_info.password).map_err(ApiError::internal)?;

    if !password_valid {
        return Err(ApiError::InvalidCredentials);
    }

    let token = state
        .jwt
        .create_token(
            user_info.id,
            &user_info.username,
            user_info.role.clone(),
            JWT_EXPIRY_SECONDS,
        )
        .map_err(ApiError::internal)?;

    Ok((
        StatusCode::OK,
        Json(LoginResponse {
            success: true,
            data: LoginData {
                token,
                user: user_info.into(),
            },
        }),
    ))
}
