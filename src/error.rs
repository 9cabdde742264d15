use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// API-level failure taxonomy. Every handler maps its own failures into one
/// of these at the call site; there is no catch-all middleware.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account is not active")]
    AccountInactive,

    #[error("Username already exists")]
    DuplicateUsername,

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Wrap a repository/store error. The message is surfaced largely
    /// unchanged, matching the propagation policy of the service layer.
    pub fn internal(err: impl std::fmt::Display) -> Self {
        Self::Internal(err.to_string())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidCredentials | ApiError::AccountInactive => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::DuplicateUsername | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("internal error: {}", message);
        } else {
            tracing::debug!(status = %status, "request failed: {}", message);
        }

        (
            status,
            Json(json!({
                "success": false,
                "error": message,
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_taxonomy() {
        assert_eq!(
            ApiError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::AccountInactive.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::DuplicateUsername.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::NotFound("Course").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Internal("db".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn not_found_message_names_the_resource() {
        assert_eq!(ApiError::NotFound("Course").to_string(), "Course not found");
    }

    #[test]
    fn invalid_credentials_message_is_shared() {
        // Unknown username and wrong password must be indistinguishable.
        assert_eq!(
            ApiError::InvalidCredentials.to_string(),
            "Invalid credentials"
        );
    }
}
