use axum::RequestPartsExt;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::headers::{Authorization, authorization::Bearer};

use crate::app::AppState;
use crate::error::ApiError;
use crate::utils::jwt::TokenClaims;

/// Authenticated principal, taken from the `Authorization: Bearer` header.
/// Routes that previously trusted a hardcoded actor id use this instead.
pub struct AuthClaims(pub TokenClaims);

impl<S> FromRequestParts<S> for AuthClaims
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| {
                ApiError::Unauthorized("Missing or invalid authorization header".to_string())
            })?;

        let app_state = AppState::from_ref(state);
        let claims = app_state
            .jwt
            .verify(bearer.token())
            .map_err(|_| ApiError::Unauthorized("Invalid or expired token".to_string()))?;

        Ok(AuthClaims(claims))
    }
}
