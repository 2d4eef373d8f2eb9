use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use studentdesk_auth::{Principal, verify_token};
use studentdesk_core::AppError;
use tracing::warn;

use crate::state::AppState;

/// Extractor that validates the bearer token and yields the request's principal.
///
/// Requests without a valid token are rejected with `401` before the
/// handler runs.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Principal);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::unauthorized("Invalid authorization header format"))?;

        let claims = verify_token(token, &state.jwt_config)?;
        let principal = Principal::try_from(claims)?;

        Ok(AuthUser(principal))
    }
}

/// Extractor for admin-only actions.
///
/// Authenticates like [`AuthUser`], then rejects any principal whose role
/// is not `admin` with `403`.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub Principal);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser(principal) = AuthUser::from_request_parts(parts, state).await?;

        if !principal.is_admin() {
            warn!(
                user.id = %principal.user_id,
                user.name = %principal.username,
                role = %principal.role,
                path = %parts.uri.path(),
                "Admin-only action denied"
            );
            return Err(AppError::forbidden(
                "Access denied. This action requires the admin role",
            ));
        }

        Ok(RequireAdmin(principal))
    }
}
