//! Admin session extractor.
//!
//! Every account is an admin, so a valid access token is the whole check.
//! Nothing is looked up in the database per request.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use regelwerk_core::error::CoreError;
use regelwerk_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// The admin behind a verified `Authorization: Bearer <token>` header.
#[derive(Debug, Clone, Copy)]
pub struct AdminSession {
    pub user_id: DbId,
}

/// Rejects the request with 401 unless it carries a valid admin token.
///
/// ```ignore
/// async fn edit(RequireAdmin(admin): RequireAdmin) -> AppResult<StatusCode> {
///     tracing::info!(admin_id = %admin.user_id, "edit");
///     Ok(StatusCode::NO_CONTENT)
/// }
/// ```
pub struct RequireAdmin(pub AdminSession);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let claims = validate_token(token, &state.config.jwt)
            .map_err(|_| unauthorized("Invalid or expired token"))?;
        Ok(RequireAdmin(AdminSession {
            user_id: claims.sub,
        }))
    }
}

fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .ok_or_else(|| unauthorized("Missing Authorization header"))?;
    header
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| unauthorized("Invalid Authorization format. Expected: Bearer <token>"))
}

fn unauthorized(message: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(message.to_string()))
}
