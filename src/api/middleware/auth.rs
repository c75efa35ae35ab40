//! Bearer-token authentication middleware and role guard.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use std::str::FromStr;

use crate::api::AppState;
use crate::config::BEARER_TOKEN_PREFIX;
use crate::domain::Role;
use crate::errors::AppError;

/// Authenticated caller extracted from the bearer token.
///
/// Carries only what the token carries. The subject's current database row
/// is never consulted, so a demoted user keeps the embedded role until the
/// token expires.
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: i32,
    pub role: Role,
}

/// Token authentication middleware.
///
/// Extracts and verifies the bearer token from the Authorization header,
/// then injects the CurrentUser into the request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::TokenMissing)?;

    let token = auth_header
        .strip_prefix(BEARER_TOKEN_PREFIX)
        .ok_or(AppError::TokenMissing)?;

    let claims = state.auth_service.verify_token(token)?;

    // Role is one of a closed set; a token carrying anything else is as
    // good as forged.
    let role = Role::from_str(&claims.role)
        .map_err(|_| AppError::TokenInvalid("Invalid token. Please log in again.".to_string()))?;

    let current_user = CurrentUser {
        id: claims.sub,
        role,
    };

    request.extensions_mut().insert(current_user);

    Ok(next.run(request).await)
}

/// Admit the caller iff their role ranks at or above the required role.
pub fn require_role(user: &CurrentUser, required: Role) -> Result<(), AppError> {
    if user.role.can_access(required) {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}
