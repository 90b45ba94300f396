//! Authentication middleware
//!
//! `require_auth` gates a group of routes: it verifies the bearer token
//! and stores the decoded identity in the request extensions, where
//! handlers pick it up through the `AuthUser` extractor.
//!
//! The user row is not re-read here. Claims are trusted until the token
//! expires.

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use medtrack_shared::{AuthError, Role};
use tracing::debug;

/// Authenticated identity decoded from a verified token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: i64,
    pub email: String,
    pub role: Role,
}

/// Extract the token from an `Authorization: Bearer <token>` header
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::MissingToken)
}

/// Middleware for routes that require an authenticated caller
///
/// - no bearer token: 401
/// - token present but invalid or expired: 403
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(request.headers())
        .map_err(|_| ApiError::Unauthorized("Access token required".to_string()))?;

    let claims = state.jwt().verify_token(token).map_err(|e| {
        debug!(error = %e, "rejected bearer token");
        ApiError::Forbidden("Invalid token".to_string())
    })?;

    let user_id = claims
        .user_id()
        .map_err(|_| ApiError::Forbidden("Invalid token".to_string()))?;

    request.extensions_mut().insert(AuthUser {
        user_id,
        email: claims.email,
        role: claims.role,
    });

    Ok(next.run(request).await)
}

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| ApiError::Unauthorized("Access token required".to_string()))
    }
}
