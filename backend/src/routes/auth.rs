//! Authentication routes
//!
//! Provides endpoints for user registration, login, and token verification.
//! None of these sit behind `require_auth`; `/verify` checks the token
//! itself and answers 401 for every failure.

use crate::auth::bearer_token;
use crate::error::{ApiError, ApiResult};
use crate::services::UserService;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use medtrack_shared::{AuthResponse, LoginRequest, RegisterRequest, UserSummary};

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/verify", get(verify))
}

/// Register a new user
///
/// POST /api/auth/register
///
/// # Performance
/// Password hashing is offloaded to blocking thread pool.
async fn register(
    State(state): State<AppState>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    let Json(req) = body?;
    let resp = UserService::register(state.db(), state.jwt(), state.passwords(), req).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

/// Login with email and password
///
/// POST /api/auth/login
async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<AuthResponse>> {
    let Json(req) = body?;
    let resp = UserService::login(state.db(), state.jwt(), state.passwords(), req).await?;
    Ok(Json(resp))
}

/// Resolve the bearer token to the current user
///
/// GET /api/auth/verify
async fn verify(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<Json<UserSummary>> {
    let token = bearer_token(&headers)
        .map_err(|_| ApiError::Unauthorized("No token provided".to_string()))?;

    let user = UserService::verify(state.db(), state.jwt(), token).await?;
    Ok(Json(user))
}
