//! User service for authentication and user management
//!
//! # Performance Optimizations
//!
//! - Password hashing/verification runs on blocking thread pool
//! - JWT service is passed by reference (pre-computed keys)
//! - Database queries use connection pooling

use crate::auth::{JwtService, PasswordService};
use crate::error::ApiError;
use crate::repositories::{UserRecord, UserRepository};
use medtrack_shared::{AuthError, AuthResponse, LoginRequest, RegisterRequest, Role, UserSummary};
use sqlx::SqlitePool;
use tracing::{info, warn};
use validator::Validate;

const EMAIL_TAKEN: &str = "User already exists";

/// User service for authentication operations
pub struct UserService;

impl UserService {
    /// Register a new user
    ///
    /// The existence check and the insert are separate statements; a
    /// concurrent registration that slips between them is caught by the
    /// unique constraint on `users.email` and reported the same way.
    pub async fn register(
        pool: &SqlitePool,
        jwt_service: &JwtService,
        passwords: &PasswordService,
        req: RegisterRequest,
    ) -> Result<AuthResponse, ApiError> {
        req.validate()?;

        let role = match req.role.as_deref() {
            None | Some("") => Role::default(),
            Some(value) => value.parse::<Role>().map_err(ApiError::Validation)?,
        };

        // Check if email already exists
        if UserRepository::email_exists(pool, &req.email)
            .await
            .map_err(ApiError::Internal)?
        {
            return Err(ApiError::Conflict(EMAIL_TAKEN.to_string()));
        }

        // Hash password on blocking thread pool (CPU-intensive)
        let password_hash = passwords
            .hash_async(req.password)
            .await
            .map_err(ApiError::Internal)?;

        let user = UserRepository::create(pool, &req.name, &req.email, &password_hash, role)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::Conflict(EMAIL_TAKEN.to_string()))?;

        let token = jwt_service
            .issue_token(user.id, &user.email, role)
            .map_err(ApiError::Internal)?;

        info!(user_id = user.id, %role, "user registered");

        Ok(AuthResponse {
            message: "User created successfully".to_string(),
            token,
            user: summary(&user)?,
        })
    }

    /// Login with email and password
    ///
    /// Unknown email and wrong password produce the same error, and both
    /// pay for one bcrypt round.
    pub async fn login(
        pool: &SqlitePool,
        jwt_service: &JwtService,
        passwords: &PasswordService,
        req: LoginRequest,
    ) -> Result<AuthResponse, ApiError> {
        req.validate()?;

        let Some(user) = UserRepository::find_by_email(pool, &req.email)
            .await
            .map_err(ApiError::Internal)?
        else {
            passwords
                .reject_async(req.password)
                .await
                .map_err(ApiError::Internal)?;
            warn!("login rejected: unknown account");
            return Err(invalid_credentials());
        };

        // Verify password on blocking thread pool (CPU-intensive)
        let valid = PasswordService::verify_async(req.password, user.password_hash.clone())
            .await
            .map_err(ApiError::Internal)?;

        if !valid {
            warn!(user_id = user.id, "login rejected: wrong password");
            return Err(invalid_credentials());
        }

        let role = user.role().map_err(ApiError::Internal)?;
        let token = jwt_service
            .issue_token(user.id, &user.email, role)
            .map_err(ApiError::Internal)?;

        info!(user_id = user.id, %role, "user logged in");

        Ok(AuthResponse {
            message: "Login successful".to_string(),
            token,
            user: summary(&user)?,
        })
    }

    /// Resolve a bearer token to the user's current record
    ///
    /// Every failure, including a user that no longer exists, is 401.
    pub async fn verify(
        pool: &SqlitePool,
        jwt_service: &JwtService,
        token: &str,
    ) -> Result<UserSummary, ApiError> {
        let claims = jwt_service
            .verify_token(token)
            .map_err(|_| ApiError::Unauthorized("Invalid token".to_string()))?;

        let user_id = claims
            .user_id()
            .map_err(|_| ApiError::Unauthorized("Invalid token".to_string()))?;

        let user = UserRepository::find_by_id(pool, user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::Unauthorized("User not found".to_string()))?;

        summary(&user)
    }
}

fn invalid_credentials() -> ApiError {
    ApiError::Unauthorized(AuthError::InvalidCredentials.to_string())
}

fn summary(user: &UserRecord) -> Result<UserSummary, ApiError> {
    Ok(UserSummary {
        id: user.id,
        name: user.name.clone(),
        email: user.email.clone(),
        role: user.role().map_err(ApiError::Internal)?,
    })
}
