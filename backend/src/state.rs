//! Application state management
//!
//! This module provides the shared application state that is passed
//! to all request handlers via Axum's state extraction.
//!
//! The store handle and credential services are constructed once from a
//! validated `AppConfig` and injected here; nothing is held in globals.

use crate::auth::{JwtService, PasswordService};
use crate::config::AppConfig;
use sqlx::SqlitePool;
use std::sync::Arc;

/// Shared application state
///
/// All fields are cheap to clone: the pool and config are internally
/// reference counted and the JWT keys sit behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Pre-initialized JWT service with cached keys
    pub jwt: JwtService,
    /// Password hasher configured with the bcrypt cost
    pub passwords: PasswordService,
}

impl AppState {
    /// Create a new application state
    ///
    /// # Note
    /// This pre-computes JWT keys from the config secret, so it should only
    /// be called once at application startup.
    pub fn new(db: SqlitePool, config: AppConfig) -> Self {
        let jwt = JwtService::new(&config.jwt.secret, config.jwt.token_expiry_secs);
        let passwords = PasswordService::new(config.auth.bcrypt_cost);

        Self {
            db,
            config: Arc::new(config),
            jwt,
            passwords,
        }
    }

    /// Get a reference to the database pool
    #[inline]
    pub fn db(&self) -> &SqlitePool {
        &self.db
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get a reference to the JWT service
    #[inline]
    pub fn jwt(&self) -> &JwtService {
        &self.jwt
    }

    /// Get a reference to the password service
    #[inline]
    pub fn passwords(&self) -> &PasswordService {
        &self.passwords
    }
}
