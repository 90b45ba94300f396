//! Configuration management for the MedTrack backend
//!
//! Configuration is loaded hierarchically:
//! 1. Default values (in code)
//! 2. TOML config files (config/development.toml or config/production.toml)
//! 3. Environment variables (prefix: MEDTRACK__)
//! 4. `JWT_SECRET`, if set, for the token signing secret

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;

/// Minimum accepted length of the token signing secret, in bytes
pub const MIN_JWT_SECRET_LEN: usize = 32;

/// Longest accepted token lifetime: ten years
pub const MAX_TOKEN_EXPIRY_SECS: i64 = 10 * 365 * 24 * 60 * 60;

/// bcrypt work factor used when none is configured
pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// JWT configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// HMAC signing secret; no usable default
    pub secret: String,
    pub token_expiry_secs: i64,
}

/// Password hashing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// bcrypt work factor
    pub bcrypt_cost: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: DEFAULT_BCRYPT_COST,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 5000,
            },
            database: DatabaseConfig {
                url: "sqlite://medication_tracker.db".to_string(),
                max_connections: 5,
            },
            jwt: JwtConfig {
                secret: String::new(),
                token_expiry_secs: 7 * 24 * 60 * 60, // 7 days
            },
            auth: AuthConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    ///
    /// Loading order (later sources override earlier):
    /// 1. Default values
    /// 2. Config file based on RUST_ENV (development.toml or production.toml)
    /// 3. Environment variables with MEDTRACK__ prefix
    /// 4. JWT_SECRET
    pub fn load() -> Result<Self> {
        let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
        let config_file = format!("config/{}.toml", env);

        let config = config::Config::builder()
            // Start with defaults
            .add_source(config::Config::try_from(&AppConfig::default())?)
            // Load from environment-specific config file
            .add_source(config::File::with_name(&config_file).required(false))
            // Override with environment variables (MEDTRACK__ prefix)
            // e.g., MEDTRACK__SERVER__PORT=9000 sets server.port
            .add_source(
                config::Environment::with_prefix("MEDTRACK")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .set_override_option("jwt.secret", env::var("JWT_SECRET").ok())?
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Reject configurations the server must not start with
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        if self.jwt.secret.is_empty() {
            errors.push("JWT secret is not set (JWT_SECRET or MEDTRACK__JWT__SECRET)".to_string());
        } else if self.jwt.secret.len() < MIN_JWT_SECRET_LEN {
            errors.push(format!(
                "JWT secret must be at least {} characters",
                MIN_JWT_SECRET_LEN
            ));
        }

        if self.jwt.token_expiry_secs <= 0 {
            errors.push("JWT token expiry must be positive".to_string());
        } else if self.jwt.token_expiry_secs > MAX_TOKEN_EXPIRY_SECS {
            errors.push(format!(
                "JWT token expiry must be at most {} seconds",
                MAX_TOKEN_EXPIRY_SECS
            ));
        }

        if !(4..=31).contains(&self.auth.bcrypt_cost) {
            errors.push(format!(
                "bcrypt cost must be between 4 and 31, got {}",
                self.auth.bcrypt_cost
            ));
        }

        if self.database.max_connections == 0 {
            errors.push("database.max_connections must be at least 1".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            anyhow::bail!("Invalid configuration: {}", errors.join("; "))
        }
    }

    /// Check if running in production mode
    pub fn is_production() -> bool {
        env::var("RUST_ENV")
            .map(|v| v == "production")
            .unwrap_or(false)
    }
}
