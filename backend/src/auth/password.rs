//! Password hashing using bcrypt
//!
//! Provides salted password hashing and verification with a configurable
//! work factor.
//!
//! # Performance Considerations
//!
//! bcrypt is intentionally CPU-intensive. The async variants run on the
//! blocking thread pool so they do not stall the async runtime.

use anyhow::Result;

/// Password hashing service
///
/// Holds the bcrypt cost so every hash produced by one process uses the
/// same work factor. Verification reads the cost back out of the hash.
#[derive(Debug, Clone, Copy)]
pub struct PasswordService {
    cost: u32,
}

impl PasswordService {
    /// Create a service hashing with the given bcrypt cost (4..=31)
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a password using bcrypt (blocking operation)
    ///
    /// # Performance Note
    /// This is CPU-intensive. In async contexts use `hash_async`.
    pub fn hash(&self, password: &str) -> Result<String> {
        bcrypt::hash(password, self.cost)
            .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))
    }

    /// Hash a password asynchronously (non-blocking)
    ///
    /// Spawns the CPU-intensive work on a blocking thread pool,
    /// preventing it from blocking the async runtime.
    pub async fn hash_async(&self, password: String) -> Result<String> {
        let service = *self;
        tokio::task::spawn_blocking(move || service.hash(&password))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
    }

    /// Verify a password against a hash (blocking operation)
    ///
    /// A mismatch is `Ok(false)`; only an unreadable hash is an error.
    pub fn verify(password: &str, hash: &str) -> Result<bool> {
        bcrypt::verify(password, hash).map_err(|e| anyhow::anyhow!("Invalid hash format: {}", e))
    }

    /// Verify a password asynchronously (non-blocking)
    ///
    /// Spawns the CPU-intensive work on a blocking thread pool.
    pub async fn verify_async(password: String, hash: String) -> Result<bool> {
        tokio::task::spawn_blocking(move || Self::verify(&password, &hash))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
    }

    /// Spend one bcrypt round at the configured cost and report a mismatch
    ///
    /// Used when there is no stored hash to check, so a login for an unknown
    /// account takes as long as one with a wrong password.
    pub async fn reject_async(&self, password: String) -> Result<bool> {
        self.hash_async(password).await?;
        Ok(false)
    }
}
