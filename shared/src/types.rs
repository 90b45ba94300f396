//! API request and response types

use crate::models::Role;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

// ============================================================================
// Authentication Types
// ============================================================================

/// Registration request
///
/// Required fields default to empty strings so that an absent field is
/// reported as a validation failure rather than a body rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "is required"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "is required"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "is required"))]
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Login request
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "is required"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "is required"))]
    pub password: String,
}

/// Public view of a user account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Register / login response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
    pub user: UserSummary,
}

// ============================================================================
// Medication Types
// ============================================================================

/// Create or replace a medication
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct MedicationRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "is required"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "is required"))]
    pub dosage: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "is required"))]
    pub frequency: String,
    /// Doses per period, defaults to 1
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, message = "must be at least 1"))]
    pub times: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Medication as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicationResponse {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub times: i64,
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

/// Mark a medication as taken
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct MarkTakenRequest {
    /// RFC 3339 timestamp or `YYYY-MM-DD`
    #[serde(default)]
    #[validate(length(min = 1, message = "is required"))]
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Mark-as-taken response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkTakenResponse {
    pub message: String,
    #[serde(rename = "logId")]
    pub log_id: i64,
}

/// Same-day adherence snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdherenceResponse {
    /// Rounded percentage of taken doses over medications
    pub overall: i64,
    pub taken: i64,
    pub total: i64,
}

/// Plain acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
