//! Health check endpoints
//!
//! - /health: process is up, reports version
//! - /health/ready: store answers a trivial query, 503 otherwise
//! - /health/live: always OK while the server runs
//!
//! These live outside `/api` and never require a token.

use crate::{db, state::AppState};
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use tracing::warn;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<HealthChecks>,
}

impl HealthResponse {
    fn plain(status: &'static str) -> Self {
        Self {
            status,
            version: VERSION,
            checks: None,
        }
    }
}

/// Individual dependency checks
#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub database: CheckStatus,
}

/// Status of an individual check
#[derive(Debug, Serialize)]
pub struct CheckStatus {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Basic health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::plain("healthy"))
}

/// Readiness check: reports whether the database answers
pub async fn readiness_check(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let (ready, database) = match db::health_check(state.db()).await {
        Ok(()) => (
            true,
            CheckStatus {
                status: "healthy",
                message: None,
            },
        ),
        Err(e) => {
            warn!(error = %e, "readiness check failed");
            (
                false,
                CheckStatus {
                    status: "unhealthy",
                    message: Some("database unavailable".to_string()),
                },
            )
        }
    };

    let response = HealthResponse {
        status: if ready { "ready" } else { "not_ready" },
        version: VERSION,
        checks: Some(HealthChecks { database }),
    };

    if ready {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Liveness check: the process is up and serving
pub async fn liveness_check() -> Json<HealthResponse> {
    Json(HealthResponse::plain("alive"))
}
