//! Medication routes
//!
//! Every route here is gated by `require_auth` and scoped to the caller.
//!
//! - GET    /api/medications            list
//! - POST   /api/medications            create
//! - PUT    /api/medications/:id        replace
//! - DELETE /api/medications/:id        delete (logs cascade)
//! - POST   /api/medications/:id/taken  log a dose
//! - GET    /api/medications/adherence  today's snapshot

use crate::auth::{require_auth, AuthUser};
use crate::error::{ApiError, ApiResult};
use crate::services::MedicationService;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use chrono::Utc;
use medtrack_shared::{
    AdherenceResponse, MarkTakenRequest, MarkTakenResponse, MedicationRequest, MedicationResponse,
    MessageResponse,
};

/// Create medication routes behind the auth middleware
pub fn medication_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_medications).post(create_medication))
        .route("/adherence", get(get_adherence))
        .route("/:id", put(update_medication).delete(delete_medication))
        .route("/:id/taken", post(mark_taken))
        .route_layer(middleware::from_fn_with_state(state, require_auth))
}

/// Path ids arrive as text so a non-numeric id is a 400 in our error format
fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>()
        .map_err(|_| ApiError::BadRequest("Invalid medication ID".to_string()))
}

async fn list_medications(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<MedicationResponse>>> {
    let meds = MedicationService::list(state.db(), auth.user_id).await?;
    Ok(Json(meds))
}

async fn create_medication(
    State(state): State<AppState>,
    auth: AuthUser,
    body: Result<Json<MedicationRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<MedicationResponse>)> {
    let Json(req) = body?;
    let med = MedicationService::create(state.db(), auth.user_id, req).await?;
    Ok((StatusCode::CREATED, Json(med)))
}

async fn update_medication(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    body: Result<Json<MedicationRequest>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Json(req) = body?;
    let id = parse_id(&id)?;
    MedicationService::update(state.db(), auth.user_id, id, req).await?;
    Ok(Json(MessageResponse::new("Medication updated successfully")))
}

async fn delete_medication(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id = parse_id(&id)?;
    MedicationService::delete(state.db(), auth.user_id, id).await?;
    Ok(Json(MessageResponse::new("Medication deleted successfully")))
}

async fn mark_taken(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    body: Result<Json<MarkTakenRequest>, JsonRejection>,
) -> ApiResult<Json<MarkTakenResponse>> {
    let Json(req) = body?;
    let id = parse_id(&id)?;
    let log_id = MedicationService::mark_taken(state.db(), auth.user_id, id, req).await?;
    Ok(Json(MarkTakenResponse {
        message: "Medication marked as taken".to_string(),
        log_id,
    }))
}

async fn get_adherence(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<AdherenceResponse>> {
    let today = Utc::now().date_naive();
    let stats = MedicationService::adherence(state.db(), auth.user_id, today).await?;
    Ok(Json(stats))
}
