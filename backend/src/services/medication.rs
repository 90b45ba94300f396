//! Medication service
//!
//! Provides business logic for medication tracking:
//! - CRUD over medications owned by the caller
//! - Append-only dose logging ("mark as taken")
//! - Same-day adherence snapshot
//!
//! Owner scoping is always applied in the data-changing statement itself.
//! Zero affected rows means 404, whether the medication is missing or
//! belongs to someone else.

use crate::error::ApiError;
use crate::repositories::{
    AdherenceCounts, CreateMedicationLog, MedicationInput, MedicationRecord, MedicationRepository,
};
use chrono::NaiveDate;
use medtrack_shared::validation::parse_taken_at;
use medtrack_shared::{AdherenceResponse, MarkTakenRequest, MedicationRequest, MedicationResponse};
use sqlx::SqlitePool;
use tracing::info;
use validator::Validate;

const NOT_FOUND: &str = "Medication not found";

/// Default doses per period when the caller omits `times`
pub const DEFAULT_TIMES: i64 = 1;

/// Medication service for business logic
pub struct MedicationService;

impl MedicationService {
    /// List the caller's medications, newest first
    pub async fn list(
        pool: &SqlitePool,
        user_id: i64,
    ) -> Result<Vec<MedicationResponse>, ApiError> {
        let records = MedicationRepository::list_by_user(pool, user_id)
            .await
            .map_err(ApiError::Internal)?;

        Ok(records.into_iter().map(to_response).collect())
    }

    /// Create a medication for the caller
    pub async fn create(
        pool: &SqlitePool,
        user_id: i64,
        req: MedicationRequest,
    ) -> Result<MedicationResponse, ApiError> {
        let input = to_input(req)?;

        let record = MedicationRepository::create(pool, user_id, &input)
            .await
            .map_err(ApiError::Internal)?;

        info!(user_id, medication_id = record.id, "medication created");

        Ok(to_response(record))
    }

    /// Replace all fields of one of the caller's medications
    pub async fn update(
        pool: &SqlitePool,
        user_id: i64,
        medication_id: i64,
        req: MedicationRequest,
    ) -> Result<(), ApiError> {
        let input = to_input(req)?;

        let updated = MedicationRepository::update(pool, medication_id, user_id, &input)
            .await
            .map_err(ApiError::Internal)?;

        if !updated {
            return Err(ApiError::NotFound(NOT_FOUND.to_string()));
        }

        info!(user_id, medication_id, "medication updated");
        Ok(())
    }

    /// Delete one of the caller's medications together with its logs
    pub async fn delete(
        pool: &SqlitePool,
        user_id: i64,
        medication_id: i64,
    ) -> Result<(), ApiError> {
        let deleted = MedicationRepository::delete(pool, medication_id, user_id)
            .await
            .map_err(ApiError::Internal)?;

        if !deleted {
            return Err(ApiError::NotFound(NOT_FOUND.to_string()));
        }

        info!(user_id, medication_id, "medication deleted");
        Ok(())
    }

    /// Record that a dose was taken at the caller-supplied time
    ///
    /// The time may be in the past. Returns the new log id.
    pub async fn mark_taken(
        pool: &SqlitePool,
        user_id: i64,
        medication_id: i64,
        req: MarkTakenRequest,
    ) -> Result<i64, ApiError> {
        req.validate()?;
        let taken_at = parse_taken_at(&req.date).map_err(ApiError::Validation)?;

        let log_id = MedicationRepository::log_dose(
            pool,
            CreateMedicationLog {
                medication_id,
                user_id,
                taken_at,
                notes: req.notes.filter(|n| !n.is_empty()),
            },
        )
        .await
        .map_err(ApiError::Internal)?
        .ok_or_else(|| ApiError::NotFound(NOT_FOUND.to_string()))?;

        info!(user_id, medication_id, log_id, %taken_at, "dose logged");
        Ok(log_id)
    }

    /// Adherence snapshot for the UTC calendar day `today`
    pub async fn adherence(
        pool: &SqlitePool,
        user_id: i64,
        today: NaiveDate,
    ) -> Result<AdherenceResponse, ApiError> {
        let counts = MedicationRepository::adherence_counts(pool, user_id, today)
            .await
            .map_err(ApiError::Internal)?;

        Ok(Self::summarize(counts))
    }

    /// `round(taken / total * 100)`, or 0 with no medications
    ///
    /// Repeat doses are not de-duplicated, so the rate can exceed 100.
    pub fn summarize(counts: AdherenceCounts) -> AdherenceResponse {
        let AdherenceCounts {
            total_medications: total,
            total_taken: taken,
        } = counts;

        let overall = if total > 0 {
            (taken as f64 / total as f64 * 100.0).round() as i64
        } else {
            0
        };

        AdherenceResponse {
            overall,
            taken,
            total,
        }
    }
}

fn to_input(req: MedicationRequest) -> Result<MedicationInput, ApiError> {
    req.validate()?;

    Ok(MedicationInput {
        name: req.name,
        dosage: req.dosage,
        frequency: req.frequency,
        times: req.times.unwrap_or(DEFAULT_TIMES),
        notes: req.notes.unwrap_or_default(),
    })
}

fn to_response(record: MedicationRecord) -> MedicationResponse {
    MedicationResponse {
        id: record.id,
        user_id: record.user_id,
        name: record.name,
        dosage: record.dosage,
        frequency: record.frequency,
        times: record.times,
        notes: record.notes.unwrap_or_default(),
        created_at: record.created_at,
    }
}
