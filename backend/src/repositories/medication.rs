//! Medication and intake log repository for database operations
//!
//! Every statement touching an existing medication carries the
//! ownership-scoped predicate `id = ? AND user_id = ?`. A medication owned
//! by someone else therefore behaves exactly like a missing one.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::SqlitePool;

/// Medication record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MedicationRecord {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub times: i64,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input for creating or replacing a medication
#[derive(Debug, Clone)]
pub struct MedicationInput {
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub times: i64,
    pub notes: String,
}

/// Input for logging a dose
#[derive(Debug, Clone)]
pub struct CreateMedicationLog {
    pub medication_id: i64,
    pub user_id: i64,
    pub taken_at: DateTime<Utc>,
    pub notes: Option<String>,
}

/// Raw counts behind the adherence snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::FromRow)]
pub struct AdherenceCounts {
    pub total_medications: i64,
    pub total_taken: i64,
}

/// Medication repository for database operations
pub struct MedicationRepository;

impl MedicationRepository {
    /// List a user's medications, newest first
    pub async fn list_by_user(pool: &SqlitePool, user_id: i64) -> Result<Vec<MedicationRecord>> {
        let records = sqlx::query_as::<_, MedicationRecord>(
            r#"
            SELECT id, user_id, name, dosage, frequency, times, notes, created_at
            FROM medications
            WHERE user_id = ?
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Create a new medication
    pub async fn create(
        pool: &SqlitePool,
        user_id: i64,
        input: &MedicationInput,
    ) -> Result<MedicationRecord> {
        let record = sqlx::query_as::<_, MedicationRecord>(
            r#"
            INSERT INTO medications (user_id, name, dosage, frequency, times, notes)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id, user_id, name, dosage, frequency, times, notes, created_at
            "#,
        )
        .bind(user_id)
        .bind(&input.name)
        .bind(&input.dosage)
        .bind(&input.frequency)
        .bind(input.times)
        .bind(&input.notes)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// Replace a medication's fields
    ///
    /// Returns false when no row matched both id and owner.
    pub async fn update(
        pool: &SqlitePool,
        id: i64,
        user_id: i64,
        input: &MedicationInput,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE medications
            SET name = ?, dosage = ?, frequency = ?, times = ?, notes = ?
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(&input.name)
        .bind(&input.dosage)
        .bind(&input.frequency)
        .bind(input.times)
        .bind(&input.notes)
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a medication; its logs go with it
    pub async fn delete(pool: &SqlitePool, id: i64, user_id: i64) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM medications
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Append a dose log for a medication the user owns
    ///
    /// Ownership check and insert are one statement. Returns the new log id,
    /// or `None` when the medication does not exist for this user.
    pub async fn log_dose(pool: &SqlitePool, input: CreateMedicationLog) -> Result<Option<i64>> {
        let log_id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO medication_logs (medication_id, user_id, taken_at, notes)
            SELECT id, user_id, ?, ?
            FROM medications
            WHERE id = ? AND user_id = ?
            RETURNING id
            "#,
        )
        .bind(input.taken_at)
        .bind(&input.notes)
        .bind(input.medication_id)
        .bind(input.user_id)
        .fetch_optional(pool)
        .await?;

        Ok(log_id)
    }

    /// Count a user's medications and the dose logs dated `day` (UTC)
    ///
    /// Repeat doses of one medication each count toward `total_taken`.
    pub async fn adherence_counts(
        pool: &SqlitePool,
        user_id: i64,
        day: NaiveDate,
    ) -> Result<AdherenceCounts> {
        let counts = sqlx::query_as::<_, AdherenceCounts>(
            r#"
            SELECT
                COUNT(DISTINCT m.id) AS total_medications,
                COUNT(ml.id) AS total_taken
            FROM medications m
            LEFT JOIN medication_logs ml
                ON ml.medication_id = m.id AND DATE(ml.taken_at) = ?
            WHERE m.user_id = ?
            "#,
        )
        .bind(day.format("%Y-%m-%d").to_string())
        .bind(user_id)
        .fetch_one(pool)
        .await?;

        Ok(counts)
    }
}
