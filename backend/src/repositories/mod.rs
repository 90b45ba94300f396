//! Database repositories
//!
//! Provides data access layer for database operations.

pub mod medication;
pub mod user;

pub use medication::{
    AdherenceCounts, CreateMedicationLog, MedicationInput, MedicationRecord, MedicationRepository,
};
pub use user::{UserRecord, UserRepository};
