//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! repositories and the auth primitives.

pub mod medication;
pub mod user;

pub use medication::MedicationService;
pub use user::UserService;
