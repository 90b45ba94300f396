//! MedTrack Shared Library
//!
//! Wire types, models, and validation helpers shared between the backend
//! and any client of the MedTrack API.

pub mod errors;
pub mod models;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use models::Role;
pub use types::*;
