//! Data models for the MedTrack application

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Account role
///
/// Stored as lowercase text in the `users.role` column and carried
/// verbatim inside identity tokens.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Patient,
    Caretaker,
}

/// Valid role values, in the form accepted on the wire
pub const VALID_ROLES: &[&str] = &["patient", "caretaker"];

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Patient => "patient",
            Role::Caretaker => "caretaker",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "patient" => Ok(Role::Patient),
            "caretaker" => Ok(Role::Caretaker),
            other => Err(format!(
                "Invalid role '{}'. Must be one of: {}",
                other,
                VALID_ROLES.join(", ")
            )),
        }
    }
}
