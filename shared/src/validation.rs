//! Input validation functions
//!
//! Request types derive `validator::Validate`; this module turns the
//! resulting errors into user-facing messages and parses the free-form
//! values the API accepts.

use chrono::{DateTime, NaiveDate, Utc};
use validator::ValidationErrors;

/// Map technical field names to user-friendly display labels
pub fn get_field_display_label(field_name: &str) -> &str {
    match field_name {
        "name" => "Name",
        "email" => "Email",
        "password" => "Password",
        "role" => "Role",
        "dosage" => "Dosage",
        "frequency" => "Frequency",
        "times" => "Times",
        "notes" => "Notes",
        "date" => "Date",
        _ => field_name,
    }
}

/// Collapse validation errors into one message, ordered by field name
///
/// e.g. `"Dosage is required; Name is required"`
pub fn describe_errors(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .iter()
        .flat_map(|(field, errs)| {
            let label = get_field_display_label(field);
            errs.iter().map(move |e| match &e.message {
                Some(msg) => format!("{} {}", label, msg),
                None => format!("{} is invalid", label),
            })
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// Parse the caller-supplied time a dose was taken
///
/// Accepts an RFC 3339 timestamp (`2024-05-01T08:30:00.000Z`) or a bare
/// calendar date (`2024-05-01`, read as midnight UTC).
pub fn parse_taken_at(value: &str) -> Result<DateTime<Utc>, String> {
    let value = value.trim();
    if value.is_empty() {
        return Err("Date is required".to_string());
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(ts.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| format!("Invalid date '{}': expected RFC 3339 or YYYY-MM-DD", value))
}
