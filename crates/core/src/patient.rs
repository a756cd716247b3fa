//! Patient domain model.
//!
//! Patients are seeded at startup and never created through the API; the
//! optional `display_*` fields exist purely so a client can show something
//! sensible in a picker.

use emrmock_types::PatientId;
use serde::{Deserialize, Serialize};

/// A patient known to the mock EMR.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    /// Opaque, url-safe identifier (at most 32 characters).
    pub id: PatientId,
    /// Human-readable name shown by clients.
    pub display_name: String,
    /// Chart/record number shown next to the name, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_gender: Option<String>,
    /// Date of birth in `YYYY-MM-DD` form, display-only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_birthdate: Option<String>,
}
