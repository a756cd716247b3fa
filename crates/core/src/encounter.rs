//! Encounter domain model and identifier generation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single clinical visit/session for a patient, owning at most one note.
///
/// Encounters are held as an append-only list per patient; insertion order
/// is display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Encounter {
    /// Globally unique identifier across all patients.
    pub id: String,
    /// Display name, defaulting to the title of the note that created it.
    pub display_name: String,
    /// Encounter date, defaulting to the day of ingestion.
    pub date: NaiveDate,
}

/// Generates a fresh globally unique encounter identifier.
///
/// Uses the canonical 32-character lowercase hex form (no hyphens) behind an
/// `enc_` prefix, e.g. `enc_550e8400e29b41d4a716446655440000`.
pub fn new_encounter_id() -> String {
    format!("enc_{}", Uuid::new_v4().simple())
}
