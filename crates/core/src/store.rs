//! In-memory clinical data store.
//!
//! Four independent mappings (patients, summaries, encounters, encounter
//! notes) plus a single-slot cache of the most recently ingested raw note
//! payload. Everything lives for the process lifetime; there is no
//! persistence and no atomicity across mappings.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use emrmock_types::PatientId;
use serde_json::Value;

use crate::encounter::{self, Encounter};
use crate::note::NotePayload;
use crate::patient::Patient;
use crate::{EmrError, EmrResult};

/// Outcome of a note ingestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestReceipt {
    /// The encounter the note was stored under.
    pub encounter_id: String,
    /// Whether a new encounter was appended (`false` on the update path).
    pub created_encounter: bool,
}

#[derive(Debug, Default)]
struct StoreInner {
    /// Insertion order is display order.
    patients: Vec<Patient>,
    /// Clinical summary text by patient id. Doubles as the
    /// patient-existence check for the summary and encounter read paths.
    summaries: HashMap<String, String>,
    /// Append-only encounter lists by patient id.
    encounters: HashMap<String, Vec<Encounter>>,
    /// Note text by encounter id. Last write wins.
    notes: HashMap<String, String>,
    last_note: Option<NotePayload>,
}

/// Cheap cloneable handle to the shared in-memory store.
///
/// All clones share the same state. Operations are synchronous and not
/// transactional across mappings.
#[derive(Debug, Clone, Default)]
pub struct EmrStore {
    inner: Arc<Mutex<StoreInner>>,
}

impl EmrStore {
    /// Creates an empty store with no patients.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with the deterministic demo fixtures: two
    /// patients, each with a clinical summary and no encounters.
    ///
    /// # Errors
    ///
    /// Returns an error if a fixture patient id fails validation.
    pub fn with_fixtures() -> EmrResult<Self> {
        let store = Self::new();
        {
            let mut inner = store.locked();
            let fixtures = [
                (
                    Patient {
                        id: PatientId::new("pat_12345_dummy")?,
                        display_name: "John Doe".into(),
                        display_id: Some("JD-001".into()),
                        display_gender: Some("Male".into()),
                        display_birthdate: Some("1970-06-22".into()),
                    },
                    "John Doe has a history of hypertension and is currently on Lisinopril. \
                     He reports no new complaints today. Vitals are stable.",
                ),
                (
                    Patient {
                        id: PatientId::new("pat_67890_dummy")?,
                        display_name: "Jane Doe".into(),
                        display_id: Some("JD-002".into()),
                        display_gender: Some("Female".into()),
                        display_birthdate: Some("2000-05-15".into()),
                    },
                    "Jane Doe is here for her annual check-up. She has a pollen allergy \
                     and uses a seasonal nasal spray. She is up-to-date on all vaccinations.",
                ),
            ];
            for (patient, summary) in fixtures {
                inner
                    .summaries
                    .insert(patient.id.as_str().to_owned(), summary.to_owned());
                inner.patients.push(patient);
            }
        }
        Ok(store)
    }

    fn locked(&self) -> MutexGuard<'_, StoreInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Full patient list in insertion order.
    pub fn patients(&self) -> Vec<Patient> {
        self.locked().patients.clone()
    }

    /// Clinical summary for a patient.
    ///
    /// # Errors
    ///
    /// Returns `EmrError::SummaryNotFound` if the patient has no summary
    /// entry.
    pub fn summary(&self, patient_id: &str) -> EmrResult<String> {
        self.locked()
            .summaries
            .get(patient_id)
            .cloned()
            .ok_or(EmrError::SummaryNotFound)
    }

    /// Replaces a patient's clinical summary.
    ///
    /// Existence is checked against the summaries mapping rather than the
    /// patient list, so a patient lacking a seeded summary entry cannot gain
    /// one here. The existence check precedes the type check.
    ///
    /// # Errors
    ///
    /// Returns `EmrError::PatientNotFound` if the patient id is absent from
    /// the summaries mapping, or `EmrError::InvalidInput` if `summary_notes`
    /// is not a JSON string.
    pub fn update_summary(&self, patient_id: &str, summary_notes: &Value) -> EmrResult<()> {
        let mut inner = self.locked();
        if !inner.summaries.contains_key(patient_id) {
            return Err(EmrError::PatientNotFound);
        }
        let text = summary_notes
            .as_str()
            .ok_or_else(|| EmrError::InvalidInput("summary_notes must be a string".into()))?;
        inner.summaries.insert(patient_id.to_owned(), text.to_owned());
        tracing::debug!(patient_id, "summary updated");
        Ok(())
    }

    /// Encounters for a patient, insertion order.
    ///
    /// The summaries mapping doubles as the patient-existence check:
    /// encounter buckets created by ingesting notes for unknown patients
    /// stay invisible here, and a known patient with no encounters yields an
    /// empty list rather than an error.
    ///
    /// # Errors
    ///
    /// Returns `EmrError::PatientNotFound` if the patient id is absent from
    /// the summaries mapping.
    pub fn encounters(&self, patient_id: &str) -> EmrResult<Vec<Encounter>> {
        let inner = self.locked();
        if !inner.summaries.contains_key(patient_id) {
            return Err(EmrError::PatientNotFound);
        }
        Ok(inner.encounters.get(patient_id).cloned().unwrap_or_default())
    }

    /// Stored note text for an encounter.
    ///
    /// # Errors
    ///
    /// Returns `EmrError::EncounterNoteNotFound` if no note has been stored
    /// under the id.
    pub fn encounter_note(&self, encounter_id: &str) -> EmrResult<String> {
        self.locked()
            .notes
            .get(encounter_id)
            .cloned()
            .ok_or(EmrError::EncounterNoteNotFound)
    }

    /// Records a note submission.
    ///
    /// When the payload carries an `encounter_id` the note for that
    /// encounter is overwritten and no encounter is created. Otherwise a
    /// fresh encounter (named after the note title, dated today) is appended
    /// to the patient's list, creating the list if needed. No check is made
    /// that the patient exists.
    ///
    /// # Errors
    ///
    /// Returns `EmrError::Serialization` if a structured note cannot be
    /// rendered. The raw payload has been cached for the viewer by then.
    pub fn ingest_note(&self, payload: NotePayload) -> EmrResult<IngestReceipt> {
        let mut inner = self.locked();

        // Cache the raw payload before anything else can fail.
        inner.last_note = Some(payload.clone());

        let (encounter_id, created_encounter) = match &payload.encounter_id {
            Some(id) => (id.clone(), false),
            None => {
                let id = encounter::new_encounter_id();
                inner
                    .encounters
                    .entry(payload.patient_id.clone())
                    .or_default()
                    .push(Encounter {
                        id: id.clone(),
                        display_name: payload.note_title.clone(),
                        date: Utc::now().date_naive(),
                    });
                (id, true)
            }
        };

        let content = payload.body.rendered_text()?;
        inner.notes.insert(encounter_id.clone(), content);

        tracing::debug!(
            patient_id = %payload.patient_id,
            encounter_id = %encounter_id,
            created_encounter,
            "note recorded"
        );

        Ok(IngestReceipt {
            encounter_id,
            created_encounter,
        })
    }

    /// The most recently ingested raw payload, if any.
    pub fn last_note(&self) -> Option<NotePayload> {
        self.locked().last_note.clone()
    }
}
