//! Note ingestion payload.
//!
//! The capture tool submits notes as JSON whose shape is a tagged union on
//! key presence: either a `notes` string (unstructured) or a `notes_json`
//! object with the `notes_template` it was produced from (structured).
//! Deserialisation goes through the permissive wire form [`NoteForm`] and
//! validates the required-field combinations, so handlers only ever see the
//! explicit sum type.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{EmrError, EmrResult};

/// Errors produced when a note submission has an invalid shape.
#[derive(Debug, thiserror::Error)]
pub enum NoteFormError {
    #[error("request must contain either `notes` or `notes_json`")]
    MissingBody,
    #[error("request must contain exactly one of `notes` or `notes_json`")]
    AmbiguousBody,
    #[error("`notes_template` is required when `notes_json` is used")]
    MissingTemplate,
}

/// The note content of a submission.
#[derive(Debug, Clone, PartialEq)]
pub enum NoteBody {
    /// Unstructured note text, stored verbatim.
    Text(String),
    /// Structured note, stored as pretty-printed JSON text.
    Structured {
        json: Value,
        /// Name of the template the structured note was generated from.
        /// Carried for display/debugging only.
        template: String,
    },
}

impl NoteBody {
    /// The text that is stored as the encounter note.
    ///
    /// # Errors
    ///
    /// Returns `EmrError::Serialization` if a structured note cannot be
    /// pretty-printed.
    pub fn rendered_text(&self) -> EmrResult<String> {
        match self {
            NoteBody::Text(text) => Ok(text.clone()),
            NoteBody::Structured { json, .. } => {
                serde_json::to_string_pretty(json).map_err(EmrError::Serialization)
            }
        }
    }
}

/// A validated note submission.
///
/// `patient_id` is deliberately a plain string: ingestion performs no
/// existence check against the patient list, and unknown ids silently gain
/// an encounter bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "NoteForm", into = "NoteForm")]
pub struct NotePayload {
    pub patient_id: String,
    pub note_title: String,
    pub transcript: Option<String>,
    /// Zero or more playable media data URIs.
    pub audio_base64: Vec<String>,
    /// Present on the update path; absent when a new encounter should be
    /// created.
    pub encounter_id: Option<String>,
    pub body: NoteBody,
}

/// Wire form of a note submission, prior to shape validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteForm {
    pub patient_id: String,
    pub note_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub audio_base64: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encounter_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes_json: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes_template: Option<String>,
}

impl TryFrom<NoteForm> for NotePayload {
    type Error = NoteFormError;

    fn try_from(form: NoteForm) -> Result<Self, Self::Error> {
        let body = match (form.notes, form.notes_json) {
            (Some(_), Some(_)) => return Err(NoteFormError::AmbiguousBody),
            (None, None) => return Err(NoteFormError::MissingBody),
            (Some(text), None) => NoteBody::Text(text),
            (None, Some(json)) => NoteBody::Structured {
                json,
                template: form.notes_template.ok_or(NoteFormError::MissingTemplate)?,
            },
        };

        Ok(Self {
            patient_id: form.patient_id,
            note_title: form.note_title,
            transcript: form.transcript,
            audio_base64: form.audio_base64,
            encounter_id: form.encounter_id,
            body,
        })
    }
}

impl From<NotePayload> for NoteForm {
    fn from(payload: NotePayload) -> Self {
        let (notes, notes_json, notes_template) = match payload.body {
            NoteBody::Text(text) => (Some(text), None, None),
            NoteBody::Structured { json, template } => (None, Some(json), Some(template)),
        };

        Self {
            patient_id: payload.patient_id,
            note_title: payload.note_title,
            transcript: payload.transcript,
            audio_base64: payload.audio_base64,
            encounter_id: payload.encounter_id,
            notes,
            notes_json,
            notes_template,
        }
    }
}
