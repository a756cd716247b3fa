//! Response shapes for the REST API.
//!
//! Core types are converted field by field into these wire structs; dates
//! become ISO strings and patients are decorated with absolute summary
//! endpoint links so clients need no URL knowledge of their own.

use emrmock_core::{Encounter, Patient};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Absolute URLs a client uses to read and write one patient's summary.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PatientSummaryLinks {
    pub get_endpoint: String,
    pub set_endpoint: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PatientRes {
    pub id: String,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_birthdate: Option<String>,
    pub patient_summary: PatientSummaryLinks,
}

impl PatientRes {
    pub fn from_patient(patient: &Patient, base_url: &str) -> Self {
        let summary_url = format!("{}/patient-summary/{}", base_url, patient.id);
        Self {
            id: patient.id.as_str().to_owned(),
            display_name: patient.display_name.clone(),
            display_id: patient.display_id.clone(),
            display_gender: patient.display_gender.clone(),
            display_birthdate: patient.display_birthdate.clone(),
            patient_summary: PatientSummaryLinks {
                get_endpoint: summary_url.clone(),
                set_endpoint: summary_url,
            },
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PatientListRes {
    pub patients: Vec<PatientRes>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct NoteIngestRes {
    pub message: String,
    pub encounter_id: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SummaryRes {
    pub summary_notes: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageRes {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EncounterRes {
    pub id: String,
    pub display_name: String,
    /// Encounter date in `YYYY-MM-DD` form.
    pub date: String,
}

impl EncounterRes {
    pub fn from_encounter(encounter: &Encounter) -> Self {
        Self {
            id: encounter.id.clone(),
            display_name: encounter.display_name.clone(),
            date: encounter.date.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EncounterListRes {
    pub encounters: Vec<EncounterRes>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EncounterNoteRes {
    pub note: String,
}

/// Logical endpoint names mapped to absolute URLs. Endpoints taking a path
/// parameter use a `{placeholder}` template.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EndpointsRes {
    pub patients: String,
    pub notes: String,
    pub patient_summary: String,
    pub encounters: String,
    pub encounter_note: String,
    pub view_note: String,
}

impl EndpointsRes {
    pub fn from_base_url(base_url: &str) -> Self {
        Self {
            patients: format!("{base_url}/patients"),
            notes: format!("{base_url}/notes"),
            patient_summary: format!("{base_url}/patient-summary/{{patientId}}"),
            encounters: format!("{base_url}/patients/{{patientId}}/encounters"),
            encounter_note: format!("{base_url}/encounters/{{encounterId}}"),
            view_note: format!("{base_url}/view-note"),
        }
    }
}

/// Structured error body: `{error, message}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub error: String,
    pub message: String,
}
