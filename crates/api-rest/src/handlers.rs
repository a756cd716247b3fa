//! Endpoint handlers.
//!
//! Each handler is a thin wrapper translating store results into responses;
//! everything stateful lives in [`crate::AppState`].

use axum::extract::{Path as AxumPath, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::Json;
use serde_json::Value;

use api_shared::{HealthRes, HealthService};
use emrmock_core::{EmrError, NotePayload};

use crate::dto::{
    EncounterListRes, EncounterNoteRes, EncounterRes, EndpointsRes, ErrorRes, MessageRes,
    NoteIngestRes, PatientListRes, PatientRes, SummaryRes,
};
use crate::error::ApiError;
use crate::viewer;
use crate::AppState;

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint.
///
/// Open access: used for monitoring, so it sits outside the credential gate.
#[axum::debug_handler]
pub async fn health() -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/endpoints",
    responses(
        (status = 200, description = "Logical endpoint names mapped to absolute URLs", body = EndpointsRes),
        (status = 401, description = "Unauthorized", body = ErrorRes)
    )
)]
/// Advertise the server's endpoints as absolute URLs.
///
/// Lets a client discover the full API surface from the base URL alone.
#[axum::debug_handler]
pub async fn list_endpoints(State(state): State<AppState>) -> Json<EndpointsRes> {
    tracing::info!("GET /endpoints request received");
    Json(EndpointsRes::from_base_url(state.cfg.public_base_url()))
}

#[utoipa::path(
    get,
    path = "/patients",
    responses(
        (status = 200, description = "List of patients", body = PatientListRes),
        (status = 401, description = "Unauthorized", body = ErrorRes)
    )
)]
/// List all patients in the system.
///
/// Patients are seeded at startup; each entry carries absolute
/// `patient_summary` endpoint links built from the configured base URL.
#[axum::debug_handler]
pub async fn list_patients(State(state): State<AppState>) -> Json<PatientListRes> {
    tracing::info!("GET /patients request received");
    let base_url = state.cfg.public_base_url();
    let patients = state
        .store
        .patients()
        .iter()
        .map(|patient| PatientRes::from_patient(patient, base_url))
        .collect();
    Json(PatientListRes { patients })
}

#[utoipa::path(
    post,
    path = "/notes",
    request_body(
        content = Object,
        description = "Note submission: `patient_id`, `note_title`, optional \
                       `transcript`/`audio_base64`/`encounter_id`, and exactly one of \
                       `notes` or `notes_json` (+ `notes_template`)"
    ),
    responses(
        (status = 200, description = "Note recorded", body = NoteIngestRes),
        (status = 400, description = "Invalid payload shape", body = ErrorRes),
        (status = 401, description = "Unauthorized", body = ErrorRes)
    )
)]
/// Record a submitted note.
///
/// Without an `encounter_id` a fresh encounter is appended to the patient's
/// list; with one, that encounter's note is overwritten. On success the note
/// viewer is opened in a browser as a fire-and-forget side effect.
///
/// # Errors
/// Returns `400 Bad Request` if the payload shape is invalid; nothing is
/// stored in that case.
#[axum::debug_handler]
pub async fn ingest_note(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<NoteIngestRes>, ApiError> {
    tracing::info!("POST /notes request received");

    let payload: NotePayload =
        serde_json::from_value(body).map_err(|err| ApiError::BadRequest(err.to_string()))?;
    let receipt = state.store.ingest_note(payload)?;

    if state.cfg.auto_open_viewer() {
        viewer::open_in_background(state.cfg.view_note_url());
    }

    Ok(Json(NoteIngestRes {
        message: "Note received and view opened in browser!".into(),
        encounter_id: receipt.encounter_id,
    }))
}

#[utoipa::path(
    get,
    path = "/patient-summary/{patient_id}",
    responses(
        (status = 200, description = "Clinical summary text", body = SummaryRes),
        (status = 401, description = "Unauthorized", body = ErrorRes),
        (status = 404, description = "No summary for this patient", body = ErrorRes)
    )
)]
/// Fetch a patient's clinical summary.
#[axum::debug_handler]
pub async fn get_patient_summary(
    State(state): State<AppState>,
    AxumPath(patient_id): AxumPath<String>,
) -> Result<Json<SummaryRes>, ApiError> {
    tracing::info!(%patient_id, "GET /patient-summary request received");
    let summary_notes = state.store.summary(&patient_id)?;
    Ok(Json(SummaryRes { summary_notes }))
}

#[utoipa::path(
    post,
    path = "/patient-summary/{patient_id}",
    request_body(content = Object, description = "`{\"summary_notes\": \"<text>\"}`"),
    responses(
        (status = 200, description = "Summary updated", body = MessageRes),
        (status = 400, description = "summary_notes missing or not a string", body = ErrorRes),
        (status = 401, description = "Unauthorized", body = ErrorRes),
        (status = 404, description = "Patient not found", body = ErrorRes)
    )
)]
/// Update a patient's clinical summary in place.
///
/// # Errors
/// Returns `404 Not Found` for patients without a summary entry (checked
/// before the payload type), `400 Bad Request` when `summary_notes` is
/// missing or not a string.
#[axum::debug_handler]
pub async fn update_patient_summary(
    State(state): State<AppState>,
    AxumPath(patient_id): AxumPath<String>,
    Json(body): Json<Value>,
) -> Result<Json<MessageRes>, ApiError> {
    tracing::info!(%patient_id, "POST /patient-summary request received");

    let summary_notes = body.get("summary_notes").cloned().unwrap_or(Value::Null);
    state
        .store
        .update_summary(&patient_id, &summary_notes)
        .map_err(|err| match err {
            EmrError::InvalidInput(_) => ApiError::BadRequest(
                "Request body must contain a \"summary_notes\" string.".into(),
            ),
            other => ApiError::from(other),
        })?;

    Ok(Json(MessageRes {
        message: "Summary updated successfully.".into(),
    }))
}

#[utoipa::path(
    get,
    path = "/patients/{patient_id}/encounters",
    responses(
        (status = 200, description = "Encounters in insertion order", body = EncounterListRes),
        (status = 401, description = "Unauthorized", body = ErrorRes),
        (status = 404, description = "Patient not found", body = ErrorRes)
    )
)]
/// List a patient's encounters.
///
/// A known patient with no encounters yields an empty list, not a 404.
#[axum::debug_handler]
pub async fn list_encounters(
    State(state): State<AppState>,
    AxumPath(patient_id): AxumPath<String>,
) -> Result<Json<EncounterListRes>, ApiError> {
    tracing::info!(%patient_id, "GET encounters request received");
    let encounters = state
        .store
        .encounters(&patient_id)?
        .iter()
        .map(EncounterRes::from_encounter)
        .collect();
    Ok(Json(EncounterListRes { encounters }))
}

#[utoipa::path(
    get,
    path = "/encounters/{encounter_id}",
    responses(
        (status = 200, description = "Stored note text", body = EncounterNoteRes),
        (status = 401, description = "Unauthorized", body = ErrorRes),
        (status = 404, description = "No note for this encounter", body = ErrorRes)
    )
)]
/// Fetch the note stored for an encounter.
#[axum::debug_handler]
pub async fn get_encounter_note(
    State(state): State<AppState>,
    AxumPath(encounter_id): AxumPath<String>,
) -> Result<Json<EncounterNoteRes>, ApiError> {
    tracing::info!(%encounter_id, "GET encounter note request received");
    let note = state.store.encounter_note(&encounter_id)?;
    Ok(Json(EncounterNoteRes { note }))
}

#[utoipa::path(
    get,
    path = "/view-note",
    responses(
        (status = 200, description = "HTML page rendering the last ingested note"),
        (status = 401, description = "Unauthorized", body = ErrorRes),
        (status = 404, description = "No note has been posted yet")
    )
)]
/// Render the most recently ingested note as an HTML page.
///
/// This is the page the browser-open side effect navigates to; the API key
/// arrives via the `apiKey` query parameter.
#[axum::debug_handler]
pub async fn view_note(
    State(state): State<AppState>,
) -> Result<Html<String>, (StatusCode, Html<&'static str>)> {
    tracing::info!("GET /view-note request received");
    match state.store.last_note() {
        Some(payload) => Ok(Html(viewer::render_note_html(&payload))),
        None => Err((StatusCode::NOT_FOUND, Html(viewer::NOT_FOUND_PAGE))),
    }
}
