//! # API REST
//!
//! REST API implementation for the EMR mock server.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - The API-key credential gate (header, with a query-string fallback)
//! - OpenAPI/Swagger documentation
//! - The note-viewer HTML page
//!
//! Uses `api-shared` for credential checks and the health service.

#![warn(rust_2018_idioms)]

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod viewer;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::middleware as axum_middleware;
use axum::routing::{get, post};
use axum::Router;
use emrmock_core::{CoreConfig, EmrStore};
use utoipa::OpenApi;

/// Maximum accepted request body size. Audio attachments arrive as base64
/// data URIs, so the default limit is far too small.
pub const MAX_BODY_BYTES: usize = 50 * 1024 * 1024;

/// Application state shared across REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: EmrStore,
    pub cfg: Arc<CoreConfig>,
}

/// Build the axum router with all endpoints.
///
/// Every route except `/health` sits behind the API-key middleware.
/// Unmatched paths fall through to axum's default 404 rather than a 401.
pub fn build_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/endpoints", get(handlers::list_endpoints))
        .route("/patients", get(handlers::list_patients))
        .route("/notes", post(handlers::ingest_note))
        .route("/patient-summary/:patient_id", get(handlers::get_patient_summary))
        .route("/patient-summary/:patient_id", post(handlers::update_patient_summary))
        .route("/patients/:patient_id/encounters", get(handlers::list_encounters))
        .route("/encounters/:encounter_id", get(handlers::get_encounter_note))
        .route("/view-note", get(handlers::view_note))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::require_api_key,
        ));

    Router::new()
        .merge(protected)
        .route("/health", get(handlers::health))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health,
        handlers::list_endpoints,
        handlers::list_patients,
        handlers::ingest_note,
        handlers::get_patient_summary,
        handlers::update_patient_summary,
        handlers::list_encounters,
        handlers::get_encounter_note,
        handlers::view_note,
    ),
    components(schemas(
        api_shared::HealthRes,
        dto::EndpointsRes,
        dto::PatientListRes,
        dto::PatientRes,
        dto::PatientSummaryLinks,
        dto::NoteIngestRes,
        dto::SummaryRes,
        dto::MessageRes,
        dto::EncounterRes,
        dto::EncounterListRes,
        dto::EncounterNoteRes,
        dto::ErrorRes,
    ))
)]
pub struct ApiDoc;
