//! API-level error type and its HTTP mapping.
//!
//! Every user-facing failure becomes a status code plus a structured
//! `{error, message}` body at the endpoint boundary.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use emrmock_core::EmrError;

use crate::dto::ErrorRes;

/// Fixed message carried by every 401 response.
pub const UNAUTHORIZED_MESSAGE: &str =
    "A valid API key must be provided in the `Authorization: Bearer <key>` header.";

/// An error response in the REST API's taxonomy.
#[derive(Debug)]
pub enum ApiError {
    Unauthorized,
    NotFound(String),
    BadRequest(String),
    Internal(String),
}

impl ApiError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "Unauthorized",
                UNAUTHORIZED_MESSAGE.to_string(),
            ),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, "Not Found", message.clone()),
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, "Bad Request", message.clone())
            }
            ApiError::Internal(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error",
                message.clone(),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = self.parts();
        if status.is_server_error() {
            tracing::error!(%status, %message, "request failed");
        }
        (
            status,
            Json(ErrorRes {
                error: error.to_string(),
                message,
            }),
        )
            .into_response()
    }
}

impl From<EmrError> for ApiError {
    fn from(err: EmrError) -> Self {
        match err {
            EmrError::SummaryNotFound => {
                ApiError::NotFound("No summary found for this patient.".into())
            }
            EmrError::PatientNotFound => ApiError::NotFound("Patient not found.".into()),
            EmrError::EncounterNoteNotFound => {
                ApiError::NotFound("No note found for this encounter.".into())
            }
            EmrError::InvalidInput(message) => ApiError::BadRequest(message),
            EmrError::PatientId(e) => ApiError::Internal(e.to_string()),
            EmrError::Serialization(e) => ApiError::Internal(e.to_string()),
        }
    }
}
