//! API-key middleware guarding every protected route.
//!
//! The REST analogue of a gRPC auth interceptor: the shared secret is
//! accepted from the `Authorization: Bearer <key>` header, with an `apiKey`
//! query parameter as a fallback for browser navigations (the note-viewer
//! link) that cannot set headers.

use std::collections::HashMap;

use axum::extract::{Query, Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use api_shared::auth;

use crate::error::ApiError;
use crate::AppState;

/// Admits the request if either credential location carries the shared
/// secret; otherwise responds 401 with the fixed Unauthorized body.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let expected = state.cfg.api_key();

    let header_ok = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(auth::bearer_token)
        .map(|token| auth::validate_api_key(token, expected).is_ok())
        .unwrap_or(false);
    if header_ok {
        return next.run(request).await;
    }

    let query_ok = Query::<HashMap<String, String>>::try_from_uri(request.uri())
        .ok()
        .and_then(|Query(params)| params.get("apiKey").cloned())
        .map(|token| auth::validate_api_key(&token, expected).is_ok())
        .unwrap_or(false);
    if query_ok {
        return next.run(request).await;
    }

    ApiError::Unauthorized.into_response()
}
