//! End-to-end tests driving the real router with `tower::ServiceExt::oneshot`.
//!
//! Each test builds its own app (seeded store, viewer auto-open disabled) so
//! state never leaks between tests.

use std::sync::Arc;

use api_rest::error::UNAUTHORIZED_MESSAGE;
use api_rest::{build_router, AppState};
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use emrmock_core::{CoreConfig, EmrStore};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

const API_KEY: &str = "test-secret";
const BASE_URL: &str = "http://localhost:3001";

fn test_app() -> Router {
    let cfg = CoreConfig::new(API_KEY.into(), BASE_URL.into(), false).expect("config");
    let store = EmrStore::with_fixtures().expect("fixtures");
    build_router(AppState {
        store,
        cfg: Arc::new(cfg),
    })
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(request).await.expect("infallible");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("collect body")
        .to_bytes();
    (status, bytes.to_vec())
}

fn get(path: &str) -> Request<Body> {
    Request::builder()
        .uri(path)
        .header(header::AUTHORIZATION, format!("Bearer {API_KEY}"))
        .body(Body::empty())
        .expect("request")
}

fn post_json(path: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(path)
        .header(header::AUTHORIZATION, format!("Bearer {API_KEY}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body).expect("serialize")))
        .expect("request")
}

fn json_body(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).expect("json body")
}

#[tokio::test]
async fn requests_without_credentials_get_the_fixed_401_body() {
    let app = test_app();
    let routes = [
        ("GET", "/endpoints"),
        ("GET", "/patients"),
        ("POST", "/notes"),
        ("GET", "/patient-summary/pat_12345_dummy"),
        ("POST", "/patient-summary/pat_12345_dummy"),
        ("GET", "/patients/pat_12345_dummy/encounters"),
        ("GET", "/encounters/enc_whatever"),
        ("GET", "/view-note"),
    ];

    for (method, path) in routes {
        let request = Request::builder()
            .method(method)
            .uri(path)
            .body(Body::empty())
            .expect("request");
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{method} {path}");
        let body = json_body(&body);
        assert_eq!(body["error"], "Unauthorized", "{method} {path}");
        assert_eq!(body["message"], UNAUTHORIZED_MESSAGE, "{method} {path}");
    }
}

#[tokio::test]
async fn wrong_bearer_token_is_rejected() {
    let app = test_app();
    let request = Request::builder()
        .uri("/patients")
        .header(header::AUTHORIZATION, "Bearer wrong-key")
        .body(Body::empty())
        .expect("request");
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn api_key_query_parameter_is_accepted_as_fallback() {
    let app = test_app();
    let request = Request::builder()
        .uri(format!("/patients?apiKey={API_KEY}"))
        .body(Body::empty())
        .expect("request");
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn unknown_paths_fall_through_to_404_not_401() {
    let app = test_app();
    let request = Request::builder()
        .uri("/definitely-not-a-route")
        .body(Body::empty())
        .expect("request");
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_endpoint_is_open() {
    let app = test_app();
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .expect("request");
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body)["ok"], true);
}

#[tokio::test]
async fn patients_are_listed_with_summary_links() {
    let app = test_app();
    let (status, body) = send(&app, get("/patients")).await;
    assert_eq!(status, StatusCode::OK);

    let body = json_body(&body);
    let patients = body["patients"].as_array().expect("patients array");
    assert_eq!(patients.len(), 2);
    assert_eq!(patients[0]["id"], "pat_12345_dummy");
    assert_eq!(patients[0]["display_name"], "John Doe");
    assert_eq!(patients[1]["display_birthdate"], "2000-05-15");
    assert_eq!(
        patients[0]["patient_summary"]["get_endpoint"],
        format!("{BASE_URL}/patient-summary/pat_12345_dummy")
    );
}

#[tokio::test]
async fn endpoints_map_advertises_absolute_urls() {
    let app = test_app();
    let (status, body) = send(&app, get("/endpoints")).await;
    assert_eq!(status, StatusCode::OK);

    let body = json_body(&body);
    assert_eq!(body["patients"], format!("{BASE_URL}/patients"));
    assert_eq!(body["notes"], format!("{BASE_URL}/notes"));
    assert_eq!(body["view_note"], format!("{BASE_URL}/view-note"));
    assert_eq!(
        body["encounters"],
        format!("{BASE_URL}/patients/{{patientId}}/encounters")
    );
}

#[tokio::test]
async fn posting_a_note_creates_one_encounter_dated_today() {
    let app = test_app();
    let (status, body) = send(
        &app,
        post_json(
            "/notes",
            &json!({
                "patient_id": "pat_12345_dummy",
                "note_title": "Follow-up",
                "transcript": "Patient reports improvement.",
                "notes": "All good."
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let body = json_body(&body);
    assert_eq!(body["message"], "Note received and view opened in browser!");
    let encounter_id = body["encounter_id"].as_str().expect("encounter id");

    let (status, body) = send(&app, get("/patients/pat_12345_dummy/encounters")).await;
    assert_eq!(status, StatusCode::OK);
    let encounters = json_body(&body)["encounters"]
        .as_array()
        .expect("encounters array")
        .clone();
    assert_eq!(encounters.len(), 1);
    assert_eq!(encounters[0]["id"], encounter_id);
    assert_eq!(encounters[0]["display_name"], "Follow-up");
    assert_eq!(
        encounters[0]["date"],
        chrono::Utc::now().date_naive().to_string()
    );

    let (status, body) = send(&app, get(&format!("/encounters/{encounter_id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body)["note"], "All good.");
}

#[tokio::test]
async fn posting_with_encounter_id_overwrites_instead_of_appending() {
    let app = test_app();
    let (_, body) = send(
        &app,
        post_json(
            "/notes",
            &json!({
                "patient_id": "pat_12345_dummy",
                "note_title": "Follow-up",
                "notes": "v1"
            }),
        ),
    )
    .await;
    let encounter_id = json_body(&body)["encounter_id"]
        .as_str()
        .expect("encounter id")
        .to_owned();

    let update = json!({
        "patient_id": "pat_12345_dummy",
        "note_title": "Follow-up (amended)",
        "encounter_id": encounter_id,
        "notes": "v2"
    });
    // Repeating the identical update is idempotent.
    for _ in 0..2 {
        let (status, body) = send(&app, post_json("/notes", &update)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_body(&body)["encounter_id"], encounter_id.as_str());
    }

    let (_, body) = send(&app, get("/patients/pat_12345_dummy/encounters")).await;
    assert_eq!(json_body(&body)["encounters"].as_array().expect("array").len(), 1);

    let (_, body) = send(&app, get(&format!("/encounters/{encounter_id}"))).await;
    assert_eq!(json_body(&body)["note"], "v2");
}

#[tokio::test]
async fn note_without_any_body_kind_is_rejected_and_stores_nothing() {
    let app = test_app();
    let (status, body) = send(
        &app,
        post_json(
            "/notes",
            &json!({
                "patient_id": "pat_12345_dummy",
                "note_title": "Broken"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json_body(&body)["error"], "Bad Request");

    // Nothing was ingested: no encounters, no cached viewer payload.
    let (_, body) = send(&app, get("/patients/pat_12345_dummy/encounters")).await;
    assert_eq!(json_body(&body)["encounters"], json!([]));
    let (status, _) = send(&app, get("/view-note")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn summary_update_flow() {
    let app = test_app();

    let (status, body) = send(&app, get("/patient-summary/pat_never_seeded")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        json_body(&body)["message"],
        "No summary found for this patient."
    );

    let (status, body) = send(
        &app,
        post_json("/patient-summary/pat_never_seeded", &json!({"summary_notes": "hi"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json_body(&body)["message"], "Patient not found.");

    let (status, body) = send(
        &app,
        post_json("/patient-summary/pat_12345_dummy", &json!({"summary_notes": 42})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(&body)["message"],
        "Request body must contain a \"summary_notes\" string."
    );

    let (status, body) = send(
        &app,
        post_json(
            "/patient-summary/pat_12345_dummy",
            &json!({"summary_notes": "Rewritten after visit."}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body)["message"], "Summary updated successfully.");

    let (status, body) = send(&app, get("/patient-summary/pat_12345_dummy")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body)["summary_notes"], "Rewritten after visit.");
}

#[tokio::test]
async fn seeded_patient_without_encounters_yields_empty_list() {
    let app = test_app();
    let (status, body) = send(&app, get("/patients/pat_67890_dummy/encounters")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body), json!({"encounters": []}));
}

#[tokio::test]
async fn view_note_renders_last_ingested_payload() {
    let app = test_app();

    // Query-parameter credential, as the opened browser tab would send it.
    let request = Request::builder()
        .uri(format!("/view-note?apiKey={API_KEY}"))
        .body(Body::empty())
        .expect("request");
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(String::from_utf8_lossy(&body).contains("No note data available."));

    let (status, _) = send(
        &app,
        post_json(
            "/notes",
            &json!({
                "patient_id": "pat_12345_dummy",
                "note_title": "Structured",
                "notes_json": {"a": 1},
                "notes_template": "soap"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, get("/view-note")).await;
    assert_eq!(status, StatusCode::OK);
    let html = String::from_utf8_lossy(&body).into_owned();
    assert!(html.contains("{\n  \"a\": 1\n}"));
    assert!(html.contains("pat_12345_dummy"));
}
