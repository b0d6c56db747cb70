//! End-to-end tests for the cfgsrv HTTP API.
//!
//! Tests exercise the full stack: HTTP request -> axum router -> handler ->
//! EntityService -> reconciler/storage -> HTTP response.
//!
//! Most tests run against an in-memory store; the SQLite tests use a temp
//! database. Requests go through `tower::ServiceExt::oneshot` without
//! starting a network server.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::json;
use tower::ServiceExt;

use cfgsrv_server::router::build_router;
use cfgsrv_server::state::AppState;
use cfgsrv_storage::InMemoryStore;

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------

fn test_app() -> Router {
    build_router(AppState::in_memory())
}

/// Sends a request with an optional JSON body and returns (status, json).
async fn send(
    app: &Router,
    method: &str,
    path: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let builder = Request::builder().method(method).uri(path);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap_or(json!(null));
    (status, json)
}

async fn add_python_310(app: &Router) {
    let (status, body) = send(
        app,
        "POST",
        "/languages",
        Some(json!({
            "name": "Python",
            "version": "3.10",
            "run_script": "python3 main.py",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "add language failed: {:?}", body);
}

// ---------------------------------------------------------------------------
// Languages
// ---------------------------------------------------------------------------

#[tokio::test]
async fn add_language_derives_id() {
    let app = test_app();
    let (status, body) = send(
        &app,
        "POST",
        "/languages",
        Some(json!({
            "name": "Go",
            "version": "1.22",
            "build_script": "go build -o main",
            "run_script": "./main",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "id": "go_1.22",
            "name": "Go",
            "version": "1.22",
            "build_script": "go build -o main",
            "run_script": "./main",
        })
    );
}

#[tokio::test]
async fn duplicate_language_is_conflict() {
    let app = test_app();
    let req = json!({ "name": "Go", "version": "1.22", "run_script": "./main" });
    let (status, _) = send(&app, "POST", "/languages", Some(req.clone())).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "POST", "/languages", Some(req)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"]["code"], json!("CONFLICT"));
}

#[tokio::test]
async fn get_missing_language_is_not_found() {
    let app = test_app();
    let (status, body) = send(&app, "GET", "/languages/cobol_85", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], json!("NOT_FOUND"));
}

#[tokio::test]
async fn version_update_renames_and_keeps_name() {
    let app = test_app();
    add_python_310(&app).await;

    let (status, body) = send(
        &app,
        "PATCH",
        "/languages/python_3.10",
        Some(json!({ "version": "3.11" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "update failed: {:?}", body);
    assert_eq!(body["id"], json!("python_3.11"));
    assert_eq!(body["name"], json!("Python"));
    assert_eq!(body["run_script"], json!("python3 main.py"));

    let (status, fetched) = send(&app, "GET", "/languages/python_3.11", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, body);

    let (status, _) = send(&app, "GET", "/languages/python_3.10", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_missing_language_is_not_found() {
    let app = test_app();
    let (status, _) = send(
        &app,
        "PATCH",
        "/languages/rust_1.80",
        Some(json!({ "run_script": "./main" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, list) = send(&app, "GET", "/languages", None).await;
    assert_eq!(list["languages"], json!([]));
}

#[tokio::test]
async fn list_languages_projects_name_and_version() {
    let app = test_app();
    add_python_310(&app).await;

    let (_, bare) = send(&app, "GET", "/languages", None).await;
    assert_eq!(
        bare["languages"],
        json!([{
            "id": "python_3.10",
            "build_script": "",
            "run_script": "python3 main.py",
        }])
    );

    let (_, full) = send(
        &app,
        "GET",
        "/languages?include_name=true&include_version=true",
        None,
    )
    .await;
    assert_eq!(full["languages"][0]["name"], json!("Python"));
    assert_eq!(full["languages"][0]["version"], json!("3.10"));
}

#[tokio::test]
async fn delete_language_is_idempotent() {
    let app = test_app();
    add_python_310(&app).await;

    for _ in 0..2 {
        let (status, body) = send(&app, "DELETE", "/languages/python_3.10", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "success": true }));
    }
}

// ---------------------------------------------------------------------------
// Compares
// ---------------------------------------------------------------------------

#[tokio::test]
async fn compare_lifecycle() {
    let app = test_app();
    let (status, created) = send(
        &app,
        "POST",
        "/compares",
        Some(json!({
            "name": "Float  Tolerance",
            "script_name": "float.py",
            "script": "import sys",
            "run_script": "python3 float.py",
            "run_name": "float",
            "description": "abs diff under 1e-6",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "add compare failed: {:?}", created);
    assert_eq!(created["id"], json!("float_tolerance"));
    assert_eq!(created["build_script"], json!(""));

    let (status, updated) = send(
        &app,
        "PATCH",
        "/compares/float_tolerance",
        Some(json!({ "name": "Float Tolerance Strict", "script": "import math" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], json!("float_tolerance_strict"));
    assert_eq!(updated["script"], json!("import math"));
    assert_eq!(updated["description"], json!("abs diff under 1e-6"));
    assert_eq!(updated["run_name"], json!("float"));

    let (_, list) = send(&app, "GET", "/compares", None).await;
    assert_eq!(list["compares"], json!([updated]));

    let (status, _) = send(&app, "DELETE", "/compares/float_tolerance_strict", None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, "GET", "/compares/float_tolerance_strict", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Failure paths and ambient behavior
// ---------------------------------------------------------------------------

#[tokio::test]
async fn store_write_failure_is_internal_error() {
    let store = Arc::new(InMemoryStore::new());
    let app = build_router(AppState::with_store(store.clone()));
    store.set_fail_writes(true);

    let (status, body) = send(
        &app,
        "POST",
        "/languages",
        Some(json!({ "name": "Go", "version": "1.22", "run_script": "./main" })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["code"], json!("INTERNAL_ERROR"));
}

#[tokio::test]
async fn malformed_deadline_header_is_bad_request() {
    let app = test_app();
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/languages")
                .header("x-request-timeout-ms", "soon")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn generous_deadline_succeeds() {
    let app = test_app();
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/compares")
                .header("x-request-timeout-ms", "5000")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn health_reports_ok() {
    let app = test_app();
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn sqlite_backed_update_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("registry.db");
    let app = build_router(AppState::new(path.to_str().unwrap()).unwrap());

    add_python_310(&app).await;
    let (status, body) = send(
        &app,
        "PATCH",
        "/languages/python_3.10",
        Some(json!({ "name": "CPython", "build_script": "python3 -m py_compile main.py" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "update failed: {:?}", body);
    assert_eq!(body["id"], json!("cpython_3.10"));

    // A fresh state over the same file sees the persisted patch.
    let reopened = build_router(AppState::new(path.to_str().unwrap()).unwrap());
    let (status, fetched) = send(&reopened, "GET", "/languages/cpython_3.10", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, body);
}
