use std::sync::Arc;

use api_rest::{resolve_national_id, router, AppState, RequestContext};
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    routing::get,
    Router,
};
use patient_core::{PatientService, SqlitePatientStore};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    let store = SqlitePatientStore::open_in_memory().expect("in-memory store");
    router(AppState::new(PatientService::new(Arc::new(store))))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn ana(national_id: &str) -> Value {
    json!({
        "nationalId": national_id,
        "firstName": "Ana",
        "lastName": "Martinez",
        "birthDate": "1990-04-12",
        "bloodType": "O+"
    })
}

#[tokio::test]
async fn health_reports_alive() {
    let app = app();
    let (status, body) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
}

#[tokio::test]
async fn create_then_fetch_round_trips() {
    let app = app();

    let (status, created) = send(&app, "POST", "/patients", Some(ana("01234567-8"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["result"]["status"], "SUCCESS");
    assert_eq!(created["result"]["message"], "patient created successfully");
    assert_eq!(created["patient"]["nationalId"], "01234567-8");
    assert!(created["patient"]["id"].is_i64());

    let (status, fetched) = send(&app, "GET", "/patients/01234567-8", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["firstName"], "Ana");
    assert_eq!(fetched["birthDate"], "1990-04-12");
    assert_eq!(fetched["bloodType"], "O+");
    assert!(fetched.get("result").is_none());
}

#[tokio::test]
async fn invalid_create_answers_ok_with_failed_status() {
    let app = app();

    let mut bad_id = ana("123");
    bad_id["nationalId"] = json!("123");
    let (status, body) = send(&app, "POST", "/patients", Some(bad_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["status"], "FAILED");
    assert_eq!(
        body["result"]["message"],
        "invalid national id: must be exactly 10 characters"
    );
    assert!(body["patient"].is_null());

    let mut no_blood = ana("01234567-8");
    no_blood["bloodType"] = json!("");
    let (_, body) = send(&app, "POST", "/patients", Some(no_blood)).await;
    assert_eq!(body["result"]["message"], "blood type is required");
}

#[tokio::test]
async fn duplicate_create_is_failed() {
    let app = app();
    send(&app, "POST", "/patients", Some(ana("01234567-8"))).await;

    let (status, body) = send(&app, "POST", "/patients", Some(ana("01234567-8"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["status"], "FAILED");
    assert_eq!(
        body["result"]["message"],
        "national id '01234567-8' already exists"
    );
}

#[tokio::test]
async fn malformed_body_is_failed_not_4xx() {
    let app = app();
    let request = Request::builder()
        .method("POST")
        .uri("/patients")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(body["result"]["status"], "FAILED");
    assert!(body["result"]["message"]
        .as_str()
        .unwrap()
        .starts_with("invalid request body: "));
}

#[tokio::test]
async fn malformed_update_body_leaves_patient_alone() {
    let app = app();
    send(&app, "POST", "/patients", Some(ana("01234567-8"))).await;

    let request = Request::builder()
        .method("PUT")
        .uri("/patients/01234567-8")
        .header("content-type", "application/json")
        .body(Body::from("{\"firstName\": "))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(body["result"]["status"], "FAILED");
    assert!(body["result"]["message"]
        .as_str()
        .unwrap()
        .starts_with("invalid request body: "));
    assert!(body["patient"].is_null());

    let (_, stored) = send(&app, "GET", "/patients/01234567-8", None).await;
    assert_eq!(stored["firstName"], "Ana");
}

#[tokio::test]
async fn whitespace_names_are_accepted() {
    let app = app();
    let mut padded = ana("01234567-8");
    padded["firstName"] = json!("   ");

    let (_, body) = send(&app, "POST", "/patients", Some(padded)).await;
    assert_eq!(body["result"]["status"], "SUCCESS");
    assert_eq!(body["patient"]["firstName"], "   ");
}

#[tokio::test]
async fn missing_patient_is_not_found_result() {
    let app = app();
    let (status, body) = send(&app, "GET", "/patients/00000000-0", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "status": "NOT_FOUND",
            "message": "patient with national id '00000000-0' not found"
        })
    );
}

#[tokio::test]
async fn list_reports_total() {
    let app = app();

    let (_, empty) = send(&app, "GET", "/patients", None).await;
    assert_eq!(empty, json!({ "patients": [], "total": 0 }));

    send(&app, "POST", "/patients", Some(ana("00000000-1"))).await;
    send(&app, "POST", "/patients", Some(ana("00000000-2"))).await;

    let (status, body) = send(&app, "GET", "/patients", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);
    assert_eq!(body["patients"][0]["nationalId"], "00000000-1");
    assert_eq!(body["patients"][1]["nationalId"], "00000000-2");
}

#[tokio::test]
async fn update_changes_only_present_fields() {
    let app = app();
    send(&app, "POST", "/patients", Some(ana("01234567-8"))).await;

    let (status, body) = send(
        &app,
        "PUT",
        "/patients/01234567-8",
        Some(json!({ "firstName": "Sofia", "nationalId": "99999999-9" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["status"], "SUCCESS");
    assert_eq!(body["patient"]["firstName"], "Sofia");
    assert_eq!(body["patient"]["lastName"], "Martinez");
    assert_eq!(body["patient"]["nationalId"], "01234567-8");

    let (_, missing) = send(&app, "GET", "/patients/99999999-9", None).await;
    assert_eq!(missing["status"], "NOT_FOUND");
}

#[tokio::test]
async fn update_unknown_patient_is_not_found() {
    let app = app();
    let (status, body) = send(
        &app,
        "PUT",
        "/patients/99999999-9",
        Some(json!({ "firstName": "Sofia" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["status"], "NOT_FOUND");
    assert_eq!(
        body["result"]["message"],
        "patient with national id '99999999-9' not found for update"
    );
}

#[tokio::test]
async fn delete_removes_patient() {
    let app = app();
    send(&app, "POST", "/patients", Some(ana("01234567-8"))).await;

    let (status, body) = send(&app, "DELETE", "/patients/01234567-8", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["status"], "SUCCESS");
    assert_eq!(body["result"]["message"], "patient deleted successfully");
    assert_eq!(body["patient"]["nationalId"], "01234567-8");

    let (_, again) = send(&app, "DELETE", "/patients/01234567-8", None).await;
    assert_eq!(again["result"]["status"], "NOT_FOUND");
    assert!(again["patient"].is_null());

    let (_, list) = send(&app, "GET", "/patients", None).await;
    assert_eq!(list["total"], 0);
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = app();
    let (status, body) = send(&app, "GET", "/api-docs/openapi.json", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"].get("/patients/{nationalId}").is_some());
}

#[tokio::test]
async fn context_falls_back_to_raw_path_without_params() {
    let app: Router = Router::new().route(
        "/lookup/by-path/01234567-8",
        get(|ctx: RequestContext| async move {
            axum::Json(json!({
                "params": ctx.path_params.len(),
                "nationalId": resolve_national_id(&ctx),
            }))
        }),
    );

    let (status, body) = send(&app, "GET", "/lookup/by-path/01234567-8", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "params": 0, "nationalId": "01234567-8" }));
}
