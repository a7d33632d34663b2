//! HTTP handlers for the patient endpoints.
//!
//! Every handler answers `200 OK`; the envelope's `result.status` carries the outcome.
//! Service calls block on SQLite, so they run on the blocking thread pool.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::resolver::{resolve_national_id, RequestContext};
use crate::AppState;
use api_shared::{
    HealthRes, HealthService, OperationResult, PatientListEnvelope, PatientLookup,
    PatientOperationEnvelope, PatientRequest,
};

const MISSING_NATIONAL_ID: &str = "national id missing from request path";

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthRes)
    )
)]
#[axum::debug_handler]
pub async fn health() -> Json<HealthRes> {
    Json(HealthService::check_health())
}

/// Create a patient
#[utoipa::path(
    post,
    path = "/patients",
    request_body = PatientRequest,
    responses(
        (status = 200, description = "Outcome of the create request", body = PatientOperationEnvelope)
    )
)]
#[axum::debug_handler]
pub async fn create_patient(
    State(state): State<AppState>,
    payload: Result<Json<PatientRequest>, JsonRejection>,
) -> Json<PatientOperationEnvelope> {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return Json(invalid_body(&rejection)),
    };
    let service = state.patient_service;
    let envelope = blocking(move || service.create_patient(req))
        .await
        .unwrap_or_else(|| task_error("unexpected error creating patient"));
    Json(envelope)
}

/// List all patients
#[utoipa::path(
    get,
    path = "/patients",
    responses(
        (status = 200, description = "All stored patients", body = PatientListEnvelope)
    )
)]
#[axum::debug_handler]
pub async fn list_patients(State(state): State<AppState>) -> Json<PatientListEnvelope> {
    let service = state.patient_service;
    let envelope = blocking(move || service.get_all_patients())
        .await
        .unwrap_or_default();
    Json(envelope)
}

/// Fetch one patient by national id
///
/// Answers with the bare patient when found, otherwise with a result object.
#[utoipa::path(
    get,
    path = "/patients/{nationalId}",
    params(
        ("nationalId" = String, Path, description = "Ten character national id")
    ),
    responses(
        (status = 200, description = "The patient, or a NOT_FOUND/ERROR result", body = PatientLookup)
    )
)]
#[axum::debug_handler]
pub async fn get_patient(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Json<PatientLookup> {
    let Some(national_id) = resolve_national_id(&ctx) else {
        return Json(PatientLookup::Missing(OperationResult::failed(
            MISSING_NATIONAL_ID,
        )));
    };
    let service = state.patient_service;
    let lookup = blocking(move || service.get_patient_by_national_id(&national_id))
        .await
        .unwrap_or_else(|| {
            PatientLookup::Missing(OperationResult::error("error retrieving patient"))
        });
    Json(lookup)
}

/// Update a patient by national id
#[utoipa::path(
    put,
    path = "/patients/{nationalId}",
    params(
        ("nationalId" = String, Path, description = "Ten character national id")
    ),
    request_body = PatientRequest,
    responses(
        (status = 200, description = "Outcome of the update request", body = PatientOperationEnvelope)
    )
)]
#[axum::debug_handler]
pub async fn update_patient(
    State(state): State<AppState>,
    ctx: RequestContext,
    payload: Result<Json<PatientRequest>, JsonRejection>,
) -> Json<PatientOperationEnvelope> {
    let Some(national_id) = resolve_national_id(&ctx) else {
        return Json(missing_national_id());
    };
    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return Json(invalid_body(&rejection)),
    };
    let service = state.patient_service;
    let envelope = blocking(move || service.update_patient(&national_id, req))
        .await
        .unwrap_or_else(|| task_error("error updating patient"));
    Json(envelope)
}

/// Delete a patient by national id
#[utoipa::path(
    delete,
    path = "/patients/{nationalId}",
    params(
        ("nationalId" = String, Path, description = "Ten character national id")
    ),
    responses(
        (status = 200, description = "Outcome of the delete request", body = PatientOperationEnvelope)
    )
)]
#[axum::debug_handler]
pub async fn delete_patient(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Json<PatientOperationEnvelope> {
    let Some(national_id) = resolve_national_id(&ctx) else {
        return Json(missing_national_id());
    };
    let service = state.patient_service;
    let envelope = blocking(move || service.delete_patient(&national_id))
        .await
        .unwrap_or_else(|| task_error("error deleting patient"));
    Json(envelope)
}

/// Runs a service call on the blocking pool. `None` if the task panicked or was cancelled.
async fn blocking<T, F>(work: F) -> Option<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(work).await {
        Ok(out) => Some(out),
        Err(err) => {
            tracing::error!(error = %err, "patient service task join error");
            None
        }
    }
}

fn task_error(message: &str) -> PatientOperationEnvelope {
    PatientOperationEnvelope::without_patient(OperationResult::error(message))
}

fn invalid_body(rejection: &JsonRejection) -> PatientOperationEnvelope {
    let detail = rejection.body_text();
    tracing::info!(%detail, "rejected request body");
    PatientOperationEnvelope::without_patient(OperationResult::failed(format!(
        "invalid request body: {detail}"
    )))
}

fn missing_national_id() -> PatientOperationEnvelope {
    PatientOperationEnvelope::without_patient(OperationResult::failed(MISSING_NATIONAL_ID))
}
