//! # API REST
//!
//! REST API for the patient registry.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - National id resolution from the request path
//!
//! Business rules live in `patient-core`; this crate only moves JSON in and out.

#![warn(rust_2018_idioms)]

pub mod handlers;
pub mod resolver;

use axum::{
    routing::get,
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::{
    HealthRes, OperationResult, OperationStatus, PatientListEnvelope, PatientLookup,
    PatientOperationEnvelope, PatientRequest, PatientResponse,
};
pub use patient_core::PatientService;
pub use resolver::{resolve_national_id, RequestContext};

/// Application state shared across REST API handlers
#[derive(Clone)]
pub struct AppState {
    pub patient_service: PatientService,
}

impl AppState {
    pub fn new(patient_service: PatientService) -> Self {
        Self { patient_service }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health,
        handlers::create_patient,
        handlers::list_patients,
        handlers::get_patient,
        handlers::update_patient,
        handlers::delete_patient
    ),
    components(schemas(
        HealthRes,
        PatientRequest,
        PatientResponse,
        OperationStatus,
        OperationResult,
        PatientOperationEnvelope,
        PatientListEnvelope,
        PatientLookup
    ))
)]
pub struct ApiDoc;

/// Builds the REST router with Swagger UI, tracing and permissive CORS.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/patients",
            get(handlers::list_patients).post(handlers::create_patient),
        )
        .route(
            "/patients/:nationalId",
            get(handlers::get_patient)
                .put(handlers::update_patient)
                .delete(handlers::delete_patient),
        )
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
