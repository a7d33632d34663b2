//! # Patient Core
//!
//! Core business logic for the patient registry.
//!
//! This crate contains the data operations behind the patient endpoints:
//! - Create-request validation and DTO/entity mapping
//! - The [`PatientService`] operations and their result envelopes
//! - The store seam ([`PatientStore`]) and its SQLite implementation
//!
//! **No API concerns**: HTTP routing and JSON transport belong in `api-rest`.

pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod mapping;
pub mod models;
pub mod patient;
pub mod repositories;
pub mod validation;

pub use api_shared as wire;

pub use config::{rest_addr_from_env_value, CoreConfig, DatabaseLocation};
pub use constants::{DEFAULT_DATABASE_PATH, DEFAULT_REST_ADDR};
pub use error::{PatientError, PatientResult, StoreError, StoreResult, ValidationError};
pub use events::{Operation, PatientEvents, TracingEvents};
pub use models::Patient;
pub use patient::PatientService;
pub use patient_types::{NationalId, TextError};
pub use repositories::sqlite::SqlitePatientStore;
pub use repositories::{with_transaction, PatientRepository, PatientStore, PatientTransaction};
