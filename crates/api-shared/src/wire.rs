//! JSON shapes exchanged over the patient endpoints.
//!
//! Field names are camelCase on the wire. Dates are `YYYY-MM-DD`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Inbound patient payload for create and update.
///
/// Every field may be absent. Create requires `nationalId`, `firstName` and
/// `bloodType`; update ignores `nationalId` and skips absent fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatientRequest {
    #[schema(example = "01234567-8")]
    pub national_id: Option<String>,
    #[schema(example = "Ana")]
    pub first_name: Option<String>,
    #[schema(example = "Martinez")]
    pub last_name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    #[schema(example = "O+")]
    pub blood_type: Option<String>,
}

/// Outbound view of a stored patient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatientResponse {
    pub id: Option<i64>,
    pub national_id: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub blood_type: Option<String>,
}

/// Outcome category of a patient operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationStatus {
    Success,
    Failed,
    Error,
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OperationResult {
    pub status: OperationStatus,
    pub message: String,
}

impl OperationResult {
    pub fn new(status: OperationStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(OperationStatus::Success, message)
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self::new(OperationStatus::Failed, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(OperationStatus::Error, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(OperationStatus::NotFound, message)
    }
}

/// Result of create, update and delete.
///
/// `patient` is serialised as `null` when the operation produced no record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PatientOperationEnvelope {
    pub patient: Option<PatientResponse>,
    pub result: OperationResult,
}

impl PatientOperationEnvelope {
    pub fn completed(patient: PatientResponse, result: OperationResult) -> Self {
        Self {
            patient: Some(patient),
            result,
        }
    }

    pub fn without_patient(result: OperationResult) -> Self {
        Self {
            patient: None,
            result,
        }
    }
}

/// Every stored patient, with `total` always equal to `patients.len()`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PatientListEnvelope {
    pub patients: Vec<PatientResponse>,
    pub total: usize,
}

impl PatientListEnvelope {
    pub fn new(patients: Vec<PatientResponse>) -> Self {
        let total = patients.len();
        Self { patients, total }
    }
}

/// Single-patient lookup result.
///
/// A hit is the bare [`PatientResponse`]; a miss is an [`OperationResult`]. The
/// two shapes differ on the wire, unlike the write endpoints which always
/// answer with a [`PatientOperationEnvelope`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum PatientLookup {
    Found(PatientResponse),
    Missing(OperationResult),
}
