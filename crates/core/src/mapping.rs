//! Conversions between wire DTOs and the stored entity.

use crate::models::Patient;
use api_shared::{PatientRequest, PatientResponse};

pub fn to_response(patient: &Patient) -> PatientResponse {
    PatientResponse {
        id: patient.id,
        national_id: patient.national_id.clone(),
        first_name: patient.first_name.clone(),
        last_name: patient.last_name.clone(),
        birth_date: patient.birth_date,
        blood_type: patient.blood_type.clone(),
    }
}

/// Builds an unsaved entity from a create request that passed validation.
pub fn new_entity(req: PatientRequest) -> Patient {
    Patient {
        id: None,
        national_id: req.national_id.unwrap_or_default(),
        first_name: req.first_name.unwrap_or_default(),
        last_name: req.last_name,
        birth_date: req.birth_date,
        blood_type: req.blood_type,
    }
}

/// Applies an update request to an existing entity.
///
/// Absent fields leave the stored value alone. `blood_type` is also left alone when
/// present but empty. `id` and `national_id` are never modified.
pub fn apply_update(existing: &mut Patient, req: PatientRequest) {
    if let Some(first_name) = req.first_name {
        existing.first_name = first_name;
    }
    if let Some(last_name) = req.last_name {
        existing.last_name = Some(last_name);
    }
    if let Some(birth_date) = req.birth_date {
        existing.birth_date = Some(birth_date);
    }
    if let Some(blood_type) = req.blood_type.filter(|b| !b.is_empty()) {
        existing.blood_type = Some(blood_type);
    }
}
