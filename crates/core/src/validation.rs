//! Input validation for create requests.

use crate::error::ValidationError;
use api_shared::PatientRequest;
use patient_types::NationalId;

/// Checks a create request before it is mapped to an entity.
///
/// Checks run in order (national id, first name, blood type) and the first failure
/// is returned. Text fields are checked as given, without trimming.
///
/// # Errors
///
/// - `InvalidNationalId` if the national id is missing or not exactly 10 characters
/// - `MissingFirstName` if the first name is missing or empty
/// - `MissingBloodType` if the blood type is missing or empty
pub fn validate_create(req: &PatientRequest) -> Result<(), ValidationError> {
    NationalId::parse(req.national_id.as_deref().unwrap_or_default())
        .map_err(|_| ValidationError::InvalidNationalId)?;

    if is_missing(req.first_name.as_deref()) {
        return Err(ValidationError::MissingFirstName);
    }

    if is_missing(req.blood_type.as_deref()) {
        return Err(ValidationError::MissingBloodType);
    }

    Ok(())
}

fn is_missing(value: Option<&str>) -> bool {
    value.map_or(true, str::is_empty)
}
