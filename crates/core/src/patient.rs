//! Patient service.
//!
//! One method per operation. Every method recovers its own failures and answers with a
//! result envelope, so callers never see a `Result`.

use crate::error::StoreError;
use crate::events::{Operation, PatientEvents, TracingEvents};
use crate::mapping::{apply_update, new_entity, to_response};
use crate::repositories::{with_transaction, PatientRepository, PatientStore};
use crate::validation::validate_create;
use api_shared::{
    OperationResult, PatientListEnvelope, PatientLookup, PatientOperationEnvelope, PatientRequest,
};
use std::sync::Arc;

/// Pure patient data operations - no API concerns
#[derive(Clone)]
pub struct PatientService {
    store: Arc<dyn PatientStore>,
    events: Arc<dyn PatientEvents>,
}

impl PatientService {
    /// Creates a service that reports events through `tracing`.
    pub fn new(store: Arc<dyn PatientStore>) -> Self {
        Self::with_events(store, Arc::new(TracingEvents))
    }

    pub fn with_events(store: Arc<dyn PatientStore>, events: Arc<dyn PatientEvents>) -> Self {
        Self { store, events }
    }

    /// Validates and stores a new patient.
    ///
    /// # Returns
    ///
    /// - `SUCCESS` with the stored patient
    /// - `FAILED` if validation fails or the national id is already registered
    /// - `ERROR` for any other store failure
    pub fn create_patient(&self, req: PatientRequest) -> PatientOperationEnvelope {
        let op = Operation::Create;
        let national_id = req.national_id.clone();
        let key = national_id.as_deref();
        self.events.started(op, key);

        if let Err(reason) = validate_create(&req) {
            self.events.rejected(op, key, &reason);
            return PatientOperationEnvelope::without_patient(OperationResult::failed(
                reason.to_string(),
            ));
        }

        let patient = new_entity(req);
        match with_transaction(self.store.as_ref(), |tx| tx.save(&patient)) {
            Ok(saved) => {
                self.events.succeeded(op, key);
                PatientOperationEnvelope::completed(
                    to_response(&saved),
                    OperationResult::success("patient created successfully"),
                )
            }
            Err(e @ StoreError::UniqueViolation { .. }) => {
                self.events.store_failed(op, key, &e);
                PatientOperationEnvelope::without_patient(OperationResult::failed(format!(
                    "national id '{}' already exists",
                    patient.national_id
                )))
            }
            Err(e) => {
                self.events.store_failed(op, key, &e);
                PatientOperationEnvelope::without_patient(OperationResult::error(
                    "unexpected error creating patient",
                ))
            }
        }
    }

    /// Looks up one patient.
    ///
    /// A hit is answered with the bare patient, not an envelope.
    pub fn get_patient_by_national_id(&self, national_id: &str) -> PatientLookup {
        let op = Operation::Read;
        self.events.started(op, Some(national_id));

        match with_transaction(self.store.as_ref(), |tx| {
            tx.find_by_national_id(national_id)
        }) {
            Ok(Some(patient)) => {
                self.events.succeeded(op, Some(national_id));
                PatientLookup::Found(to_response(&patient))
            }
            Ok(None) => {
                self.events.not_found(op, national_id);
                PatientLookup::Missing(OperationResult::not_found(format!(
                    "patient with national id '{national_id}' not found"
                )))
            }
            Err(e) => {
                self.events.store_failed(op, Some(national_id), &e);
                PatientLookup::Missing(OperationResult::error("error retrieving patient"))
            }
        }
    }

    /// Lists every patient in store order.
    ///
    /// A store failure is reported through the event sink and answered with an empty list.
    pub fn get_all_patients(&self) -> PatientListEnvelope {
        let op = Operation::List;
        self.events.started(op, None);

        match with_transaction(self.store.as_ref(), |tx| tx.find_all()) {
            Ok(patients) => {
                self.events.succeeded(op, None);
                PatientListEnvelope::new(patients.iter().map(to_response).collect())
            }
            Err(e) => {
                self.events.store_failed(op, None, &e);
                PatientListEnvelope::default()
            }
        }
    }

    /// Applies a partial update to the patient holding `national_id`.
    ///
    /// The lookup and the write share one transaction.
    pub fn update_patient(&self, national_id: &str, req: PatientRequest) -> PatientOperationEnvelope {
        let op = Operation::Update;
        self.events.started(op, Some(national_id));

        let outcome = with_transaction(self.store.as_ref(), |tx| {
            let Some(mut existing) = tx.find_by_national_id(national_id)? else {
                return Ok(None);
            };
            apply_update(&mut existing, req);
            tx.save(&existing).map(Some)
        });

        match outcome {
            Ok(Some(updated)) => {
                self.events.succeeded(op, Some(national_id));
                PatientOperationEnvelope::completed(
                    to_response(&updated),
                    OperationResult::success("patient updated successfully"),
                )
            }
            Ok(None) => {
                self.events.not_found(op, national_id);
                PatientOperationEnvelope::without_patient(OperationResult::not_found(format!(
                    "patient with national id '{national_id}' not found for update"
                )))
            }
            Err(e) => {
                self.events.store_failed(op, Some(national_id), &e);
                PatientOperationEnvelope::without_patient(OperationResult::error(
                    "error updating patient",
                ))
            }
        }
    }

    /// Deletes the patient holding `national_id`.
    ///
    /// On success the envelope carries the patient as it was before deletion.
    pub fn delete_patient(&self, national_id: &str) -> PatientOperationEnvelope {
        let op = Operation::Delete;
        self.events.started(op, Some(national_id));

        let outcome = with_transaction(self.store.as_ref(), |tx| {
            let Some(existing) = tx.find_by_national_id(national_id)? else {
                return Ok(None);
            };
            tx.delete(&existing)?;
            Ok(Some(existing))
        });

        match outcome {
            Ok(Some(deleted)) => {
                self.events.succeeded(op, Some(national_id));
                PatientOperationEnvelope::completed(
                    to_response(&deleted),
                    OperationResult::success("patient deleted successfully"),
                )
            }
            Ok(None) => {
                self.events.not_found(op, national_id);
                PatientOperationEnvelope::without_patient(OperationResult::not_found(format!(
                    "patient with national id '{national_id}' not found for delete"
                )))
            }
            Err(e) => {
                self.events.store_failed(op, Some(national_id), &e);
                PatientOperationEnvelope::without_patient(OperationResult::error(
                    "error deleting patient",
                ))
            }
        }
    }
}
