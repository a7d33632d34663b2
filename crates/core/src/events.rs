//! Operation events emitted by [`PatientService`](crate::PatientService).
//!
//! The service reports what happened through a [`PatientEvents`] collaborator; the events
//! never affect what an operation returns. [`TracingEvents`] is the default sink.

use crate::error::{StoreError, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Read,
    List,
    Update,
    Delete,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Read => "read",
            Self::List => "list",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sink for patient operation events.
///
/// `national_id` is `None` for operations that are not keyed (list) and for create
/// requests that omit it.
pub trait PatientEvents: Send + Sync {
    fn started(&self, op: Operation, national_id: Option<&str>);
    fn rejected(&self, op: Operation, national_id: Option<&str>, reason: &ValidationError);
    fn not_found(&self, op: Operation, national_id: &str);
    fn store_failed(&self, op: Operation, national_id: Option<&str>, error: &StoreError);
    fn succeeded(&self, op: Operation, national_id: Option<&str>);
}

/// Emits every event as a structured `tracing` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEvents;

impl PatientEvents for TracingEvents {
    fn started(&self, op: Operation, national_id: Option<&str>) {
        tracing::debug!(operation = %op, national_id, "patient operation started");
    }

    fn rejected(&self, op: Operation, national_id: Option<&str>, reason: &ValidationError) {
        tracing::info!(operation = %op, national_id, %reason, "patient request rejected");
    }

    fn not_found(&self, op: Operation, national_id: &str) {
        tracing::info!(operation = %op, national_id, "patient not found");
    }

    fn store_failed(&self, op: Operation, national_id: Option<&str>, error: &StoreError) {
        match error {
            StoreError::UniqueViolation { .. } => {
                tracing::warn!(operation = %op, national_id, %error, "duplicate national id");
            }
            _ => {
                tracing::error!(operation = %op, national_id, %error, "patient store failure");
            }
        }
    }

    fn succeeded(&self, op: Operation, national_id: Option<&str>) {
        tracing::info!(operation = %op, national_id, "patient operation succeeded");
    }
}
