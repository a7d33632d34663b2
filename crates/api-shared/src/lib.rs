//! # API Shared
//!
//! Wire types and shared services for the patient registry APIs.
//!
//! Contains:
//! - JSON request/response shapes (`wire` module)
//! - Shared services like `HealthService`
//!
//! Used by `patient-core` (which produces these shapes) and `api-rest` (which
//! serialises them).

pub mod health;
pub mod wire;

pub use health::{HealthRes, HealthService};
pub use wire::*;
