//! Constants used throughout the core crate.

/// Database file used when `PATIENT_DB_PATH` is not set.
pub const DEFAULT_DATABASE_PATH: &str = "patients.db";

/// Database path value that selects a private in-memory database.
pub const IN_MEMORY_DATABASE: &str = ":memory:";

/// Address the REST server binds when `PATIENT_REST_ADDR` is not set.
pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:3000";
