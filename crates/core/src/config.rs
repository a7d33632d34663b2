//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into core services.
//! Request handling never reads process-wide environment variables.

use crate::constants::{DEFAULT_DATABASE_PATH, DEFAULT_REST_ADDR, IN_MEMORY_DATABASE};
use crate::repositories::sqlite::SqlitePatientStore;
use crate::{PatientError, PatientResult};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Where the SQLite database lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DatabaseLocation {
    InMemory,
    File(PathBuf),
}

impl DatabaseLocation {
    /// Parse a database location from an optional `PATIENT_DB_PATH` value.
    ///
    /// `None` or whitespace selects [`DEFAULT_DATABASE_PATH`]; `:memory:` selects an
    /// in-memory database.
    pub fn from_env_value(value: Option<String>) -> Self {
        let value = value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        match value.as_deref() {
            None => Self::File(PathBuf::from(DEFAULT_DATABASE_PATH)),
            Some(IN_MEMORY_DATABASE) => Self::InMemory,
            Some(path) => Self::File(PathBuf::from(path)),
        }
    }
}

impl std::fmt::Display for DatabaseLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InMemory => f.write_str(IN_MEMORY_DATABASE),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    database: DatabaseLocation,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `PatientError::InvalidInput` if a file database path points at an existing
    /// directory.
    pub fn new(database: DatabaseLocation) -> PatientResult<Self> {
        if let DatabaseLocation::File(path) = &database {
            if path.is_dir() {
                return Err(PatientError::InvalidInput(format!(
                    "database path is a directory: {}",
                    path.display()
                )));
            }
        }

        Ok(Self { database })
    }

    pub fn database(&self) -> &DatabaseLocation {
        &self.database
    }

    /// Open the configured store, creating the schema if needed.
    pub fn open_store(&self) -> PatientResult<SqlitePatientStore> {
        let store = match &self.database {
            DatabaseLocation::InMemory => SqlitePatientStore::open_in_memory()?,
            DatabaseLocation::File(path) => SqlitePatientStore::open(path)?,
        };
        Ok(store)
    }
}

/// Parse the REST bind address from an optional `PATIENT_REST_ADDR` value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_REST_ADDR`].
pub fn rest_addr_from_env_value(value: Option<String>) -> PatientResult<SocketAddr> {
    let raw = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_REST_ADDR.to_string());

    raw.parse::<SocketAddr>()
        .map_err(|e| PatientError::InvalidInput(format!("invalid REST address '{raw}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn database_location_defaults_to_file() {
        assert_eq!(
            DatabaseLocation::from_env_value(None),
            DatabaseLocation::File(PathBuf::from(DEFAULT_DATABASE_PATH))
        );
        assert_eq!(
            DatabaseLocation::from_env_value(Some("   ".into())),
            DatabaseLocation::File(PathBuf::from(DEFAULT_DATABASE_PATH))
        );
    }

    #[test]
    fn database_location_recognises_memory() {
        assert_eq!(
            DatabaseLocation::from_env_value(Some(":memory:".into())),
            DatabaseLocation::InMemory
        );
    }

    #[test]
    fn config_rejects_directory_as_database() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let err = CoreConfig::new(DatabaseLocation::File(temp_dir.path().to_path_buf()))
            .expect_err("a directory is not a database file");
        assert!(matches!(err, PatientError::InvalidInput(_)));
    }

    #[test]
    fn config_opens_file_store() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("registry.db");
        let cfg = CoreConfig::new(DatabaseLocation::File(db_path.clone())).unwrap();

        assert_eq!(cfg.database(), &DatabaseLocation::File(db_path.clone()));
        cfg.open_store().expect("store should open");
        assert!(db_path.is_file());
    }

    #[test]
    fn rest_addr_defaults_and_validates() {
        let addr = rest_addr_from_env_value(None).unwrap();
        assert_eq!(addr.port(), 3000);

        let addr = rest_addr_from_env_value(Some("127.0.0.1:8081".into())).unwrap();
        assert_eq!(addr.port(), 8081);

        assert!(rest_addr_from_env_value(Some("not-an-address".into())).is_err());
    }
}
