//! SQLite-backed patient store.
//!
//! One connection guarded by a mutex. A transaction holds the lock from `BEGIN IMMEDIATE`
//! until commit or rollback, so concurrent service calls are serialised.

use super::{PatientRepository, PatientStore, PatientTransaction};
use crate::error::{StoreError, StoreResult};
use crate::models::Patient;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// Patient table definition. Applied on every open.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS patients (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    national_id TEXT NOT NULL UNIQUE CHECK (length(national_id) = 10),
    first_name TEXT NOT NULL CHECK (length(first_name) BETWEEN 1 AND 12),
    last_name TEXT NOT NULL CHECK (length(last_name) BETWEEN 1 AND 12),
    birth_date TEXT NOT NULL,                      -- YYYY-MM-DD
    blood_type TEXT CHECK (blood_type IS NULL OR length(blood_type) <= 3)
);
"#;

pub struct SqlitePatientStore {
    conn: Mutex<Connection>,
}

impl SqlitePatientStore {
    /// Open database at path, creating if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        Self::with_connection(Connection::open(path)?)
    }

    /// Create in-memory database (for testing).
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl PatientStore for SqlitePatientStore {
    fn begin(&self) -> StoreResult<Box<dyn PatientTransaction + '_>> {
        let conn = self.conn.lock().map_err(|_| StoreError::LockPoisoned)?;
        conn.execute_batch("BEGIN IMMEDIATE")?;
        Ok(Box::new(SqliteTransaction {
            conn,
            finished: false,
        }))
    }
}

struct SqliteTransaction<'a> {
    conn: MutexGuard<'a, Connection>,
    finished: bool,
}

impl PatientTransaction for SqliteTransaction<'_> {
    fn commit(mut self: Box<Self>) -> StoreResult<()> {
        self.conn.execute_batch("COMMIT")?;
        self.finished = true;
        Ok(())
    }
}

impl Drop for SqliteTransaction<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        if let Err(e) = self.conn.execute_batch("ROLLBACK") {
            tracing::warn!(error = %e, "failed to roll back patient transaction");
        }
    }
}

impl PatientRepository for SqliteTransaction<'_> {
    fn find_by_national_id(&self, national_id: &str) -> StoreResult<Option<Patient>> {
        self.conn
            .query_row(
                r#"
                SELECT id, national_id, first_name, last_name, birth_date, blood_type
                FROM patients
                WHERE national_id = ?
                "#,
                [national_id],
                patient_from_row,
            )
            .optional()
            .map_err(Into::into)
    }

    fn find_all(&self) -> StoreResult<Vec<Patient>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, national_id, first_name, last_name, birth_date, blood_type
            FROM patients
            ORDER BY id
            "#,
        )?;

        let rows = stmt.query_map([], patient_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    fn save(&self, patient: &Patient) -> StoreResult<Patient> {
        let Some(id) = patient.id else {
            self.conn
                .execute(
                    r#"
                    INSERT INTO patients (
                        national_id, first_name, last_name, birth_date, blood_type
                    ) VALUES (?1, ?2, ?3, ?4, ?5)
                    "#,
                    params![
                        patient.national_id,
                        patient.first_name,
                        patient.last_name,
                        patient.birth_date,
                        patient.blood_type,
                    ],
                )
                .map_err(|e| classify(e, &patient.national_id))?;

            return Ok(Patient {
                id: Some(self.conn.last_insert_rowid()),
                ..patient.clone()
            });
        };

        let rows_affected = self
            .conn
            .execute(
                r#"
                UPDATE patients SET
                    national_id = ?2,
                    first_name = ?3,
                    last_name = ?4,
                    birth_date = ?5,
                    blood_type = ?6
                WHERE id = ?1
                "#,
                params![
                    id,
                    patient.national_id,
                    patient.first_name,
                    patient.last_name,
                    patient.birth_date,
                    patient.blood_type,
                ],
            )
            .map_err(|e| classify(e, &patient.national_id))?;

        if rows_affected == 0 {
            return Err(StoreError::MissingRow(Some(id)));
        }
        Ok(patient.clone())
    }

    fn delete(&self, patient: &Patient) -> StoreResult<()> {
        let id = patient.id.ok_or(StoreError::MissingRow(None))?;
        let rows_affected = self
            .conn
            .execute("DELETE FROM patients WHERE id = ?", [id])?;
        if rows_affected == 0 {
            return Err(StoreError::MissingRow(Some(id)));
        }
        Ok(())
    }
}

fn patient_from_row(row: &Row<'_>) -> rusqlite::Result<Patient> {
    Ok(Patient {
        id: Some(row.get(0)?),
        national_id: row.get(1)?,
        first_name: row.get(2)?,
        last_name: row.get(3)?,
        birth_date: row.get(4)?,
        blood_type: row.get(5)?,
    })
}

/// Separates duplicate national ids from every other SQLite failure.
fn classify(err: rusqlite::Error, national_id: &str) -> StoreError {
    match &err {
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            StoreError::UniqueViolation {
                national_id: national_id.to_string(),
            }
        }
        _ => StoreError::Sqlite(err),
    }
}
