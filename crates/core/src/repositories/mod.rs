//! Patient persistence.
//!
//! The service only sees the store through these traits. Each service call opens one
//! transaction with [`PatientStore::begin`], performs its reads and writes through the
//! returned [`PatientTransaction`], and commits. Dropping a transaction without committing
//! rolls it back.

pub mod sqlite;

use crate::error::StoreResult;
use crate::models::Patient;

/// Row-level operations on patients.
pub trait PatientRepository {
    fn find_by_national_id(&self, national_id: &str) -> StoreResult<Option<Patient>>;

    /// All rows in store iteration order.
    fn find_all(&self) -> StoreResult<Vec<Patient>>;

    /// Inserts when `patient.id` is `None`, otherwise updates the row with that id.
    ///
    /// Returns the stored row, with `id` populated.
    ///
    /// # Errors
    ///
    /// `StoreError::UniqueViolation` if another row already holds the national id.
    fn save(&self, patient: &Patient) -> StoreResult<Patient>;

    fn delete(&self, patient: &Patient) -> StoreResult<()>;
}

pub trait PatientTransaction: PatientRepository {
    fn commit(self: Box<Self>) -> StoreResult<()>;
}

pub trait PatientStore: Send + Sync {
    fn begin(&self) -> StoreResult<Box<dyn PatientTransaction + '_>>;
}

/// Runs `work` inside a single transaction, committing only if it succeeds.
pub fn with_transaction<T>(
    store: &dyn PatientStore,
    work: impl FnOnce(&dyn PatientTransaction) -> StoreResult<T>,
) -> StoreResult<T> {
    let tx = store.begin()?;
    let out = work(tx.as_ref())?;
    tx.commit()?;
    Ok(out)
}
