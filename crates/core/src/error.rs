/// Reasons a create request is rejected before touching the store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid national id: must be exactly 10 characters")]
    InvalidNationalId,
    #[error("first name must not be null or empty")]
    MissingFirstName,
    #[error("blood type is required")]
    MissingBloodType,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("national id '{national_id}' already exists")]
    UniqueViolation { national_id: String },
    #[error("patient row {0:?} does not exist")]
    MissingRow(Option<i64>),
    #[error("store lock poisoned")]
    LockPoisoned,
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[derive(Debug, thiserror::Error)]
pub enum PatientError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

pub type PatientResult<T> = std::result::Result<T, PatientError>;
