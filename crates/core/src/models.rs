use chrono::NaiveDate;

/// A stored patient row.
///
/// `id` is assigned by the store on first save and never changes afterwards.
/// `last_name` and `birth_date` are optional here because requests may omit them;
/// the store rejects a row that lacks either.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patient {
    pub id: Option<i64>,
    pub national_id: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub blood_type: Option<String>,
}
