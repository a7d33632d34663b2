//! Validated identifier types shared across the patient registry crates.

/// Number of characters in a national identity document number.
pub const NATIONAL_ID_LEN: usize = 10;

/// Errors that can occur when parsing validated text types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TextError {
    /// The input text was empty
    #[error("Text cannot be empty")]
    Empty,
    /// The input had the wrong number of characters
    #[error("expected exactly {expected} characters, got {actual}")]
    WrongLength { expected: usize, actual: usize },
}

/// A national identity document number (the patient's business key).
///
/// Holds exactly [`NATIONAL_ID_LEN`] characters, counted as Unicode scalar values.
/// The input is not trimmed: surrounding whitespace counts towards the length.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NationalId(String);

impl NationalId {
    /// Parses a national id, rejecting empty input and any length other than ten.
    pub fn parse(input: impl AsRef<str>) -> Result<Self, TextError> {
        let raw = input.as_ref();
        if raw.is_empty() {
            return Err(TextError::Empty);
        }

        let actual = raw.chars().count();
        if actual != NATIONAL_ID_LEN {
            return Err(TextError::WrongLength {
                expected: NATIONAL_ID_LEN,
                actual,
            });
        }

        Ok(Self(raw.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
