//! Pre-flight task validation for the TaskDeck client.
//!
//! The same rules apply at create and edit time, so invalid input never
//! round-trips to the backend. Every failure is a recoverable value the
//! controller shows to the user while keeping their input intact.

pub mod validate;

pub use validate::{validate_create, validate_create_at, validate_update};

use thiserror::Error;

/// Errors reported by pre-flight task validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Text is blank after trimming surrounding whitespace.
    #[error("task text cannot be empty")]
    EmptyText,
    /// Text exceeds the maximum length.
    #[error("task text cannot exceed 255 characters")]
    TextTooLong,
    /// No expected completion date was supplied.
    #[error("an expected completion date is required")]
    MissingExpectedDate,
    /// The supplied expected date does not parse as `YYYY-MM-DD`.
    #[error("not a valid date (YYYY-MM-DD): {0}")]
    InvalidDate(String),
    /// At creation, the expected date lies before today.
    #[error("expected date cannot be earlier than today")]
    ExpectedDateTooEarly,
    /// At edit, the expected date lies before the task's creation date.
    #[error("expected date cannot be earlier than the creation date")]
    ExpectedDateBeforeCreation,
    /// The status code is outside the enumeration.
    #[error("invalid task status code: {0}")]
    InvalidStatus(u8),
}
