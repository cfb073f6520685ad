//! Validation rules for the create and edit flows.
//!
//! Date comparisons are day-granularity and inclusive: an expected date
//! equal to today (at create) or equal to the creation date (at edit) is
//! accepted, only strictly earlier dates are rejected. Comparing dates
//! rather than timestamps keeps same-day creation working regardless of
//! the local time of day.

use chrono::{Local, NaiveDate};

use taskdeck_proto::status::TaskStatus;
use taskdeck_proto::task::{MAX_TASK_TEXT_LENGTH, NewTask, Task};

use super::ValidationError;

/// Validates create-form input and builds the create payload.
///
/// New tasks start in [`TaskStatus::InProgress`] with `created_date` set
/// to today.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyText`], [`ValidationError::TextTooLong`],
/// [`ValidationError::MissingExpectedDate`], [`ValidationError::InvalidDate`],
/// or [`ValidationError::ExpectedDateTooEarly`].
pub fn validate_create(text: &str, expected_date: &str) -> Result<NewTask, ValidationError> {
    validate_create_at(text, expected_date, Local::now().date_naive())
}

/// Create validation against an explicit "today", for deterministic tests.
///
/// # Errors
///
/// Same as [`validate_create`].
pub fn validate_create_at(
    text: &str,
    expected_date: &str,
    today: NaiveDate,
) -> Result<NewTask, ValidationError> {
    let text = validate_text(text)?;
    let expected = parse_expected_date(expected_date)?;
    if expected < today {
        return Err(ValidationError::ExpectedDateTooEarly);
    }

    Ok(NewTask {
        text,
        created_date: today,
        expected_date: expected,
        status: TaskStatus::InProgress,
    })
}

/// Validates edit input against an existing task and builds the update
/// payload.
///
/// `status_code` comes from the status selector; the id and creation
/// date of `existing` are carried over untouched.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyText`], [`ValidationError::TextTooLong`],
/// [`ValidationError::MissingExpectedDate`], [`ValidationError::InvalidDate`],
/// [`ValidationError::ExpectedDateBeforeCreation`], or
/// [`ValidationError::InvalidStatus`].
pub fn validate_update(
    existing: &Task,
    text: &str,
    expected_date: &str,
    status_code: u8,
) -> Result<Task, ValidationError> {
    let text = validate_text(text)?;
    let expected = parse_expected_date(expected_date)?;
    if expected < existing.created_date {
        return Err(ValidationError::ExpectedDateBeforeCreation);
    }
    let status =
        TaskStatus::from_code(status_code).ok_or(ValidationError::InvalidStatus(status_code))?;

    Ok(Task {
        id: existing.id,
        text,
        created_date: existing.created_date,
        expected_date: expected,
        status,
    })
}

/// Trims and length-checks task text.
fn validate_text(text: &str) -> Result<String, ValidationError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ValidationError::EmptyText);
    }
    if text.chars().count() > MAX_TASK_TEXT_LENGTH {
        return Err(ValidationError::TextTooLong);
    }
    Ok(text.to_string())
}

/// Parses the expected-date input; empty means missing, anything that is
/// not `YYYY-MM-DD` is invalid.
fn parse_expected_date(input: &str) -> Result<NaiveDate, ValidationError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ValidationError::MissingExpectedDate);
    }
    input
        .parse()
        .map_err(|_| ValidationError::InvalidDate(input.to_string()))
}
