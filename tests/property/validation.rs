//! Property-based tests for the pre-flight validator and status codes.
//!
//! Uses proptest to verify:
//! 1. Any non-blank text of at most 255 chars with a non-past date passes
//!    create validation; length and date violations always fail with the
//!    matching error.
//! 2. Update validation preserves id and creation date and rejects every
//!    out-of-range status code.
//! 3. Status codes round-trip and the enumeration is closed.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use chrono::NaiveDate;
use proptest::prelude::*;

use taskdeck::tasks::{ValidationError, validate_create_at, validate_update};
use taskdeck_proto::status::TaskStatus;
use taskdeck_proto::task::{MAX_TASK_TEXT_LENGTH, Task, TaskId};

// --- Strategies ---

/// Strategy for a day somewhere in the 1990–2090 range.
fn arb_day() -> impl Strategy<Value = NaiveDate> {
    (1990i32..2090, 1u32..=12, 1u32..=28).prop_map(|(y, m, d)| {
        NaiveDate::from_ymd_opt(y, m, d).expect("day <= 28 is valid in every month")
    })
}

/// Strategy for text that stays non-blank and within bounds after trimming.
fn arb_valid_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9]{1,255}"
}

/// Strategy for whitespace-only text.
fn arb_blank_text() -> impl Strategy<Value = String> {
    prop::collection::vec(prop_oneof![Just(' '), Just('\t')], 0..32)
        .prop_map(|chars| chars.into_iter().collect())
}

/// Strategy for an existing task to edit.
fn arb_existing_task() -> impl Strategy<Value = Task> {
    (any::<i64>(), arb_valid_text(), arb_day(), 0u64..365).prop_map(
        |(id, text, created, offset)| Task {
            id: TaskId::from_i64(id),
            text,
            created_date: created + chrono::Days::new(offset),
            expected_date: created + chrono::Days::new(offset),
            status: TaskStatus::InProgress,
        },
    )
}

// --- Property tests ---

proptest! {
    /// Valid text with a non-past expected date always passes create
    /// validation, producing an in-progress task created today.
    #[test]
    fn create_accepts_valid_input(
        text in arb_valid_text(),
        today in arb_day(),
        offset in 0u64..365,
    ) {
        let expected = today + chrono::Days::new(offset);
        let new = validate_create_at(&text, &expected.to_string(), today)
            .expect("valid input must pass");
        prop_assert_eq!(new.text, text.trim());
        prop_assert_eq!(new.created_date, today);
        prop_assert_eq!(new.expected_date, expected);
        prop_assert_eq!(new.status, TaskStatus::InProgress);
    }

    /// Surrounding whitespace never changes the outcome for valid text.
    #[test]
    fn create_trims_padding(
        text in arb_valid_text(),
        pad_left in 0usize..8,
        pad_right in 0usize..8,
        today in arb_day(),
    ) {
        let padded = format!("{}{}{}", " ".repeat(pad_left), text, " ".repeat(pad_right));
        let new = validate_create_at(&padded, &today.to_string(), today)
            .expect("padded valid input must pass");
        prop_assert_eq!(new.text, text);
    }

    /// Whitespace-only text is always rejected as empty.
    #[test]
    fn create_rejects_blank_text(text in arb_blank_text(), today in arb_day()) {
        let err = validate_create_at(&text, &today.to_string(), today).unwrap_err();
        prop_assert_eq!(err, ValidationError::EmptyText);
    }

    /// Any text longer than the limit is rejected, regardless of content.
    #[test]
    fn create_rejects_overlong_text(extra in 1usize..256, today in arb_day()) {
        let text = "x".repeat(MAX_TASK_TEXT_LENGTH + extra);
        let err = validate_create_at(&text, &today.to_string(), today).unwrap_err();
        prop_assert_eq!(err, ValidationError::TextTooLong);
    }

    /// Any strictly-past expected date is rejected at create time.
    #[test]
    fn create_rejects_past_dates(
        text in arb_valid_text(),
        today in arb_day(),
        back in 1u64..365,
    ) {
        let expected = today - chrono::Days::new(back);
        let err = validate_create_at(&text, &expected.to_string(), today).unwrap_err();
        prop_assert_eq!(err, ValidationError::ExpectedDateTooEarly);
    }

    /// Update keeps the id and creation date whatever else changes.
    #[test]
    fn update_preserves_identity(
        existing in arb_existing_task(),
        text in arb_valid_text(),
        offset in 0u64..365,
        code in 0u8..=3,
    ) {
        let expected = existing.created_date + chrono::Days::new(offset);
        let updated = validate_update(&existing, &text, &expected.to_string(), code)
            .expect("valid update must pass");
        prop_assert_eq!(updated.id, existing.id);
        prop_assert_eq!(updated.created_date, existing.created_date);
        prop_assert_eq!(updated.status.code(), code);
    }

    /// Any expected date before the creation date is rejected at edit time.
    #[test]
    fn update_rejects_dates_before_creation(
        existing in arb_existing_task(),
        text in arb_valid_text(),
        back in 1u64..365,
    ) {
        let expected = existing.created_date - chrono::Days::new(back);
        let err = validate_update(&existing, &text, &expected.to_string(), 0).unwrap_err();
        prop_assert_eq!(err, ValidationError::ExpectedDateBeforeCreation);
    }

    /// Every code outside 0..=3 is rejected as an invalid status.
    #[test]
    fn update_rejects_unknown_status_codes(
        existing in arb_existing_task(),
        text in arb_valid_text(),
        code in 4u8..,
    ) {
        let expected = existing.created_date.to_string();
        let err = validate_update(&existing, &text, &expected, code).unwrap_err();
        prop_assert_eq!(err, ValidationError::InvalidStatus(code));
    }

    /// Status codes round-trip through the wire encoding.
    #[test]
    fn status_codes_round_trip(code in 0u8..=3) {
        let status = TaskStatus::from_code(code).expect("codes 0..=3 are valid");
        prop_assert_eq!(status.code(), code);
    }

    /// The status enumeration is closed: nothing above 3 maps to a status.
    #[test]
    fn status_enumeration_is_closed(code in 4u8..) {
        prop_assert_eq!(TaskStatus::from_code(code), None);
    }

    /// Garbage date strings are reported as invalid, never accepted and
    /// never conflated with the missing-date error.
    #[test]
    fn create_reports_malformed_dates(
        text in arb_valid_text(),
        garbage in "[a-z]{1,10}",
        today in arb_day(),
    ) {
        let err = validate_create_at(&text, &garbage, today).unwrap_err();
        prop_assert_eq!(err, ValidationError::InvalidDate(garbage));
    }
}
