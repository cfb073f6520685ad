//! Task entity and payload types for the REST wire format.
//!
//! Field names are camelCase on the wire and dates are day-granularity
//! ISO strings (`YYYY-MM-DD`), matching what the backend stores and
//! serves.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::status::TaskStatus;

/// Maximum allowed task text length in characters, after trimming.
pub const MAX_TASK_TEXT_LENGTH: usize = 255;

/// Server-assigned task identifier.
///
/// The backend issues these on creation; the client never fabricates one
/// and treats the value as an opaque handle.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TaskId(i64);

impl TaskId {
    /// Wraps a raw identifier, as assigned by the backend.
    #[must_use]
    pub const fn from_i64(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier value.
    #[must_use]
    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A persisted task as the backend reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Server-assigned identifier, immutable once created.
    pub id: TaskId,
    /// Task text, 1–255 characters after trimming.
    pub text: String,
    /// Day the task was created; set once, never edited.
    pub created_date: NaiveDate,
    /// Planned completion day; never earlier than `created_date`.
    pub expected_date: NaiveDate,
    /// Lifecycle status.
    pub status: TaskStatus,
}

/// Payload for creating a task; the server assigns the id and echoes the
/// rest back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    /// Task text, already trimmed and length-checked by the caller.
    pub text: String,
    /// Creation day (today, from the creating client's point of view).
    pub created_date: NaiveDate,
    /// Planned completion day.
    pub expected_date: NaiveDate,
    /// Initial status; new tasks start in [`TaskStatus::InProgress`].
    pub status: TaskStatus,
}
