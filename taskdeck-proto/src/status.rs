//! Task status enumeration and its wire encoding.
//!
//! Statuses travel as integer codes (`0..=3`). The earliest backend
//! revision stored statuses as Russian string tags instead; those are
//! still accepted on input through [`TaskStatus::from_legacy_tag`] so old
//! payloads keep deserializing, but the client only ever produces integer
//! codes. That method and the [`Deserialize`] impl are the single
//! translation boundary for the legacy form.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Status of a task in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskStatus {
    /// Task is being worked on (the state new tasks start in).
    InProgress,
    /// Task is finished.
    Done,
    /// Task is under verification.
    Testing,
    /// Task was sent back for rework.
    Returned,
}

impl TaskStatus {
    /// All statuses, in wire-code order.
    pub const ALL: [Self; 4] = [Self::InProgress, Self::Done, Self::Testing, Self::Returned];

    /// Returns the integer wire code for this status.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::InProgress => 0,
            Self::Done => 1,
            Self::Testing => 2,
            Self::Returned => 3,
        }
    }

    /// Maps an integer wire code back to a status.
    ///
    /// Returns `None` for codes outside the enumeration.
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::InProgress),
            1 => Some(Self::Done),
            2 => Some(Self::Testing),
            3 => Some(Self::Returned),
            _ => None,
        }
    }

    /// Maps a legacy string tag to a status.
    ///
    /// Only the two states that existed in the string-tag revision have
    /// tags; everything else returns `None`.
    #[must_use]
    pub fn from_legacy_tag(tag: &str) -> Option<Self> {
        match tag {
            "в процессе" => Some(Self::InProgress),
            "завершено" => Some(Self::Done),
            _ => None,
        }
    }

    /// Human-readable label for list rendering.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::InProgress => "In progress",
            Self::Done => "Done",
            Self::Testing => "Testing",
            Self::Returned => "Returned",
        }
    }

    /// The next status in wire-code order, wrapping around.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::InProgress => Self::Done,
            Self::Done => Self::Testing,
            Self::Testing => Self::Returned,
            Self::Returned => Self::InProgress,
        }
    }

    /// The previous status in wire-code order, wrapping around.
    #[must_use]
    pub const fn prev(self) -> Self {
        match self {
            Self::InProgress => Self::Returned,
            Self::Done => Self::InProgress,
            Self::Testing => Self::Done,
            Self::Returned => Self::Testing,
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for TaskStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

struct StatusVisitor;

impl Visitor<'_> for StatusVisitor {
    type Value = TaskStatus;

    fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("a task status code (0..=3) or a legacy status tag")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        u8::try_from(v)
            .ok()
            .and_then(TaskStatus::from_code)
            .ok_or_else(|| E::custom(format!("invalid task status code: {v}")))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        u8::try_from(v)
            .ok()
            .and_then(TaskStatus::from_code)
            .ok_or_else(|| E::custom(format!("invalid task status code: {v}")))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        TaskStatus::from_legacy_tag(v)
            .ok_or_else(|| E::custom(format!("unknown legacy status tag: {v:?}")))
    }
}

impl<'de> Deserialize<'de> for TaskStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(StatusVisitor)
    }
}
