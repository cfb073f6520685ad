//! List query parameters: status filter and sort selection.
//!
//! These mirror the query string of `GET /api/tasks`: `status` is a status
//! code or empty for "all", `sort` is `asc`/`desc`, and `sortField` names
//! one of a whitelisted set of task fields.

use crate::status::TaskStatus;

/// Sort directions accepted by the list endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Oldest first. The backend's default when `sort` is anything but `desc`.
    #[default]
    Ascending,
    /// Newest first.
    Descending,
}

impl SortOrder {
    /// Query-string value for this order.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }

    /// Parses a query-string value; anything but `desc` sorts ascending.
    #[must_use]
    pub fn from_param(param: &str) -> Self {
        if param == "desc" {
            Self::Descending
        } else {
            Self::Ascending
        }
    }

    /// The opposite order.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Fields the list endpoint can sort by.
///
/// The backend whitelists these names and rejects anything else, so the
/// set is closed here too.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    /// Server-assigned id.
    Id,
    /// Task text, lexicographic.
    Text,
    /// Creation day. The only field the client ever sorts by.
    CreatedDate,
    /// Planned completion day.
    ExpectedDate,
    /// Status wire code.
    Status,
}

impl SortField {
    /// Query-string name of this field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Text => "text",
            Self::CreatedDate => "createdDate",
            Self::ExpectedDate => "expectedDate",
            Self::Status => "status",
        }
    }

    /// Whitelist lookup for a query-string field name.
    #[must_use]
    pub fn from_param(param: &str) -> Option<Self> {
        match param {
            "id" => Some(Self::Id),
            "text" => Some(Self::Text),
            "createdDate" => Some(Self::CreatedDate),
            "expectedDate" => Some(Self::ExpectedDate),
            "status" => Some(Self::Status),
            _ => None,
        }
    }
}

/// Value of the `status` query parameter for an optional filter.
///
/// An absent filter is the empty string, which the backend reads as
/// "all statuses".
#[must_use]
pub fn status_param(filter: Option<TaskStatus>) -> String {
    filter.map_or_else(String::new, |status| status.code().to_string())
}
