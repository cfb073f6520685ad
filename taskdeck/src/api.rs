//! REST API client for the task backend.
//!
//! Thin wrapper over the four CRUD endpoints. Any non-2xx response is an
//! opaque failure: the body is never inspected for error detail, the
//! status code is all a caller gets. No retries, no timeouts beyond the
//! platform defaults; failures propagate immediately.

use reqwest::StatusCode;

use taskdeck_proto::query::{SortField, SortOrder, status_param};
use taskdeck_proto::status::TaskStatus;
use taskdeck_proto::task::{NewTask, Task, TaskId};

/// Errors surfaced by API calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never completed (connection refused, DNS failure, ...).
    #[error("network request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The server answered with a non-success status.
    #[error("server returned {0}")]
    Status(StatusCode),
}

/// HTTP client bound to one backend base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a client for the given base URL (e.g. `http://127.0.0.1:8080`).
    ///
    /// Trailing slashes are stripped so paths concatenate cleanly.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// Fetches the task list with an optional status filter, sorted by
    /// creation date in the given order.
    ///
    /// An empty `status` parameter means "all statuses". The backend
    /// answers `null` instead of `[]` when nothing matches; both decode
    /// to an empty vec.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] on network failure and
    /// [`ApiError::Status`] on any non-2xx response.
    pub async fn list_tasks(
        &self,
        filter: Option<TaskStatus>,
        order: SortOrder,
    ) -> Result<Vec<Task>, ApiError> {
        let response = self
            .http
            .get(format!("{}/api/tasks", self.base_url))
            .query(&[
                ("status", status_param(filter).as_str()),
                ("sort", order.as_str()),
                ("sortField", SortField::CreatedDate.as_str()),
            ])
            .send()
            .await?;
        let response = check_status(response)?;
        let tasks: Option<Vec<Task>> = response.json().await?;
        Ok(tasks.unwrap_or_default())
    }

    /// Creates a task; the server assigns the id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] on network failure and
    /// [`ApiError::Status`] on any non-2xx response.
    pub async fn create_task(&self, task: &NewTask) -> Result<(), ApiError> {
        let response = self
            .http
            .post(format!("{}/api/tasks/create", self.base_url))
            .json(task)
            .send()
            .await?;
        check_status(response).map(drop)
    }

    /// Updates the task with the payload's id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] on network failure and
    /// [`ApiError::Status`] on any non-2xx response.
    pub async fn update_task(&self, task: &Task) -> Result<(), ApiError> {
        let response = self
            .http
            .put(format!("{}/api/tasks/update", self.base_url))
            .query(&[("id", task.id.as_i64())])
            .json(task)
            .send()
            .await?;
        check_status(response).map(drop)
    }

    /// Deletes the task with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] on network failure and
    /// [`ApiError::Status`] on any non-2xx response.
    pub async fn delete_task(&self, id: TaskId) -> Result<(), ApiError> {
        let response = self
            .http
            .delete(format!("{}/api/tasks/delete", self.base_url))
            .query(&[("id", id.as_i64())])
            .send()
            .await?;
        check_status(response).map(drop)
    }
}

/// Maps a non-success status to [`ApiError::Status`].
fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ApiError::Status(status))
    }
}
