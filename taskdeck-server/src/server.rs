//! axum REST server exposing the task CRUD endpoints.
//!
//! Routes match the wire contract the client consumes:
//!
//! | Method | Path                | Meaning                         |
//! |--------|---------------------|---------------------------------|
//! | GET    | `/api/tasks`        | list (filter + sort via query)  |
//! | POST   | `/api/tasks/create` | create, body is JSON            |
//! | PUT    | `/api/tasks/update` | update, id in query, JSON body  |
//! | DELETE | `/api/tasks/delete` | delete, id in query             |
//!
//! Handlers re-validate payloads even though the client validates first;
//! anything reaching the store is already well-formed. Status codes are
//! checked by the typed [`TaskStatus`] deserializer at the extraction
//! boundary, so an out-of-range code never reaches a handler.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde::Deserialize;

use taskdeck_proto::query::{SortField, SortOrder};
use taskdeck_proto::status::TaskStatus;
use taskdeck_proto::task::{MAX_TASK_TEXT_LENGTH, NewTask, Task, TaskId};

use crate::store::{StoreError, TaskStore};

/// Errors a handler can answer with.
#[derive(Debug, thiserror::Error)]
pub enum Rejection {
    /// The request payload or query failed validation (400).
    #[error("{0}")]
    Invalid(String),
    /// The addressed task does not exist (404).
    #[error("task not found: {0}")]
    NotFound(TaskId),
}

impl From<StoreError> for Rejection {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => Self::NotFound(id),
        }
    }
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        let status = match self {
            Self::Invalid(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        };
        (status, self.to_string()).into_response()
    }
}

/// Query parameters of the list endpoint. All optional; empty strings
/// mean "no filter" / "no explicit sort".
#[derive(Debug, Deserialize)]
struct ListParams {
    #[serde(default)]
    status: String,
    #[serde(default)]
    sort: String,
    #[serde(default, rename = "sortField")]
    sort_field: String,
}

/// The `id` query parameter used by update and delete.
#[derive(Debug, Deserialize)]
struct IdParam {
    id: i64,
}

/// Builds the application router over a shared store.
#[must_use]
pub fn router(store: Arc<TaskStore>) -> Router {
    Router::new()
        .route("/api/tasks", get(list_tasks))
        .route("/api/tasks/create", post(create_task))
        .route("/api/tasks/update", put(update_task))
        .route("/api/tasks/delete", delete(delete_task))
        .with_state(store)
}

async fn list_tasks(
    State(store): State<Arc<TaskStore>>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Task>>, Rejection> {
    let filter = parse_status_filter(&params.status)?;
    let field = parse_sort_field(&params.sort_field)?;
    let order = SortOrder::from_param(&params.sort);
    Ok(Json(store.list(filter, field, order).await))
}

async fn create_task(
    State(store): State<Arc<TaskStore>>,
    Json(mut payload): Json<NewTask>,
) -> Result<(StatusCode, Json<Task>), Rejection> {
    payload.text = validate_text(&payload.text)?;
    if payload.expected_date < payload.created_date {
        return Err(Rejection::Invalid(
            "expected date cannot be earlier than created date".to_string(),
        ));
    }

    let task = store.insert(payload).await;
    tracing::info!(id = %task.id, "task created");
    Ok((StatusCode::CREATED, Json(task)))
}

async fn update_task(
    State(store): State<Arc<TaskStore>>,
    Query(IdParam { id }): Query<IdParam>,
    Json(mut task): Json<Task>,
) -> Result<Json<Task>, Rejection> {
    // The query id is authoritative; a mismatching body id is overwritten.
    task.id = TaskId::from_i64(id);
    task.text = validate_text(&task.text)?;
    if task.expected_date < task.created_date {
        return Err(Rejection::Invalid(
            "expected date cannot be earlier than created date".to_string(),
        ));
    }

    let task = store.update(task).await?;
    tracing::info!(id = %task.id, "task updated");
    Ok(Json(task))
}

async fn delete_task(
    State(store): State<Arc<TaskStore>>,
    Query(IdParam { id }): Query<IdParam>,
) -> Result<StatusCode, Rejection> {
    store.remove(TaskId::from_i64(id)).await?;
    tracing::info!(id, "task deleted");
    Ok(StatusCode::OK)
}

/// Trims and length-checks task text.
fn validate_text(text: &str) -> Result<String, Rejection> {
    let text = text.trim();
    if text.is_empty() {
        return Err(Rejection::Invalid("task text cannot be empty".to_string()));
    }
    if text.chars().count() > MAX_TASK_TEXT_LENGTH {
        return Err(Rejection::Invalid(format!(
            "task text cannot exceed {MAX_TASK_TEXT_LENGTH} characters"
        )));
    }
    Ok(text.to_string())
}

/// Parses the `status` filter parameter; empty means no filter.
fn parse_status_filter(param: &str) -> Result<Option<TaskStatus>, Rejection> {
    if param.is_empty() {
        return Ok(None);
    }
    param
        .parse::<u8>()
        .ok()
        .and_then(TaskStatus::from_code)
        .map(Some)
        .ok_or_else(|| Rejection::Invalid(format!("invalid status filter: {param}")))
}

/// Parses the `sortField` parameter against the whitelist; empty means
/// no explicit sort.
fn parse_sort_field(param: &str) -> Result<Option<SortField>, Rejection> {
    if param.is_empty() {
        return Ok(None);
    }
    SortField::from_param(param)
        .map(Some)
        .ok_or_else(|| Rejection::Invalid(format!("invalid sort field: {param}")))
}

/// Starts the server on the given address with a fresh, empty store.
///
/// This is the primary entry point used by both `main.rs` and test code.
///
/// # Errors
///
/// Returns an error if the TCP listener cannot bind to the given address.
pub async fn start_server(
    addr: &str,
) -> Result<
    (std::net::SocketAddr, tokio::task::JoinHandle<()>),
    Box<dyn std::error::Error + Send + Sync>,
> {
    start_server_with_store(addr, Arc::new(TaskStore::new())).await
}

/// Starts the server over a pre-populated [`TaskStore`].
///
/// # Errors
///
/// Returns an error if the TCP listener cannot bind to the given address.
pub async fn start_server_with_store(
    addr: &str,
    store: Arc<TaskStore>,
) -> Result<
    (std::net::SocketAddr, tokio::task::JoinHandle<()>),
    Box<dyn std::error::Error + Send + Sync>,
> {
    let app = router(store);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let bound_addr = listener.local_addr()?;

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!(error = %e, "task server error");
        }
    });

    Ok((bound_addr, handle))
}
