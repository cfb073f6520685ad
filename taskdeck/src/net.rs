//! Networking bridge between the TUI loop and the REST backend.
//!
//! The TUI event loop is synchronous (crossterm poll-based); HTTP calls
//! are async. This module spawns a tokio worker task that owns the
//! [`ApiClient`] and talks to the main thread over mpsc channels:
//!
//! ```text
//! TUI (main thread)  ←── NetEvent ───  tokio worker task
//!                     ─── NetCommand →
//! ```
//!
//! Mutations perform their follow-up list refresh inside the worker, and
//! only when the mutation succeeded: one POST/PUT/DELETE is followed by
//! exactly one GET. Every refresh carries a sequencing token assigned by
//! the controller; the controller discards responses whose token is
//! stale, so rapid filter/sort changes can never leave an out-of-date
//! list on screen.

use tokio::sync::mpsc;

use taskdeck_proto::query::SortOrder;
use taskdeck_proto::status::TaskStatus;
use taskdeck_proto::task::{NewTask, Task, TaskId};

use crate::api::ApiClient;

/// Parameters of a single list refresh: its sequencing token plus the
/// filter/sort in effect when the controller issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshSpec {
    /// Monotonic token; only the response to the latest token is applied.
    pub seq: u64,
    /// Status filter in effect, `None` for all.
    pub filter: Option<TaskStatus>,
    /// Sort order for the creation-date sort.
    pub order: SortOrder,
}

/// Which mutation a [`NetEvent`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    /// `POST /api/tasks/create`
    Create,
    /// `PUT /api/tasks/update`
    Update,
    /// `DELETE /api/tasks/delete`
    Delete,
}

impl std::fmt::Display for MutationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Create => write!(f, "create"),
            Self::Update => write!(f, "update"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// Commands sent from the TUI main loop to the worker task.
#[derive(Debug)]
pub enum NetCommand {
    /// Re-fetch the task list.
    Refresh(RefreshSpec),
    /// Create a task, then refresh on success.
    Create {
        /// Validated create payload.
        task: NewTask,
        /// Refresh to run after a successful POST.
        refresh: RefreshSpec,
    },
    /// Update a task, then refresh on success.
    Update {
        /// Validated full task payload.
        task: Task,
        /// Refresh to run after a successful PUT.
        refresh: RefreshSpec,
    },
    /// Delete a task, then refresh on success.
    Delete {
        /// Id of the task to delete.
        id: TaskId,
        /// Refresh to run after a successful DELETE.
        refresh: RefreshSpec,
    },
    /// Gracefully stop the worker task.
    Shutdown,
}

/// Events sent from the worker task to the TUI main loop.
#[derive(Debug)]
pub enum NetEvent {
    /// A list response arrived.
    TasksLoaded {
        /// Token of the refresh this answers.
        seq: u64,
        /// The fresh server snapshot.
        tasks: Vec<Task>,
    },
    /// A list refresh failed. Logged, never shown as a blocking notice.
    RefreshFailed {
        /// Token of the refresh that failed.
        seq: u64,
    },
    /// A mutation completed; the matching refresh is already on its way.
    MutationDone {
        /// Which mutation finished.
        action: MutationKind,
    },
    /// A mutation failed; no refresh was issued for it.
    MutationFailed {
        /// Which mutation failed.
        action: MutationKind,
        /// Human-readable failure description.
        error: String,
    },
}

/// Configuration for the networking worker.
#[derive(Debug, Clone)]
pub struct NetConfig {
    /// Base URL of the task backend.
    pub base_url: String,
    /// Capacity of the command and event channels.
    pub channel_capacity: usize,
}

/// Spawns the worker task and returns the channel handles for it.
///
/// The worker runs until it receives [`NetCommand::Shutdown`] or the
/// command channel closes. Event sends into a closed receiver are
/// silently dropped (the TUI has already quit by then).
#[must_use]
pub fn spawn_worker(config: NetConfig) -> (mpsc::Sender<NetCommand>, mpsc::Receiver<NetEvent>) {
    let (cmd_tx, mut cmd_rx) = mpsc::channel::<NetCommand>(config.channel_capacity);
    let (evt_tx, evt_rx) = mpsc::channel::<NetEvent>(config.channel_capacity);
    let api = ApiClient::new(config.base_url);

    tokio::spawn(async move {
        while let Some(cmd) = cmd_rx.recv().await {
            match cmd {
                NetCommand::Refresh(spec) => refresh(&api, &evt_tx, spec).await,
                NetCommand::Create { task, refresh: spec } => {
                    let result = api.create_task(&task).await;
                    if report(&evt_tx, MutationKind::Create, result).await {
                        refresh(&api, &evt_tx, spec).await;
                    }
                }
                NetCommand::Update { task, refresh: spec } => {
                    let result = api.update_task(&task).await;
                    if report(&evt_tx, MutationKind::Update, result).await {
                        refresh(&api, &evt_tx, spec).await;
                    }
                }
                NetCommand::Delete { id, refresh: spec } => {
                    let result = api.delete_task(id).await;
                    if report(&evt_tx, MutationKind::Delete, result).await {
                        refresh(&api, &evt_tx, spec).await;
                    }
                }
                NetCommand::Shutdown => break,
            }
        }
        tracing::debug!("api worker stopped");
    });

    (cmd_tx, evt_rx)
}

/// Forwards a mutation outcome to the TUI; returns whether it succeeded
/// (and thus whether the follow-up refresh should run).
async fn report(
    evt_tx: &mpsc::Sender<NetEvent>,
    action: MutationKind,
    result: Result<(), crate::api::ApiError>,
) -> bool {
    match result {
        Ok(()) => {
            tracing::debug!(%action, "mutation succeeded");
            let _ = evt_tx.send(NetEvent::MutationDone { action }).await;
            true
        }
        Err(e) => {
            tracing::warn!(%action, error = %e, "mutation failed");
            let _ = evt_tx
                .send(NetEvent::MutationFailed {
                    action,
                    error: e.to_string(),
                })
                .await;
            false
        }
    }
}

/// Fetches the task list and forwards it (or logs the failure).
async fn refresh(api: &ApiClient, evt_tx: &mpsc::Sender<NetEvent>, spec: RefreshSpec) {
    match api.list_tasks(spec.filter, spec.order).await {
        Ok(tasks) => {
            let _ = evt_tx
                .send(NetEvent::TasksLoaded {
                    seq: spec.seq,
                    tasks,
                })
                .await;
        }
        Err(e) => {
            // Refreshes are often indirect (after a filter change), so a
            // failure is logged rather than surfaced as a blocking notice.
            tracing::warn!(seq = spec.seq, error = %e, "task list refresh failed");
            let _ = evt_tx.send(NetEvent::RefreshFailed { seq: spec.seq }).await;
        }
    }
}
