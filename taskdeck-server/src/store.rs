//! In-memory task store backing the REST handlers.
//!
//! The store owns id assignment and exposes SQL-table-like semantics: an
//! optional status equality filter, and ordering by a whitelisted field
//! with an ascending default. Thread-safe via [`RwLock`]; handlers share
//! one store behind an `Arc`.

use std::collections::BTreeMap;

use tokio::sync::RwLock;

use taskdeck_proto::query::{SortField, SortOrder};
use taskdeck_proto::status::TaskStatus;
use taskdeck_proto::task::{NewTask, Task, TaskId};

/// Errors surfaced by store operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    /// No task with the given id exists.
    #[error("task not found: {0}")]
    NotFound(TaskId),
}

#[derive(Debug, Default)]
struct Inner {
    tasks: BTreeMap<i64, Task>,
    next_id: i64,
}

/// In-memory task table with server-side id assignment.
#[derive(Debug, Default)]
pub struct TaskStore {
    inner: RwLock<Inner>,
}

impl TaskStore {
    /// Creates a new, empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a task, assigning the next free id, and returns the stored row.
    pub async fn insert(&self, new: NewTask) -> Task {
        let mut inner = self.inner.write().await;
        inner.next_id += 1;
        let task = Task {
            id: TaskId::from_i64(inner.next_id),
            text: new.text,
            created_date: new.created_date,
            expected_date: new.expected_date,
            status: new.status,
        };
        inner.tasks.insert(task.id.as_i64(), task.clone());
        task
    }

    /// Replaces the stored row with the same id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no row has the task's id
    /// (the zero-rows-affected case of an UPDATE).
    pub async fn update(&self, task: Task) -> Result<Task, StoreError> {
        let mut inner = self.inner.write().await;
        let slot = inner
            .tasks
            .get_mut(&task.id.as_i64())
            .ok_or(StoreError::NotFound(task.id))?;
        *slot = task.clone();
        Ok(task)
    }

    /// Removes the row with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no such row exists.
    pub async fn remove(&self, id: TaskId) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        inner
            .tasks
            .remove(&id.as_i64())
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }

    /// Lists tasks with an optional status filter and sort selection.
    ///
    /// With no sort field the rows come back in id order. Ties on the sort
    /// key keep id order, so repeated queries are stable.
    pub async fn list(
        &self,
        filter: Option<TaskStatus>,
        field: Option<SortField>,
        order: SortOrder,
    ) -> Vec<Task> {
        let inner = self.inner.read().await;
        let mut tasks: Vec<Task> = inner
            .tasks
            .values()
            .filter(|t| filter.is_none_or(|status| t.status == status))
            .cloned()
            .collect();
        drop(inner);

        if let Some(field) = field {
            match field {
                SortField::Id => {}
                SortField::Text => tasks.sort_by(|a, b| a.text.cmp(&b.text).then(a.id.cmp(&b.id))),
                SortField::CreatedDate => tasks.sort_by(|a, b| {
                    a.created_date.cmp(&b.created_date).then(a.id.cmp(&b.id))
                }),
                SortField::ExpectedDate => tasks.sort_by(|a, b| {
                    a.expected_date.cmp(&b.expected_date).then(a.id.cmp(&b.id))
                }),
                SortField::Status => tasks.sort_by(|a, b| {
                    a.status.code().cmp(&b.status.code()).then(a.id.cmp(&b.id))
                }),
            }
            if order == SortOrder::Descending {
                tasks.reverse();
            }
        }

        tasks
    }
}
