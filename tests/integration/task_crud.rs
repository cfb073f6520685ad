//! End-to-end CRUD tests: the real [`ApiClient`] against an in-process
//! reference server.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use chrono::{Days, Local, NaiveDate};

use taskdeck::api::{ApiClient, ApiError};
use taskdeck_proto::query::SortOrder;
use taskdeck_proto::status::TaskStatus;
use taskdeck_proto::task::{NewTask, Task, TaskId};
use taskdeck_server::server;

// ---------------------------------------------------------------------------
// Helper functions
// ---------------------------------------------------------------------------

/// Starts a fresh server on an OS-assigned port and returns a client for it.
async fn start_client() -> ApiClient {
    let (addr, _handle) = server::start_server("127.0.0.1:0")
        .await
        .expect("failed to start test server");
    ApiClient::new(format!("http://{addr}"))
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn new_task(text: &str) -> NewTask {
    NewTask {
        text: text.to_string(),
        created_date: today(),
        expected_date: today() + Days::new(1),
        status: TaskStatus::InProgress,
    }
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_then_list_round_trip() {
    let api = start_client().await;
    api.create_task(&new_task("Buy milk")).await.unwrap();

    let tasks = api.list_tasks(None, SortOrder::Ascending).await.unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].text, "Buy milk");
    assert_eq!(tasks[0].status, TaskStatus::InProgress);
    assert_eq!(tasks[0].created_date, today());
}

#[tokio::test]
async fn server_assigns_distinct_ids() {
    let api = start_client().await;
    api.create_task(&new_task("A")).await.unwrap();
    api.create_task(&new_task("B")).await.unwrap();

    let tasks = api.list_tasks(None, SortOrder::Ascending).await.unwrap();
    assert_eq!(tasks.len(), 2);
    assert_ne!(tasks[0].id, tasks[1].id);
}

#[tokio::test]
async fn server_trims_text() {
    let api = start_client().await;
    api.create_task(&new_task("  padded  ")).await.unwrap();

    let tasks = api.list_tasks(None, SortOrder::Ascending).await.unwrap();
    assert_eq!(tasks[0].text, "padded");
}

#[tokio::test]
async fn server_rejects_blank_text() {
    let api = start_client().await;
    let err = api.create_task(&new_task("   ")).await.unwrap_err();
    match err {
        ApiError::Status(code) => assert_eq!(code.as_u16(), 400),
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn server_rejects_overlong_text() {
    let api = start_client().await;
    let err = api.create_task(&new_task(&"x".repeat(256))).await.unwrap_err();
    assert!(matches!(err, ApiError::Status(code) if code.as_u16() == 400));
}

#[tokio::test]
async fn server_rejects_expected_before_created() {
    let api = start_client().await;
    let bad = NewTask {
        expected_date: today() - Days::new(1),
        ..new_task("Backwards")
    };
    let err = api.create_task(&bad).await.unwrap_err();
    assert!(matches!(err, ApiError::Status(code) if code.as_u16() == 400));
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[tokio::test]
async fn update_changes_text_date_and_status() {
    let api = start_client().await;
    api.create_task(&new_task("Original")).await.unwrap();
    let task = api.list_tasks(None, SortOrder::Ascending).await.unwrap()[0].clone();

    let updated = Task {
        text: "Edited".to_string(),
        expected_date: today() + Days::new(7),
        status: TaskStatus::Done,
        ..task
    };
    api.update_task(&updated).await.unwrap();

    let tasks = api.list_tasks(None, SortOrder::Ascending).await.unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].text, "Edited");
    assert_eq!(tasks[0].expected_date, today() + Days::new(7));
    assert_eq!(tasks[0].status, TaskStatus::Done);
    assert_eq!(tasks[0].id, task.id);
}

#[tokio::test]
async fn status_change_preserves_other_fields() {
    let api = start_client().await;
    api.create_task(&new_task("A")).await.unwrap();
    let task = api.list_tasks(None, SortOrder::Ascending).await.unwrap()[0].clone();

    // The status selector path: unchanged text/dates, new status code.
    let updated = Task {
        status: TaskStatus::Testing,
        ..task.clone()
    };
    api.update_task(&updated).await.unwrap();

    let refreshed = api.list_tasks(None, SortOrder::Ascending).await.unwrap();
    assert_eq!(refreshed[0].status, TaskStatus::Testing);
    assert_eq!(refreshed[0].status.code(), 2);
    assert_eq!(refreshed[0].text, task.text);
    assert_eq!(refreshed[0].created_date, task.created_date);
    assert_eq!(refreshed[0].expected_date, task.expected_date);
}

#[tokio::test]
async fn update_unknown_id_is_not_found() {
    let api = start_client().await;
    let ghost = Task {
        id: TaskId::from_i64(999),
        text: "Ghost".to_string(),
        created_date: today(),
        expected_date: today() + Days::new(1),
        status: TaskStatus::InProgress,
    };
    let err = api.update_task(&ghost).await.unwrap_err();
    assert!(matches!(err, ApiError::Status(code) if code.as_u16() == 404));
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn delete_removes_task_from_next_list() {
    let api = start_client().await;
    api.create_task(&new_task("Keep")).await.unwrap();
    api.create_task(&new_task("Doomed")).await.unwrap();

    let tasks = api.list_tasks(None, SortOrder::Ascending).await.unwrap();
    let doomed = tasks.iter().find(|t| t.text == "Doomed").unwrap();
    api.delete_task(doomed.id).await.unwrap();

    let remaining = api.list_tasks(None, SortOrder::Ascending).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].text, "Keep");
}

#[tokio::test]
async fn delete_nonexistent_id_surfaces_error_and_list_is_unchanged() {
    let api = start_client().await;
    api.create_task(&new_task("Survivor")).await.unwrap();

    let err = api.delete_task(TaskId::from_i64(42)).await.unwrap_err();
    assert!(matches!(err, ApiError::Status(code) if code.as_u16() == 404));

    let tasks = api.list_tasks(None, SortOrder::Ascending).await.unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].text, "Survivor");
}

// ---------------------------------------------------------------------------
// Transport failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    // Nothing listens on this port.
    let api = ApiClient::new("http://127.0.0.1:1");
    let err = api.list_tasks(None, SortOrder::Ascending).await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}
