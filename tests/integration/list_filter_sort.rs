//! List endpoint behavior: status filtering and creation-date sorting.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use chrono::NaiveDate;

use taskdeck::api::ApiClient;
use taskdeck_proto::query::SortOrder;
use taskdeck_proto::status::TaskStatus;
use taskdeck_proto::task::NewTask;
use taskdeck_server::server;

// ---------------------------------------------------------------------------
// Helper functions
// ---------------------------------------------------------------------------

async fn start_client() -> ApiClient {
    let (addr, _handle) = server::start_server("127.0.0.1:0")
        .await
        .expect("failed to start test server");
    ApiClient::new(format!("http://{addr}"))
}

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

/// A create payload with an explicit creation day, for sort tests.
fn dated_task(text: &str, created: &str, status: TaskStatus) -> NewTask {
    NewTask {
        text: text.to_string(),
        created_date: date(created),
        expected_date: date("2030-12-31"),
        status,
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

#[tokio::test]
async fn filter_done_returns_exactly_the_done_task() {
    let api = start_client().await;
    api.create_task(&dated_task("A", "2024-03-01", TaskStatus::InProgress))
        .await
        .unwrap();
    api.create_task(&dated_task("B", "2024-03-01", TaskStatus::InProgress))
        .await
        .unwrap();
    api.create_task(&dated_task("C", "2024-03-01", TaskStatus::Done))
        .await
        .unwrap();

    let done = api
        .list_tasks(Some(TaskStatus::Done), SortOrder::Ascending)
        .await
        .unwrap();
    assert_eq!(done.len(), 1);
    assert_eq!(done[0].text, "C");
    assert_eq!(done[0].status, TaskStatus::Done);
}

#[tokio::test]
async fn absent_filter_returns_all_statuses() {
    let api = start_client().await;
    for (text, status) in [
        ("A", TaskStatus::InProgress),
        ("B", TaskStatus::Done),
        ("C", TaskStatus::Testing),
        ("D", TaskStatus::Returned),
    ] {
        api.create_task(&dated_task(text, "2024-03-01", status))
            .await
            .unwrap();
    }

    let all = api.list_tasks(None, SortOrder::Ascending).await.unwrap();
    assert_eq!(all.len(), 4);
}

#[tokio::test]
async fn filter_with_no_matches_is_empty() {
    let api = start_client().await;
    api.create_task(&dated_task("A", "2024-03-01", TaskStatus::InProgress))
        .await
        .unwrap();

    let returned = api
        .list_tasks(Some(TaskStatus::Returned), SortOrder::Ascending)
        .await
        .unwrap();
    assert!(returned.is_empty());
}

#[tokio::test]
async fn empty_store_lists_as_empty_vec() {
    let api = start_client().await;
    let tasks = api.list_tasks(None, SortOrder::Ascending).await.unwrap();
    assert!(tasks.is_empty());
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

#[tokio::test]
async fn sort_by_created_date_ascending() {
    let api = start_client().await;
    api.create_task(&dated_task("newest", "2024-03-20", TaskStatus::InProgress))
        .await
        .unwrap();
    api.create_task(&dated_task("oldest", "2024-03-01", TaskStatus::InProgress))
        .await
        .unwrap();
    api.create_task(&dated_task("middle", "2024-03-10", TaskStatus::InProgress))
        .await
        .unwrap();

    let tasks = api.list_tasks(None, SortOrder::Ascending).await.unwrap();
    let texts: Vec<&str> = tasks.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["oldest", "middle", "newest"]);
}

#[tokio::test]
async fn sort_by_created_date_descending() {
    let api = start_client().await;
    api.create_task(&dated_task("oldest", "2024-03-01", TaskStatus::InProgress))
        .await
        .unwrap();
    api.create_task(&dated_task("newest", "2024-03-20", TaskStatus::InProgress))
        .await
        .unwrap();

    let tasks = api.list_tasks(None, SortOrder::Descending).await.unwrap();
    let texts: Vec<&str> = tasks.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["newest", "oldest"]);
}

#[tokio::test]
async fn filter_and_sort_compose() {
    let api = start_client().await;
    api.create_task(&dated_task("done-new", "2024-03-20", TaskStatus::Done))
        .await
        .unwrap();
    api.create_task(&dated_task("done-old", "2024-03-01", TaskStatus::Done))
        .await
        .unwrap();
    api.create_task(&dated_task("open", "2024-02-01", TaskStatus::InProgress))
        .await
        .unwrap();

    let tasks = api
        .list_tasks(Some(TaskStatus::Done), SortOrder::Descending)
        .await
        .unwrap();
    let texts: Vec<&str> = tasks.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["done-new", "done-old"]);
}
