//! Worker-level tests: command/event pairing against a live server.
//!
//! Verifies the mutation-then-refresh contract: every successful
//! mutation is followed by exactly one list fetch, and a failed mutation
//! by none.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::time::Duration;

use chrono::{Days, Local};
use tokio::sync::mpsc;
use tokio::time::timeout;

use taskdeck::net::{self, MutationKind, NetCommand, NetConfig, NetEvent, RefreshSpec};
use taskdeck_proto::query::SortOrder;
use taskdeck_proto::status::TaskStatus;
use taskdeck_proto::task::{NewTask, TaskId};
use taskdeck_server::server;

// ---------------------------------------------------------------------------
// Helper functions
// ---------------------------------------------------------------------------

async fn start_worker() -> (mpsc::Sender<NetCommand>, mpsc::Receiver<NetEvent>) {
    let (addr, _handle) = server::start_server("127.0.0.1:0")
        .await
        .expect("failed to start test server");
    net::spawn_worker(NetConfig {
        base_url: format!("http://{addr}"),
        channel_capacity: 64,
    })
}

async fn next_event(rx: &mut mpsc::Receiver<NetEvent>) -> NetEvent {
    timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("timed out waiting for event")
        .expect("event channel closed")
}

fn spec(seq: u64) -> RefreshSpec {
    RefreshSpec {
        seq,
        filter: None,
        order: SortOrder::Ascending,
    }
}

fn valid_task(text: &str) -> NewTask {
    let today = Local::now().date_naive();
    NewTask {
        text: text.to_string(),
        created_date: today,
        expected_date: today + Days::new(1),
        status: TaskStatus::InProgress,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_is_followed_by_exactly_one_refresh() {
    let (cmd_tx, mut evt_rx) = start_worker().await;

    cmd_tx
        .send(NetCommand::Create {
            task: valid_task("Buy milk"),
            refresh: spec(1),
        })
        .await
        .unwrap();

    // One POST confirmation, then one list response — nothing else.
    match next_event(&mut evt_rx).await {
        NetEvent::MutationDone { action } => assert_eq!(action, MutationKind::Create),
        other => panic!("expected MutationDone, got {other:?}"),
    }
    match next_event(&mut evt_rx).await {
        NetEvent::TasksLoaded { seq, tasks } => {
            assert_eq!(seq, 1);
            assert_eq!(tasks.len(), 1);
            assert_eq!(tasks[0].text, "Buy milk");
        }
        other => panic!("expected TasksLoaded, got {other:?}"),
    }
    assert!(evt_rx.try_recv().is_err());
}

#[tokio::test]
async fn failed_mutation_skips_the_refresh() {
    let (cmd_tx, mut evt_rx) = start_worker().await;

    // The server rejects blank text with 400; the client-side validator
    // would normally have caught this first.
    cmd_tx
        .send(NetCommand::Create {
            task: valid_task("   "),
            refresh: spec(1),
        })
        .await
        .unwrap();

    match next_event(&mut evt_rx).await {
        NetEvent::MutationFailed { action, error } => {
            assert_eq!(action, MutationKind::Create);
            assert!(error.contains("400"));
        }
        other => panic!("expected MutationFailed, got {other:?}"),
    }
    assert!(evt_rx.try_recv().is_err());
}

#[tokio::test]
async fn delete_of_unknown_id_reports_failure() {
    let (cmd_tx, mut evt_rx) = start_worker().await;

    cmd_tx
        .send(NetCommand::Delete {
            id: TaskId::from_i64(12345),
            refresh: spec(1),
        })
        .await
        .unwrap();

    match next_event(&mut evt_rx).await {
        NetEvent::MutationFailed { action, error } => {
            assert_eq!(action, MutationKind::Delete);
            assert!(error.contains("404"));
        }
        other => panic!("expected MutationFailed, got {other:?}"),
    }
    assert!(evt_rx.try_recv().is_err());
}

#[tokio::test]
async fn refresh_carries_its_token_through() {
    let (cmd_tx, mut evt_rx) = start_worker().await;

    cmd_tx.send(NetCommand::Refresh(spec(7))).await.unwrap();

    match next_event(&mut evt_rx).await {
        NetEvent::TasksLoaded { seq, tasks } => {
            assert_eq!(seq, 7);
            assert!(tasks.is_empty());
        }
        other => panic!("expected TasksLoaded, got {other:?}"),
    }
}

#[tokio::test]
async fn refresh_against_dead_server_reports_failure_event() {
    // No server here at all.
    let (cmd_tx, mut evt_rx) = net::spawn_worker(NetConfig {
        base_url: "http://127.0.0.1:1".to_string(),
        channel_capacity: 64,
    });

    cmd_tx.send(NetCommand::Refresh(spec(3))).await.unwrap();

    match next_event(&mut evt_rx).await {
        NetEvent::RefreshFailed { seq } => assert_eq!(seq, 3),
        other => panic!("expected RefreshFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn shutdown_stops_the_worker() {
    let (cmd_tx, mut evt_rx) = start_worker().await;
    cmd_tx.send(NetCommand::Shutdown).await.unwrap();

    // The worker drops its event sender on exit.
    let closed = timeout(Duration::from_secs(5), evt_rx.recv())
        .await
        .expect("timed out waiting for channel close");
    assert!(closed.is_none());
}
