// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::test_helpers::{fixture, FakeArchive};
use remex_core::{Platform, SequentialIdGen, Timeout};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

fn config() -> SchedulerConfig {
    SchedulerConfig {
        default_action_timeout: Some(Timeout::from_secs(60)),
        operation_completed_delay: Duration::from_secs(10),
        operation_poll_timeout: Duration::from_secs(5),
        ..SchedulerConfig::default()
    }
}

async fn settle() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test(start_paused = true)]
async fn happy_path_observes_full_lifecycle_and_archives() {
    let (digest, resolver) = fixture(Platform::new().with("os", "linux"), None);
    let archive = Arc::new(FakeArchive::new());
    let scheduler = Scheduler::new(
        config(),
        resolver,
        Some(archive.clone()),
        Arc::new(SequentialIdGen::new("op")),
    );

    let stages = Arc::new(Mutex::new(Vec::new()));
    let s = stages.clone();
    let name = scheduler.accept(digest).await.expect("accepted");
    scheduler
        .watch(
            name.clone(),
            Arc::new(move |op: Option<&Operation>| {
                if let Some(op) = op {
                    s.lock().push(op.stage);
                }
                WatcherDecision::Continue
            }),
        )
        .await;

    let dispatched = scheduler
        .match_platform(Platform::new().with("os", "linux"), Box::new(|_| true))
        .await;
    assert!(dispatched.is_some());
    settle().await;

    scheduler.poll(&name, Stage::Executing).await;
    tokio::time::advance(Duration::from_secs(2)).await;
    settle().await;
    scheduler.poll(&name, Stage::Executing).await;
    tokio::time::advance(Duration::from_secs(2)).await;
    settle().await;
    scheduler.poll(&name, Stage::Executing).await;
    tokio::time::advance(Duration::from_secs(2)).await;
    settle().await;

    let current = scheduler.get_operation(&name).await.unwrap();
    let done = current.complete(ExecuteResult::Success {
        output_digest: None,
    });
    assert!(scheduler.put_operation(done).await);
    settle().await;

    assert!(scheduler.get_operation(&name).await.unwrap().done);
    assert_eq!(archive.len(), 1);
    let seen = stages.lock().clone();
    assert!(seen.contains(&Stage::Queued) || seen.contains(&Stage::Executing));
}

#[tokio::test(start_paused = true)]
async fn poll_timeout_requeues_operation() {
    let (digest, resolver) = fixture(Platform::new(), None);
    let scheduler = Scheduler::new(
        config(),
        resolver,
        None,
        Arc::new(SequentialIdGen::new("op")),
    );
    let name = scheduler.accept(digest).await.unwrap();
    scheduler
        .match_platform(Platform::new(), Box::new(|_| true))
        .await;
    settle().await;
    assert_eq!(scheduler.get_operation(&name).await.unwrap().stage, Stage::Executing);

    // Worker stops polling; after operation_poll_timeout (5s) it requeues.
    tokio::time::advance(Duration::from_secs(7)).await;
    settle().await;

    assert_eq!(scheduler.get_operation(&name).await.unwrap().stage, Stage::Queued);
    assert_eq!(scheduler.matcher.queue_len(), 1);

    // A second worker can now pick it up.
    let redispatch = scheduler
        .match_platform(Platform::new(), Box::new(|_| true))
        .await;
    assert!(redispatch.is_some());
}

#[tokio::test(start_paused = true)]
async fn completion_deadline_installs_synthetic_timeout() {
    let (digest, resolver) = fixture(Platform::new(), Some(Timeout::from_secs(3)));
    let scheduler = Scheduler::new(
        config(),
        resolver,
        None,
        Arc::new(SequentialIdGen::new("op")),
    );
    let name = scheduler.accept(digest).await.unwrap();
    scheduler
        .match_platform(Platform::new(), Box::new(|_| true))
        .await;
    settle().await;

    // Worker keeps polling (resets the 5s poll watchdog) but never completes.
    for _ in 0..3 {
        tokio::time::advance(Duration::from_secs(4)).await;
        settle().await;
        scheduler.poll(&name, Stage::Executing).await;
    }

    // Completion watchdog = 3 + 10 = 13s total; by now we're past it.
    tokio::time::advance(Duration::from_secs(2)).await;
    settle().await;

    let op = scheduler.get_operation(&name).await.unwrap();
    assert!(op.done);
    assert!(matches!(op.result, Some(ExecuteResult::Timeout { .. })));
}

#[tokio::test(start_paused = true)]
async fn inviable_worker_is_discarded_and_later_worker_completes_dispatch() {
    let (digest, resolver) = fixture(Platform::new(), None);
    let scheduler = Scheduler::new(
        config(),
        resolver,
        None,
        Arc::new(SequentialIdGen::new("op")),
    );
    let _name = scheduler.accept(digest).await.unwrap();

    // W2 passes the platform check but declines in onMatch.
    let first = scheduler
        .match_platform(Platform::new(), Box::new(|_| false))
        .await;
    assert!(first.is_none());
    assert_eq!(scheduler.matcher.queue_len(), 1, "operation remains queued");

    // W3 satisfies and accepts.
    let second = scheduler
        .match_platform(Platform::new(), Box::new(|_| true))
        .await;
    assert!(second.is_some());
}

#[tokio::test(start_paused = true)]
async fn late_watcher_sees_terminal_snapshot_exactly_once() {
    let (digest, resolver) = fixture(Platform::new(), None);
    let scheduler = Scheduler::new(
        config(),
        resolver,
        None,
        Arc::new(SequentialIdGen::new("op")),
    );
    let name = scheduler.accept(digest).await.unwrap();
    scheduler
        .match_platform(Platform::new(), Box::new(|_| true))
        .await;
    settle().await;
    let current = scheduler.get_operation(&name).await.unwrap();
    let done = current.complete(ExecuteResult::Success {
        output_digest: None,
    });
    scheduler.put_operation(done).await;
    settle().await;

    let invocations = Arc::new(AtomicUsize::new(0));
    let inv = invocations.clone();
    let registered_after_done = scheduler
        .watch(
            name.clone(),
            Arc::new(move |op: Option<&Operation>| {
                inv.fetch_add(1, Ordering::SeqCst);
                WatcherDecision::from(op.map_or(false, |o| !o.done))
            }),
        )
        .await;
    assert!(registered_after_done);
    assert_eq!(invocations.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn timeout_exceeding_maximum_is_rejected() {
    let (digest, resolver) = fixture(Platform::new(), Some(Timeout::from_secs(601)));
    let scheduler = Scheduler::new(
        SchedulerConfig {
            maximum_action_timeout: Timeout::from_secs(600),
            ..SchedulerConfig::default()
        },
        resolver,
        None,
        Arc::new(SequentialIdGen::new("op")),
    );
    let result = scheduler.accept(digest).await;
    assert!(matches!(result, Err(AcceptError::InvalidArgument(_))));
    assert_eq!(scheduler.operations.len(), 0);
}

#[tokio::test(start_paused = true)]
async fn boundary_timeout_equal_to_maximum_is_accepted() {
    let (digest, resolver) = fixture(Platform::new(), Some(Timeout::from_secs(600)));
    let scheduler = Scheduler::new(
        SchedulerConfig {
            maximum_action_timeout: Timeout::from_secs(600),
            ..SchedulerConfig::default()
        },
        resolver,
        None,
        Arc::new(SequentialIdGen::new("op")),
    );
    assert!(scheduler.accept(digest).await.is_ok());
}

#[tokio::test(start_paused = true)]
async fn invariant_done_implies_removed_from_in_flight_and_watchdogs_stopped() {
    let (digest, resolver) = fixture(Platform::new(), None);
    let scheduler = Scheduler::new(
        config(),
        resolver,
        None,
        Arc::new(SequentialIdGen::new("op")),
    );
    let name = scheduler.accept(digest).await.unwrap();
    scheduler
        .match_platform(Platform::new(), Box::new(|_| true))
        .await;
    settle().await;
    let current = scheduler.get_operation(&name).await.unwrap();
    let done = current.complete(ExecuteResult::Success {
        output_digest: None,
    });
    scheduler.put_operation(done).await;
    settle().await;

    assert!(!scheduler.operations.contains(&name));
    assert!(!scheduler.watchdogs.lock().contains_key(&name));
}
