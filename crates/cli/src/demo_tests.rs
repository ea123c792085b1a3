// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn demo_completes_all_submitted_actions_within_a_bounded_time() {
    let config = DemoConfig {
        actions: 2,
        workers: 1,
        poll_interval: Duration::from_millis(5),
        scheduler_config: SchedulerConfig::default(),
    };

    tokio::time::timeout(Duration::from_secs(5), run(config))
        .await
        .expect("demo scenario should finish well within the timeout")
        .expect("demo scenario should not error");
}

#[tokio::test]
async fn demo_scales_to_more_workers_than_actions() {
    let config = DemoConfig {
        actions: 1,
        workers: 4,
        poll_interval: Duration::from_millis(5),
        scheduler_config: SchedulerConfig::default(),
    };

    tokio::time::timeout(Duration::from_secs(5), run(config))
        .await
        .expect("demo scenario should finish well within the timeout")
        .expect("demo scenario should not error");
}
