// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The scenario this binary runs: submit a handful of actions, bring up
//! a small pool of simulated workers offering a fixed platform, and
//! drive each operation through `QUEUED -> EXECUTING -> COMPLETED`
//! while a watcher prints stage transitions as they happen.

use anyhow::{Context, Result};
use parking_lot::Mutex;
use remex_adapters::{CasActionResolver, DelegateCompletedOperations, InMemoryCas};
use remex_core::{Action, Command, Digest, ExecuteResult, Operation, Platform, UuidIdGen};
use remex_engine::{Scheduler, SchedulerConfig, WatcherDecision, WatcherFn};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tracing::info;

pub struct DemoConfig {
    pub actions: usize,
    pub workers: usize,
    pub poll_interval: Duration,
    pub scheduler_config: SchedulerConfig,
}

pub async fn run(config: DemoConfig) -> Result<()> {
    let cas = Arc::new(InMemoryCas::new());
    let resolver = Arc::new(CasActionResolver::new(cas.clone()));
    let archive = Arc::new(DelegateCompletedOperations::new(cas.clone()));
    let scheduler = Scheduler::new(
        config.scheduler_config.clone(),
        resolver.clone(),
        Some(archive.clone()),
        Arc::new(UuidIdGen),
    );

    let platform = Platform::new().with("os", "linux");
    let worker_handles: Vec<_> = (0..config.workers)
        .map(|worker_id| {
            let scheduler = scheduler.clone();
            let platform = platform.clone();
            let poll_interval = config.poll_interval;
            tokio::spawn(async move {
                run_worker(worker_id, scheduler, platform, poll_interval).await;
            })
        })
        .collect();

    let mut completions = Vec::new();
    for i in 0..config.actions {
        let command = Command::new(vec!["echo".to_string(), format!("job-{i}")], platform.clone());
        let command_digest = resolver.put_command(&command).await;
        let action = Action::new(command_digest, Digest::of_bytes(format!("input-root-{i}").as_bytes()));
        let action_digest = resolver.put_action(&action).await;

        let name = scheduler
            .accept(action_digest)
            .await
            .with_context(|| format!("submitting action {i}"))?;
        info!(operation = %name, "submitted");

        let (tx, rx) = oneshot::channel();
        let tx = Arc::new(Mutex::new(Some(tx)));
        let predicate: Arc<WatcherFn> = terminal_watcher(name.clone(), tx);
        scheduler.watch(name.clone(), predicate).await;
        completions.push(rx);
    }

    for rx in completions {
        let _ = rx.await;
    }

    println!("{} operations completed and archived", archive.len());

    for handle in worker_handles {
        handle.abort();
    }
    Ok(())
}

/// Builds a watcher predicate that logs every update and signals `tx`
/// exactly once, the first time it observes a terminal (or missing)
/// operation.
fn terminal_watcher(
    name: remex_core::OperationName,
    tx: Arc<Mutex<Option<oneshot::Sender<()>>>>,
) -> Arc<WatcherFn> {
    Arc::new(move |op: Option<&Operation>| {
        let terminal = match op {
            Some(op) => {
                info!(operation = %name, stage = ?op.stage, done = op.done, "update");
                op.done
            }
            None => true,
        };
        if terminal {
            if let Some(sender) = tx.lock().take() {
                let _ = sender.send(());
            }
            WatcherDecision::Done
        } else {
            WatcherDecision::Continue
        }
    })
}

async fn run_worker(worker_id: usize, scheduler: Arc<Scheduler>, platform: Platform, poll_interval: Duration) {
    loop {
        let dispatched = scheduler
            .match_platform(platform.clone(), Box::new(|_op| true))
            .await;
        let Some(operation) = dispatched else {
            tokio::time::sleep(poll_interval).await;
            continue;
        };

        info!(worker = worker_id, operation = %operation.name, "dispatched");
        let name = operation.name.clone();

        // Simulate one unit of work, re-petting the poll watchdog
        // partway through, then report a successful result.
        tokio::time::sleep(poll_interval).await;
        scheduler.poll(&name, remex_core::Stage::Executing).await;
        tokio::time::sleep(poll_interval).await;
        if let Some(current) = scheduler.get_operation(&name).await {
            let done = current.complete(ExecuteResult::Success {
                output_digest: None,
            });
            scheduler.put_operation(done).await;
        }
    }
}

#[cfg(test)]
#[path = "demo_tests.rs"]
mod tests;
