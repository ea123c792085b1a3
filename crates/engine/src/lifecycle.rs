// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The lifecycle controller: the single owner of operation state
//! transitions, watchdog installation/teardown, and watcher fan-out.
//!
//! `Scheduler` ties together the operations map, watcher registry,
//! matcher, and the watchdog fabric into the `QUEUED -> EXECUTING ->
//! COMPLETED` state machine.

use crate::cas::{ActionResolver, CompletedOperations};
use crate::config::SchedulerConfig;
use crate::error::{AcceptError, PageTokenError};
use crate::operations_map::{OperationEntry, OperationsMap};
use crate::page_token;
use crate::queue::{EnqueueOutcome, Matcher, OfferOutcome, QueueEntry};
use crate::watchdog::Watchdog;
use crate::watcher::{WatcherDecision, WatcherFn, WatcherRegistry};
use parking_lot::Mutex;
use remex_core::{Digest, ExecuteResult, IdGen, Operation, OperationName, Platform, Stage};
use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Default)]
struct WatchdogPair {
    poll: Option<Watchdog>,
    completion: Option<Watchdog>,
}

impl WatchdogPair {
    fn stop_all(&self) {
        if let Some(w) = &self.poll {
            w.stop();
        }
        if let Some(w) = &self.completion {
            w.stop();
        }
    }
}

pub struct Scheduler {
    config: SchedulerConfig,
    resolver: Arc<dyn ActionResolver>,
    archive: Option<Arc<dyn CompletedOperations>>,
    id_gen: Arc<dyn IdGen>,
    operations: OperationsMap,
    watchers: WatcherRegistry,
    matcher: Matcher,
    watchdogs: Mutex<HashMap<OperationName, WatchdogPair>>,
}

impl Scheduler {
    pub fn new(
        config: SchedulerConfig,
        resolver: Arc<dyn ActionResolver>,
        archive: Option<Arc<dyn CompletedOperations>>,
        id_gen: Arc<dyn IdGen>,
    ) -> Arc<Self> {
        Arc::new(Self {
            config,
            resolver,
            archive,
            id_gen,
            operations: OperationsMap::new(),
            watchers: WatcherRegistry::new(),
            matcher: Matcher::new(),
            watchdogs: Mutex::new(HashMap::new()),
        })
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    // ---- accept(action) : — -> QUEUED -----------------------------------

    pub async fn accept(self: &Arc<Self>, action_digest: Digest) -> Result<OperationName, AcceptError> {
        let action = self
            .resolver
            .get_action(&action_digest)
            .await
            .ok_or_else(|| AcceptError::MissingReferent(format!("action {action_digest}")))?;
        let command = self
            .resolver
            .get_command(&action.command_digest)
            .await
            .ok_or_else(|| AcceptError::MissingReferent(format!("command {}", action.command_digest)))?;

        if let Some(timeout) = action.timeout {
            if timeout > self.config.maximum_action_timeout {
                return Err(remex_core::PreconditionViolation::timeout_out_of_bounds(
                    timeout,
                    self.config.maximum_action_timeout,
                )
                .into());
            }
        }

        let name = OperationName::generate(self.id_gen.next());
        let operation = Operation::queued(name.clone(), action_digest);
        self.operations.put(OperationEntry {
            operation: operation.clone(),
            required_platform: command.platform.clone(),
        });
        self.fan_out(&name, &operation).await;
        debug!(operation = %name, "accepted action");

        match self.matcher.enqueue(QueueEntry {
            operation: operation.clone(),
            required_platform: command.platform,
        }) {
            EnqueueOutcome::Dispatched(dispatched) => {
                self.dispatch(dispatched).await;
            }
            EnqueueOutcome::Queued => {}
        }

        Ok(name)
    }

    // ---- match(platform, onMatch) : the worker-side entry ----------------

    /// Offers `platform`; `on_match` is invoked at most once with a
    /// candidate operation. Returns the dispatched operation, or `None`
    /// if the offer was parked or its candidate declined — a declined
    /// offer is not retried automatically against this same offer.
    pub async fn match_platform(
        self: &Arc<Self>,
        platform: Platform,
        on_match: Box<dyn FnOnce(Operation) -> bool + Send>,
    ) -> Option<Operation> {
        match self.matcher.offer(platform, on_match) {
            OfferOutcome::Dispatched(op) => {
                self.dispatch(op.clone()).await;
                Some(op)
            }
            OfferOutcome::Declined(entry) => {
                self.matcher.requeue(entry);
                None
            }
            OfferOutcome::Parked => None,
        }
    }

    /// Installs the poll and completion watchdogs for a freshly
    /// dispatched operation and transitions it to `Executing`.
    async fn dispatch(self: &Arc<Self>, operation: Operation) {
        let name = operation.name.clone();
        let Some(entry) = self.operations.get(&name) else {
            warn!(operation = %name, "dispatched operation vanished from in-flight map");
            return;
        };
        let action = self.resolver.get_action(&operation.action_digest).await;
        let Some(action) = action else {
            // The action digest is unresolvable at dispatch time: leave
            // the operation queued rather than silently dropping it.
            warn!(operation = %name, "action unresolvable at dispatch, leaving queued");
            self.matcher.requeue(QueueEntry {
                operation: entry.operation,
                required_platform: entry.required_platform,
            });
            return;
        };

        let executing = operation.executing();
        self.operations.put(OperationEntry {
            operation: executing.clone(),
            required_platform: entry.required_platform,
        });

        let poll_watchdog = {
            let scheduler = self.clone();
            let name = name.clone();
            Watchdog::start(self.config.operation_poll_timeout, move || {
                tokio::spawn(async move { scheduler.on_poll_expired(name).await });
            })
        };
        let completion_watchdog = self
            .config
            .completion_watchdog_interval(action.timeout)
            .map(|interval| {
                let scheduler = self.clone();
                let name = name.clone();
                Watchdog::start(interval, move || {
                    tokio::spawn(async move { scheduler.on_completion_expired(name).await });
                })
            });

        let mut guard = self.watchdogs.lock();
        if let Some(previous) = guard.insert(
            name.clone(),
            WatchdogPair {
                poll: Some(poll_watchdog),
                completion: completion_watchdog,
            },
        ) {
            // Stop the previous pair explicitly so a replacement
            // install can never race a stale expiration.
            previous.stop_all();
        }
        drop(guard);

        self.fan_out(&name, &executing).await;
    }

    // ---- poll(name, stage) : EXECUTING -> EXECUTING ----------------------

    pub async fn poll(&self, name: &OperationName, stage: Stage) -> bool {
        if stage != Stage::Executing {
            return false;
        }
        let Some(entry) = self.operations.get(name) else {
            return false;
        };
        if entry.operation.stage != Stage::Executing {
            return false;
        }
        let guard = self.watchdogs.lock();
        match guard.get(name).and_then(|p| p.poll.as_ref()) {
            Some(watchdog) => {
                watchdog.pet();
                true
            }
            None => false,
        }
    }

    // ---- putOperation(operation) -----------------------------------------

    pub async fn put_operation(self: &Arc<Self>, updated: Operation) -> bool {
        let name = updated.name.clone();
        let Some(entry) = self.operations.get(&name) else {
            return false;
        };

        if updated.done {
            self.complete(name, updated).await;
            return true;
        }

        self.operations.put(OperationEntry {
            operation: updated.clone(),
            required_platform: entry.required_platform,
        });

        let mut guard = self.watchdogs.lock();
        let pair = guard.entry(name.clone()).or_default();
        if let Some(poll) = &pair.poll {
            poll.pet();
        } else {
            let scheduler = self.clone();
            let watch_name = name.clone();
            pair.poll = Some(Watchdog::start(self.config.operation_poll_timeout, move || {
                tokio::spawn(async move { scheduler.on_poll_expired(watch_name).await });
            }));
        }
        drop(guard);

        self.fan_out(&name, &updated).await;
        true
    }

    async fn complete(self: &Arc<Self>, name: OperationName, done_operation: Operation) {
        if let Some(pair) = self.watchdogs.lock().remove(&name) {
            pair.stop_all();
        }
        self.operations.remove(&name);
        if let Some(archive) = &self.archive {
            archive.archive(done_operation.clone()).await;
        }
        self.fan_out(&name, &done_operation).await;
        self.watchers.clear(&name);
    }

    // ---- watchdog expirations ---------------------------------------------

    async fn on_poll_expired(self: Arc<Self>, name: OperationName) {
        let Some(entry) = self.operations.get(&name) else {
            return;
        };
        let requeued = entry.operation.requeued();
        self.operations.put(OperationEntry {
            operation: requeued.clone(),
            required_platform: entry.required_platform.clone(),
        });
        self.matcher.requeue(QueueEntry {
            operation: requeued.clone(),
            required_platform: entry.required_platform,
        });
        if let Some(pair) = self.watchdogs.lock().remove(&name) {
            pair.stop_all();
        }
        debug!(operation = %name, "poll watchdog expired, requeued");
        self.fan_out(&name, &requeued).await;
    }

    async fn on_completion_expired(self: Arc<Self>, name: OperationName) {
        let Some(entry) = self.operations.get(&name) else {
            return;
        };
        let done = entry.operation.complete(ExecuteResult::Timeout {
            message: "action exceeded its completion deadline".to_string(),
        });
        warn!(operation = %name, "completion watchdog expired");
        self.complete(name, done).await;
    }

    // ---- getOperation / listOperations -------------------------------------

    pub async fn get_operation(&self, name: &OperationName) -> Option<Operation> {
        if let Some(entry) = self.operations.get(name) {
            return Some(entry.operation);
        }
        if let Some(archive) = &self.archive {
            return archive.get(name).await;
        }
        None
    }

    pub fn list_operations(
        &self,
        page_token: &str,
        page_size: usize,
    ) -> Result<(Vec<Operation>, String), PageTokenError> {
        let effective = if page_size == 0 {
            self.config.list_operations_default_page_size
        } else {
            page_size.min(self.config.list_operations_max_page_size)
        };
        let snapshot = self.operations.snapshot();
        let page = page_token::list_page(&snapshot, page_token, effective)?;
        Ok((page.operations, page.next_page_token))
    }

    // ---- watch(name, pred) : at-least-once registration --------------------

    pub async fn watch(self: &Arc<Self>, name: OperationName, pred: Arc<WatcherFn>) -> bool {
        let current = self.get_operation(&name).await;
        let decision = invoke(&pred, current.as_ref());
        if decision != WatcherDecision::Continue {
            return true;
        }
        let gone_or_done = current.as_ref().map_or(true, |op| op.done);
        if gone_or_done {
            return false;
        }

        let id = self.watchers.put(&name, pred.clone());
        let recheck = self.get_operation(&name).await;
        let recheck_gone_or_done = recheck.as_ref().map_or(true, |op| op.done);
        if recheck_gone_or_done {
            let keep = invoke(&pred, recheck.as_ref()) == WatcherDecision::Continue;
            self.watchers.remove(&name, id);
            return keep;
        }
        true
    }

    /// Fans out `operation` to every watcher registered under `name`.
    /// Fire-and-forget: each evaluation runs on its own task so a slow
    /// or misbehaving client callback cannot stall the transition that
    /// triggered it.
    async fn fan_out(self: &Arc<Self>, name: &OperationName, operation: &Operation) {
        for (id, predicate) in self.watchers.snapshot(name) {
            let scheduler = self.clone();
            let name = name.clone();
            let op = operation.clone();
            tokio::spawn(async move {
                let keep = invoke(&predicate, Some(&op)) == WatcherDecision::Continue && !op.done;
                if !keep {
                    scheduler.watchers.remove(&name, id);
                }
            });
        }
    }
}

/// Evaluates a watcher predicate, swallowing panics as a `Done`
/// decision: a failing predicate is treated as "deregister me", not
/// propagated.
fn invoke(pred: &WatcherFn, operation: Option<&Operation>) -> WatcherDecision {
    std::panic::catch_unwind(AssertUnwindSafe(|| pred(operation))).unwrap_or(WatcherDecision::Done)
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
