// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A multimap `opName -> set<Watcher>`.
//!
//! A watcher is a predicate over successive snapshots of one operation.
//! Returning `false` means "done processing, deregister me" — not
//! failure; we spell that out as [`WatcherDecision`].

use parking_lot::Mutex;
use remex_core::{Operation, OperationName};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// `Continue` keeps the watcher registered; `Done` deregisters it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatcherDecision {
    Continue,
    Done,
}

impl From<bool> for WatcherDecision {
    fn from(keep_watching: bool) -> Self {
        if keep_watching {
            WatcherDecision::Continue
        } else {
            WatcherDecision::Done
        }
    }
}

pub type WatcherFn = dyn Fn(Option<&Operation>) -> WatcherDecision + Send + Sync;

struct Entry {
    id: u64,
    predicate: Arc<WatcherFn>,
}

/// Per-name watcher sets. Reads/writes across different names do not
/// interfere; same-name updates serialise.
#[derive(Default)]
pub struct WatcherRegistry {
    by_name: Mutex<HashMap<OperationName, Vec<Entry>>>,
    next_id: AtomicU64,
}

impl WatcherRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `predicate` under `name`, returning an id usable with
    /// [`WatcherRegistry::remove`].
    pub fn put(&self, name: &OperationName, predicate: Arc<WatcherFn>) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.by_name
            .lock()
            .entry(name.clone())
            .or_default()
            .push(Entry { id, predicate });
        id
    }

    pub fn remove(&self, name: &OperationName, id: u64) {
        let mut guard = self.by_name.lock();
        if let Some(entries) = guard.get_mut(name) {
            entries.retain(|e| e.id != id);
            if entries.is_empty() {
                guard.remove(name);
            }
        }
    }

    /// Drops every watcher registered under `name` (used on terminal
    /// delivery).
    pub fn clear(&self, name: &OperationName) {
        self.by_name.lock().remove(name);
    }

    pub fn count(&self, name: &OperationName) -> usize {
        self.by_name.lock().get(name).map_or(0, Vec::len)
    }

    /// Snapshot of the watchers currently registered under `name`, for
    /// fan-out. Evaluating predicates happens outside the lock.
    pub fn snapshot(&self, name: &OperationName) -> Vec<(u64, Arc<WatcherFn>)> {
        self.by_name
            .lock()
            .get(name)
            .map(|entries| entries.iter().map(|e| (e.id, e.predicate.clone())).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
#[path = "watcher_tests.rs"]
mod tests;
