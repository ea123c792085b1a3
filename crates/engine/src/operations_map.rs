// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A name-keyed, key-ordered store of in-flight operations. Backed by
//! a `BTreeMap` under a single lock — iteration always observes either
//! the prior or new snapshot of the whole map, never a torn read,
//! because every read clones the map it needs.

use parking_lot::RwLock;
use remex_core::{Operation, OperationName, Platform};
use std::collections::BTreeMap;

/// An in-flight operation plus the platform its command requires. The
/// platform is cached here so a later requeue (poll-watchdog expiry, or
/// a worker declining a dispatch) doesn't need a second CAS round trip.
#[derive(Debug, Clone)]
pub struct OperationEntry {
    pub operation: Operation,
    pub required_platform: Platform,
}

#[derive(Default)]
pub struct OperationsMap {
    inner: RwLock<BTreeMap<OperationName, OperationEntry>>,
}

impl OperationsMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&self, entry: OperationEntry) {
        self.inner.write().insert(entry.operation.name.clone(), entry);
    }

    pub fn get(&self, name: &OperationName) -> Option<OperationEntry> {
        self.inner.read().get(name).cloned()
    }

    pub fn contains(&self, name: &OperationName) -> bool {
        self.inner.read().contains_key(name)
    }

    pub fn remove(&self, name: &OperationName) -> Option<OperationEntry> {
        self.inner.write().remove(name)
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// A consistent, key-ordered snapshot for pagination and listing.
    /// Cloning under the read lock means callers never observe a torn
    /// view across concurrent mutations.
    pub fn snapshot(&self) -> Vec<OperationEntry> {
        self.inner.read().values().cloned().collect()
    }
}

#[cfg(test)]
#[path = "operations_map_tests.rs"]
mod tests;
