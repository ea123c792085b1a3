// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Named byte-stream sinks, keyed by an operation-derived stream name.
//! Used for the byte-stream-adjacent progress a worker can attach to a
//! running operation (stdout/stderr tails, for instance) without that
//! wire protocol itself being implemented here.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Notify;

/// A named, append-only byte sink plus a closed-future.
pub struct StreamSource {
    name: String,
    buffer: Mutex<Vec<u8>>,
    closed: Mutex<bool>,
    closed_notify: Notify,
    on_close: Mutex<Option<Box<dyn FnOnce(&str) + Send>>>,
}

impl StreamSource {
    fn new(name: String) -> Self {
        Self {
            name,
            buffer: Mutex::new(Vec::new()),
            closed: Mutex::new(false),
            closed_notify: Notify::new(),
            on_close: Mutex::new(None),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn committed_size(&self) -> usize {
        self.buffer.lock().len()
    }

    pub fn is_closed(&self) -> bool {
        *self.closed.lock()
    }

    /// Appends to the sink. A no-op once closed.
    pub fn append(&self, bytes: &[u8]) {
        if self.is_closed() {
            return;
        }
        self.buffer.lock().extend_from_slice(bytes);
    }

    /// Opens a fresh read of the committed bytes, skipping to `offset`.
    pub fn output_stream(&self, offset: usize) -> Vec<u8> {
        let buf = self.buffer.lock();
        if offset >= buf.len() {
            Vec::new()
        } else {
            buf[offset..].to_vec()
        }
    }

    /// Closes the sink, waking anyone awaiting `closed_future`, and
    /// invokes the registry's removal hook exactly once.
    pub fn close(&self) {
        let mut closed = self.closed.lock();
        if *closed {
            return;
        }
        *closed = true;
        drop(closed);
        self.closed_notify.notify_waiters();
        if let Some(hook) = self.on_close.lock().take() {
            hook(&self.name);
        }
    }

    /// Resolves once `close` has been called.
    pub async fn closed_future(&self) {
        if self.is_closed() {
            return;
        }
        self.closed_notify.notified().await;
    }

    fn set_on_close(&self, hook: Box<dyn FnOnce(&str) + Send>) {
        *self.on_close.lock() = Some(hook);
    }
}

/// `name -> source`, get-or-create, with a `reset` that drops an entry
/// outright.
#[derive(Default)]
pub struct StreamRegistry {
    streams: Mutex<HashMap<String, Arc<StreamSource>>>,
}

impl StreamRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the source for `name`, creating it if absent.
    pub fn get_source(self: &Arc<Self>, name: impl Into<String>) -> Arc<StreamSource> {
        let name = name.into();
        let mut guard = self.streams.lock();
        if let Some(existing) = guard.get(&name) {
            return existing.clone();
        }
        let source = Arc::new(StreamSource::new(name.clone()));
        let registry = self.clone();
        source.set_on_close(Box::new(move |closed_name| {
            registry.streams.lock().remove(closed_name);
        }));
        guard.insert(name, source.clone());
        source
    }

    /// Drops the entry for `name` without closing its sink.
    pub fn reset(&self, name: &str) {
        self.streams.lock().remove(name);
    }

    pub fn len(&self) -> usize {
        self.streams.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.streams.lock().is_empty()
    }
}

#[cfg(test)]
#[path = "stream_registry_tests.rs"]
mod tests;
