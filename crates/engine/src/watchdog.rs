// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A one-shot, re-armable inactivity timer.
//!
//! Modeled as a cooperatively-scheduled task rather than a
//! thread-per-watchdog, since thousands may be in flight at once. `pet`
//! and `stop` are idempotent; both are no-ops once the watchdog has fired.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Armed,
    Stopped,
}

struct Shared {
    phase: Mutex<Phase>,
    pet: Notify,
    stop: Notify,
}

/// A live watchdog handle. Dropping the handle does not stop the
/// watchdog; call [`Watchdog::stop`] explicitly.
pub struct Watchdog {
    shared: Arc<Shared>,
}

impl Watchdog {
    /// Starts a watchdog that invokes `on_expire` exactly once, after
    /// `timeout` elapses without an intervening `pet()`.
    pub fn start<F>(timeout: Duration, on_expire: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let shared = Arc::new(Shared {
            phase: Mutex::new(Phase::Armed),
            pet: Notify::new(),
            stop: Notify::new(),
        });
        let task_shared = shared.clone();
        tokio::spawn(async move {
            let mut deadline = Instant::now() + timeout;
            loop {
                tokio::select! {
                    _ = tokio::time::sleep_until(deadline) => {
                        let mut phase = task_shared.phase.lock();
                        let fire = *phase == Phase::Armed;
                        if fire {
                            *phase = Phase::Stopped;
                        }
                        drop(phase);
                        if fire {
                            on_expire();
                        }
                        break;
                    }
                    _ = task_shared.pet.notified() => {
                        if *task_shared.phase.lock() != Phase::Armed {
                            break;
                        }
                        deadline = Instant::now() + timeout;
                    }
                    _ = task_shared.stop.notified() => {
                        break;
                    }
                }
            }
        });
        Self { shared }
    }

    /// Resets the remaining interval. No-op once fired or stopped.
    pub fn pet(&self) {
        let mut phase = self.shared.phase.lock();
        if *phase == Phase::Armed {
            drop(phase);
            self.shared.pet.notify_one();
        }
    }

    /// Disarms the watchdog. No-op once fired or already stopped.
    pub fn stop(&self) {
        let mut phase = self.shared.phase.lock();
        if *phase == Phase::Armed {
            *phase = Phase::Stopped;
            drop(phase);
            self.shared.stop.notify_one();
        }
    }

    pub fn is_armed(&self) -> bool {
        *self.shared.phase.lock() == Phase::Armed
    }
}

#[cfg(test)]
#[path = "watchdog_tests.rs"]
mod tests;
