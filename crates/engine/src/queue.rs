// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The dispatch queue, the parked-worker pool, and the matcher pairing
//! them.
//!
//! Both FIFOs are guarded by a single monitor so the match protocol is
//! atomic: a compatible worker parked just after an operation is
//! enqueued (or vice versa) must not be lost. `parking_lot::Mutex` is
//! used as the monitor; `on_match` runs while it is held rather than
//! after releasing it, so a worker and an operation can never both
//! observe each other as available and race to claim something that's
//! already gone.

use parking_lot::Mutex;
use remex_core::{Operation, Platform};
use std::collections::VecDeque;

/// A queued operation plus the platform its command requires.
#[derive(Clone)]
pub struct QueueEntry {
    pub operation: Operation,
    pub required_platform: Platform,
}

/// A single-use worker offer. `on_match` is invoked with a candidate
/// operation at most once; its return value signals dispatch acceptance.
pub struct WorkerOffer {
    pub platform: Platform,
    pub on_match: Box<dyn FnOnce(Operation) -> bool + Send>,
}

#[derive(Default)]
struct State {
    queued: VecDeque<QueueEntry>,
    workers: Vec<WorkerOffer>,
}

pub enum EnqueueOutcome {
    /// A parked worker accepted the operation immediately.
    Dispatched(Operation),
    /// No viable worker; the operation was pushed onto the queue tail.
    Queued,
}

pub enum OfferOutcome {
    /// A queued operation accepted the dispatch.
    Dispatched(Operation),
    /// A satisfying operation was found but its `on_match` declined; it
    /// has been removed from the queue and must be re-enqueued by the
    /// caller via the standard requeue path (preserves watcher
    /// delivery). The worker itself is *not* parked.
    Declined(QueueEntry),
    /// No queued operation satisfies this platform; the offer is parked.
    Parked,
}

/// Pairs offered platforms against pending operations under platform
/// satisfaction constraints. Fairness: FIFO on both sides, first
/// satisfying pair wins, no priority.
#[derive(Default)]
pub struct Matcher {
    state: Mutex<State>,
}

impl Matcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attempts immediate dispatch by scanning parked workers in offer
    /// order. The first worker whose platform satisfies `entry`'s
    /// command is offered it. An inviable worker (`on_match` returns
    /// false) is discarded, not re-parked; a worker whose platform
    /// doesn't satisfy is set aside and re-parked after the scan so
    /// order among the untouched offers is preserved.
    pub fn enqueue(&self, entry: QueueEntry) -> EnqueueOutcome {
        let mut state = self.state.lock();
        let mut set_aside = Vec::new();
        let mut dispatched = None;

        while let Some(offer) = pop_first(&mut state.workers) {
            if offer.platform.satisfies(&entry.required_platform) {
                if (offer.on_match)(entry.operation.clone()) {
                    dispatched = Some(entry.operation.clone());
                    break;
                }
                // Inviable: discarded, scan continues.
            } else {
                set_aside.push(offer);
            }
        }
        state.workers.splice(0..0, set_aside);

        match dispatched {
            Some(op) => EnqueueOutcome::Dispatched(op),
            None => {
                state.queued.push_back(entry);
                EnqueueOutcome::Queued
            }
        }
    }

    /// Scans queued operations in FIFO order for the first one whose
    /// required platform is satisfied by `platform`. That operation is
    /// removed from the queue either way the callback decides; if no
    /// operation satisfies, the offer is parked.
    pub fn offer(&self, platform: Platform, on_match: Box<dyn FnOnce(Operation) -> bool + Send>) -> OfferOutcome {
        let mut state = self.state.lock();
        let idx = state
            .queued
            .iter()
            .position(|e| platform.satisfies(&e.required_platform));

        let Some(idx) = idx else {
            state.workers.push(WorkerOffer { platform, on_match });
            return OfferOutcome::Parked;
        };

        let Some(entry) = state.queued.remove(idx) else {
            // `idx` came from `position()` against this same deque with
            // no intervening mutation; this branch is unreachable in
            // practice, but we still park the offer rather than assume
            // it away and drop it on the floor.
            state.workers.push(WorkerOffer { platform, on_match });
            return OfferOutcome::Parked;
        };

        if on_match(entry.operation.clone()) {
            OfferOutcome::Dispatched(entry.operation)
        } else {
            OfferOutcome::Declined(entry)
        }
    }

    /// Pushes `entry` onto the queue tail without attempting a match
    /// (the "standard requeue path", used by poll-watchdog expiry and by
    /// the decline path above).
    pub fn requeue(&self, entry: QueueEntry) {
        self.state.lock().queued.push_back(entry);
    }

    pub fn queue_len(&self) -> usize {
        self.state.lock().queued.len()
    }

    pub fn parked_worker_count(&self) -> usize {
        self.state.lock().workers.len()
    }
}

fn pop_first(workers: &mut Vec<WorkerOffer>) -> Option<WorkerOffer> {
    if workers.is_empty() {
        None
    } else {
        Some(workers.remove(0))
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
