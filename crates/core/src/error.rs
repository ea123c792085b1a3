// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the core data model. Engine-level failures (match,
//! watchdog, watcher fan-out) live in `remex-engine::error`.

use crate::timeout::Timeout;
use thiserror::Error;

/// A precondition-failure violation, surfaced to callers when an action
/// is rejected at accept time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{subject}: {description}")]
pub struct PreconditionViolation {
    pub subject: String,
    pub description: String,
}

impl PreconditionViolation {
    pub fn timeout_out_of_bounds(requested: Timeout, maximum: Timeout) -> Self {
        Self {
            subject: "timeout out of bounds".to_string(),
            description: format!(
                "requested timeout {}.{:09}s exceeds maximum {}.{:09}s",
                requested.seconds, requested.nanos, maximum.seconds, maximum.nanos
            ),
        }
    }
}
