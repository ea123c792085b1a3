// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `Operation`: the runtime record tracking one action through its
//! lifecycle. Mutated exclusively by the lifecycle controller in
//! `remex-engine`; this crate only defines its shape.

use crate::digest::Digest;
use serde::{Deserialize, Serialize};

crate::define_id! {
    /// Operation identity, formatted `operations/<uuid>`.
    pub struct OperationName;
}

impl OperationName {
    pub fn generate(id: impl Into<String>) -> Self {
        Self::new(format!("operations/{}", id.into()))
    }
}

/// Execution stage, mirroring the REAPI `ExecutionStage.Value` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    Unknown,
    CacheCheck,
    Queued,
    Executing,
    Completed,
}

impl Stage {
    pub fn is_terminal(self) -> bool {
        matches!(self, Stage::Completed)
    }
}

/// Outcome installed on an operation once it reaches `Completed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecuteResult {
    Success { output_digest: Option<Digest> },
    Failure { message: String },
    Timeout { message: String },
}

impl ExecuteResult {
    pub fn is_failure(&self) -> bool {
        !matches!(self, ExecuteResult::Success { .. })
    }
}

/// The operation record itself.
///
/// Invariant: `done` implies `stage == Completed` and implies no
/// watchdog remains registered under `name` — the engine enforces the
/// second half; this type only enforces the first by construction (see
/// `Operation::complete`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    pub name: OperationName,
    pub action_digest: Digest,
    pub stage: Stage,
    pub done: bool,
    pub result: Option<ExecuteResult>,
}

impl Operation {
    pub fn queued(name: OperationName, action_digest: Digest) -> Self {
        Self {
            name,
            action_digest,
            stage: Stage::Queued,
            done: false,
            result: None,
        }
    }

    pub fn executing(&self) -> Self {
        Self {
            stage: Stage::Executing,
            ..self.clone()
        }
    }

    pub fn requeued(&self) -> Self {
        Self {
            stage: Stage::Queued,
            ..self.clone()
        }
    }

    pub fn complete(&self, result: ExecuteResult) -> Self {
        Self {
            stage: Stage::Completed,
            done: true,
            result: Some(result),
            ..self.clone()
        }
    }
}

#[cfg(test)]
#[path = "operation_tests.rs"]
mod tests;
