// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test doubles for `remex-engine` and its dependents.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::cas::{ActionResolver, CompletedOperations};
use async_trait::async_trait;
use parking_lot::Mutex;
use remex_core::{Action, Command, Digest, Operation, OperationName, Platform};
use std::collections::HashMap;
use std::sync::Arc;

/// An in-memory `ActionResolver` pre-loaded with fixed actions/commands,
/// keyed by digest, for deterministic tests.
#[derive(Default)]
pub struct FakeResolver {
    actions: Mutex<HashMap<Digest, Action>>,
    commands: Mutex<HashMap<Digest, Command>>,
}

impl FakeResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_action_and_command(
        self,
        action_digest: Digest,
        action: Action,
        command: Command,
    ) -> Self {
        self.actions.lock().insert(action_digest, action.clone());
        self.commands.lock().insert(action.command_digest, command);
        self
    }
}

#[async_trait]
impl ActionResolver for FakeResolver {
    async fn get_action(&self, digest: &Digest) -> Option<Action> {
        self.actions.lock().get(digest).cloned()
    }

    async fn get_command(&self, digest: &Digest) -> Option<Command> {
        self.commands.lock().get(digest).cloned()
    }
}

/// Builds a ready-to-submit `(action_digest, resolver)` pair for a
/// command with the given platform requirement and optional timeout.
pub fn fixture(platform: Platform, timeout: Option<remex_core::Timeout>) -> (Digest, Arc<FakeResolver>) {
    let command = Command::new(vec!["true".to_string()], platform);
    let command_bytes = format!("{:?}", command.arguments).into_bytes();
    let command_digest = Digest::of_bytes(&command_bytes);
    let mut action = Action::new(command_digest, Digest::of_bytes(b"input-root"));
    if let Some(t) = timeout {
        action = action.with_timeout(t);
    }
    let action_digest = Digest::of_bytes(format!("{:?}", action).as_bytes());
    let resolver = Arc::new(FakeResolver::new().with_action_and_command(
        action_digest.clone(),
        action,
        command,
    ));
    (action_digest, resolver)
}

/// A completed-operations archive backed by a plain `HashMap`, standing
/// in for `remex-adapters`'s delegate-CAS-backed implementation.
#[derive(Default)]
pub struct FakeArchive {
    inner: Mutex<HashMap<OperationName, Operation>>,
}

impl FakeArchive {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

#[async_trait]
impl CompletedOperations for FakeArchive {
    async fn archive(&self, operation: Operation) {
        self.inner.lock().insert(operation.name.clone(), operation);
    }

    async fn get(&self, name: &OperationName) -> Option<Operation> {
        self.inner.lock().get(name).cloned()
    }
}
