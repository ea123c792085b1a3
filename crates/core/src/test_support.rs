// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test fixtures for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{Action, Command, Digest, Operation, OperationName, Platform};

pub fn linux_command() -> Command {
    Command::new(vec!["true".to_string()], Platform::new().with("os", "linux"))
}

pub fn any_command() -> Command {
    Command::new(vec!["true".to_string()], Platform::new())
}

pub fn action_digest(seed: &str) -> Digest {
    Digest::of_bytes(seed.as_bytes())
}

pub fn queued_operation(seed: &str) -> Operation {
    Operation::queued(OperationName::generate(seed), action_digest(seed))
}

pub fn test_action(command_digest: Digest) -> Action {
    Action::new(command_digest, Digest::of_bytes(b"input-root"))
}
