// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! remex-core: data model for the remote execution scheduler core.
//!
//! This crate defines the content-addressed types (`Digest`, `Action`,
//! `Command`, `Platform`) and the runtime operation record (`Operation`)
//! that the scheduler engine (`remex-engine`) mutates. It carries no I/O
//! and no concurrency primitives of its own.

pub mod action;
pub mod digest;
pub mod error;
pub mod id;
pub mod operation;
pub mod platform;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod timeout;

pub use action::{Action, Command};
pub use digest::Digest;
pub use error::PreconditionViolation;
pub use id::{IdGen, SequentialIdGen, ShortId, UuidIdGen};
pub use operation::{ExecuteResult, Operation, OperationName, Stage};
pub use platform::Platform;
pub use timeout::Timeout;
