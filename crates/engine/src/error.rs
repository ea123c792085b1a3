// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the scheduler engine.

use remex_core::PreconditionViolation;
use thiserror::Error;

/// Failure disposition for `accept` (submitting an action for execution).
#[derive(Debug, Error)]
pub enum AcceptError {
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] PreconditionViolation),
    #[error("missing referent: {0}")]
    MissingReferent(String),
}

/// Failure disposition for `list_operations`.
#[derive(Debug, Error)]
pub enum PageTokenError {
    #[error("malformed page token: {0}")]
    Malformed(String),
}
