// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `Action` and `Command`: the content-addressed descriptors a client
//! submits for execution. Both are immutable once obtained by digest
//! lookup from CAS.

use crate::digest::Digest;
use crate::platform::Platform;
use crate::timeout::Timeout;
use serde::{Deserialize, Serialize};

/// A unit of work: a command digest, an input-root digest, and optional
/// execution parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub command_digest: Digest,
    pub input_root_digest: Digest,
    pub timeout: Option<Timeout>,
    pub do_not_cache: bool,
}

impl Action {
    pub fn new(command_digest: Digest, input_root_digest: Digest) -> Self {
        Self {
            command_digest,
            input_root_digest,
            timeout: None,
            do_not_cache: false,
        }
    }

    pub fn with_timeout(mut self, timeout: Timeout) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// The command a worker executes; carries the platform requirements used
/// for matching.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Command {
    pub arguments: Vec<String>,
    pub platform: Platform,
}

impl Command {
    pub fn new(arguments: Vec<String>, platform: Platform) -> Self {
        Self {
            arguments,
            platform,
        }
    }
}
