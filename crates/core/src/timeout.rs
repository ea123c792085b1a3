// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `Timeout`: a `(seconds, nanos)` duration compared lexicographically,
//! matching protobuf `Duration` ordering.

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timeout {
    pub seconds: i64,
    pub nanos: i32,
}

impl Timeout {
    pub fn new(seconds: i64, nanos: i32) -> Self {
        Self { seconds, nanos }
    }

    pub fn from_secs(seconds: u64) -> Self {
        Self {
            seconds: seconds as i64,
            nanos: 0,
        }
    }
}

impl From<Timeout> for Duration {
    fn from(t: Timeout) -> Duration {
        Duration::new(t.seconds.max(0) as u64, t.nanos.max(0) as u32)
    }
}

impl From<Duration> for Timeout {
    fn from(d: Duration) -> Timeout {
        Timeout {
            seconds: d.as_secs() as i64,
            nanos: d.subsec_nanos() as i32,
        }
    }
}

#[cfg(test)]
#[path = "timeout_tests.rs"]
mod tests;
