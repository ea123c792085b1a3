// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A CAS-backed `ActionResolver`: actions and commands live in CAS as
//! JSON-serialized blobs, keyed by the digest of their own bytes, per
//! REAPI convention. This is the typed layer the engine's `cas::ActionResolver`
//! trait expects sitting over the raw byte store.

use async_trait::async_trait;
use remex_core::{Action, Command, Digest};
use remex_engine::{ActionResolver, Cas};
use std::sync::Arc;
use tracing::warn;

pub struct CasActionResolver {
    cas: Arc<dyn Cas>,
}

impl CasActionResolver {
    pub fn new(cas: Arc<dyn Cas>) -> Self {
        Self { cas }
    }

    /// Serializes and uploads an action, returning its digest. A
    /// convenience for clients assembling a submission out-of-band of
    /// the scheduler itself.
    #[allow(clippy::expect_used)]
    pub async fn put_action(&self, action: &Action) -> Digest {
        let bytes = serde_json::to_vec(action).expect("Action has no fallible Serialize impl");
        self.cas.put(bytes).await
    }

    /// Serializes and uploads a command, returning its digest.
    #[allow(clippy::expect_used)]
    pub async fn put_command(&self, command: &Command) -> Digest {
        let bytes = serde_json::to_vec(command).expect("Command has no fallible Serialize impl");
        self.cas.put(bytes).await
    }
}

#[async_trait]
impl ActionResolver for CasActionResolver {
    async fn get_action(&self, digest: &Digest) -> Option<Action> {
        let bytes = self.cas.get(digest).await?;
        match serde_json::from_slice(&bytes) {
            Ok(action) => Some(action),
            Err(err) => {
                warn!(%digest, error = %err, "malformed action blob in CAS");
                None
            }
        }
    }

    async fn get_command(&self, digest: &Digest) -> Option<Command> {
        let bytes = self.cas.get(digest).await?;
        match serde_json::from_slice(&bytes) {
            Ok(command) => Some(command),
            Err(err) => {
                warn!(%digest, error = %err, "malformed command blob in CAS");
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
