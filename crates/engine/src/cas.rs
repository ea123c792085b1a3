// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Collaborator traits consumed from outside the core: the
//! Content-Addressable Storage and Action Cache. The scheduler only
//! ever talks to these through the trait object, so a gRPC remote CAS
//! and an in-process CAS would be interchangeable bindings (only the
//! in-process one, in `remex-adapters`, is implemented here).

use async_trait::async_trait;
use remex_core::{Action, Command, Digest, ExecuteResult, Operation, OperationName};

/// Content-addressable blob store.
#[async_trait]
pub trait Cas: Send + Sync {
    async fn put(&self, bytes: Vec<u8>) -> Digest;
    async fn get(&self, digest: &Digest) -> Option<Vec<u8>>;
}

/// Resolves actions and commands by digest. A thin typed layer over
/// [`Cas`] so the engine doesn't do its own (de)serialization.
#[async_trait]
pub trait ActionResolver: Send + Sync {
    async fn get_action(&self, digest: &Digest) -> Option<Action>;
    async fn get_command(&self, digest: &Digest) -> Option<Command>;
}

/// Action cache: `actionKey -> result`. A remote gRPC cache is the
/// production binding for this trait; `remex-adapters` implements only
/// the in-process delegate-CAS-backed one.
#[async_trait]
pub trait ActionCache: Send + Sync {
    async fn get(&self, action_digest: &Digest) -> Option<ExecuteResult>;
    async fn put(&self, action_digest: &Digest, result: ExecuteResult);
}

/// The completed-operations archive (a delegate-CAS map bound to
/// `OperationName -> Operation`): operations move here once terminal and
/// are dropped from the in-flight map.
#[async_trait]
pub trait CompletedOperations: Send + Sync {
    async fn archive(&self, operation: Operation);
    async fn get(&self, name: &OperationName) -> Option<Operation>;
}
