// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The in-process binding of [`ActionCache`]: `actionDigest -> ExecuteResult`
//! over the same delegate-CAS map mechanism as the completed-operations
//! archive. A remote, gRPC-backed action cache is the production binding
//! for this trait but its wire protocol isn't implemented here; only
//! the in-process binding is.

use crate::delegate_map::DelegateCasMap;
use async_trait::async_trait;
use remex_core::{Digest, ExecuteResult};
use remex_engine::{ActionCache, Cas};
use std::sync::Arc;

pub struct DelegateActionCache {
    inner: DelegateCasMap<Digest, ExecuteResult>,
}

impl DelegateActionCache {
    pub fn new(cas: Arc<dyn Cas>) -> Self {
        Self {
            inner: DelegateCasMap::new(cas),
        }
    }
}

#[async_trait]
impl ActionCache for DelegateActionCache {
    async fn get(&self, action_digest: &Digest) -> Option<ExecuteResult> {
        self.inner.get(action_digest).await
    }

    async fn put(&self, action_digest: &Digest, result: ExecuteResult) {
        self.inner.put(action_digest.clone(), &result).await;
    }
}

#[cfg(test)]
#[path = "action_cache_tests.rs"]
mod tests;
