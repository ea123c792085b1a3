// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Component I: a "delegate-CAS map" — a `K -> V` map whose values live
//! as JSON blobs in a [`Cas`], with a small in-process index from `K` to
//! the blob's digest. Two concrete uses sit on top of this one
//! mechanism: the completed-operations archive ([`crate::completed_store`])
//! and the delegate-backed action cache ([`crate::action_cache`]).

use parking_lot::RwLock;
use remex_engine::Cas;
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use std::hash::Hash;
use std::marker::PhantomData;
use std::sync::Arc;

pub struct DelegateCasMap<K, V> {
    cas: Arc<dyn Cas>,
    index: RwLock<HashMap<K, remex_core::Digest>>,
    _value: PhantomData<fn() -> V>,
}

impl<K, V> DelegateCasMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Serialize + DeserializeOwned,
{
    pub fn new(cas: Arc<dyn Cas>) -> Self {
        Self {
            cas,
            index: RwLock::new(HashMap::new()),
            _value: PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.index.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.read().is_empty()
    }

    #[allow(clippy::expect_used)]
    pub async fn put(&self, key: K, value: &V) {
        let bytes = serde_json::to_vec(value).expect("value has no fallible Serialize impl");
        let digest = self.cas.put(bytes).await;
        self.index.write().insert(key, digest);
    }

    pub async fn get(&self, key: &K) -> Option<V> {
        let digest = self.index.read().get(key).cloned()?;
        let bytes = self.cas.get(&digest).await?;
        serde_json::from_slice(&bytes).ok()
    }
}

#[cfg(test)]
#[path = "delegate_map_tests.rs"]
mod tests;
