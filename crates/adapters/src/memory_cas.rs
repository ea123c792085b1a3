// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! An in-process, in-memory CAS binding. Stands in for the real
//! content-addressable blob store the core treats as an external
//! collaborator; useful for the demonstration CLI and for tests that
//! don't need a real gRPC CAS.

use async_trait::async_trait;
use parking_lot::RwLock;
use remex_core::Digest;
use remex_engine::Cas;
use std::collections::HashMap;

#[derive(Default)]
pub struct InMemoryCas {
    blobs: RwLock<HashMap<Digest, Vec<u8>>>,
}

impl InMemoryCas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.blobs.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.read().is_empty()
    }
}

#[async_trait]
impl Cas for InMemoryCas {
    async fn put(&self, bytes: Vec<u8>) -> Digest {
        let digest = Digest::of_bytes(&bytes);
        self.blobs.write().insert(digest.clone(), bytes);
        digest
    }

    async fn get(&self, digest: &Digest) -> Option<Vec<u8>> {
        self.blobs.read().get(digest).cloned()
    }
}

#[cfg(test)]
#[path = "memory_cas_tests.rs"]
mod tests;
