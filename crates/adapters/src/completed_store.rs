// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A [`CompletedOperations`] archive built on the delegate-CAS map:
//! once an operation leaves the in-flight map its terminal record is
//! stored here, keyed by `OperationName`.

use crate::delegate_map::DelegateCasMap;
use async_trait::async_trait;
use remex_core::{Operation, OperationName};
use remex_engine::{Cas, CompletedOperations};
use std::sync::Arc;

pub struct DelegateCompletedOperations {
    inner: DelegateCasMap<OperationName, Operation>,
}

impl DelegateCompletedOperations {
    pub fn new(cas: Arc<dyn Cas>) -> Self {
        Self {
            inner: DelegateCasMap::new(cas),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[async_trait]
impl CompletedOperations for DelegateCompletedOperations {
    async fn archive(&self, operation: Operation) {
        let name = operation.name.clone();
        self.inner.put(name, &operation).await;
    }

    async fn get(&self, name: &OperationName) -> Option<Operation> {
        self.inner.get(name).await
    }
}

#[cfg(test)]
#[path = "completed_store_tests.rs"]
mod tests;
