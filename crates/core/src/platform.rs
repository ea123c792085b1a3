// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `Platform`: a multiset of `(name, value)` properties, and the
//! satisfaction rule between a worker's offered platform and a command's
//! required one.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A multiset of `(name, value)` properties. Duplicates are allowed on
/// input; only the per-key set of values matters for satisfaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Platform {
    properties: Vec<(String, String)>,
}

impl Platform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            properties: pairs.into_iter().collect(),
        }
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.push((name.into(), value.into()));
        self
    }

    pub fn properties(&self) -> &[(String, String)] {
        &self.properties
    }

    /// Indexes this platform's properties by name into a set-valued map,
    /// as required by the satisfaction rule (duplicates collapse).
    fn index(&self) -> BTreeMap<&str, BTreeSet<&str>> {
        let mut idx: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
        for (n, v) in &self.properties {
            idx.entry(n.as_str()).or_default().insert(v.as_str());
        }
        idx
    }

    /// Returns true iff every `(name, value)` pair in `required` is present
    /// in `self`'s offered set. Byte-exact string comparison; a command
    /// with no requirements is satisfied by any offer.
    pub fn satisfies(&self, required: &Platform) -> bool {
        if required.properties.is_empty() {
            return true;
        }
        let offered = self.index();
        required
            .properties
            .iter()
            .all(|(n, v)| offered.get(n.as_str()).is_some_and(|vs| vs.contains(v.as_str())))
    }
}

#[cfg(test)]
#[path = "platform_tests.rs"]
mod tests;
