// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scheduler configuration. Loaded by the demonstration binary from
//! TOML via a raw `toml::Table` parse rather than a derived
//! `Deserialize` impl, since several fields (`Duration`, `Timeout`)
//! don't have a natural TOML shape; defaults here match reasonable
//! production values.

use remex_core::Timeout;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// One known key per [`SchedulerConfig`] field, all expressed in seconds
/// where the field is a duration. Used both to parse and to reject
/// unrecognised keys as a precondition failure.
const KNOWN_KEYS: &[&str] = &[
    "maximum_action_timeout_secs",
    "default_action_timeout_secs",
    "operation_poll_timeout_secs",
    "operation_completed_delay_secs",
    "list_operations_default_page_size",
    "list_operations_max_page_size",
    "tree_default_page_size",
    "tree_max_page_size",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config TOML: {0}")]
    Parse(String),
    #[error("unknown config key: {0}")]
    UnknownKey(String),
    #[error("config key {key} must be {expected}")]
    WrongType { key: String, expected: &'static str },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Reject actions whose timeout exceeds this.
    pub maximum_action_timeout: Timeout,
    /// Used when the action omits a timeout.
    pub default_action_timeout: Option<Timeout>,
    /// Inactivity window for the requeue (poll) watchdog.
    pub operation_poll_timeout: Duration,
    /// Grace added to the action timeout for the completion watchdog.
    pub operation_completed_delay: Duration,
    pub list_operations_default_page_size: usize,
    pub list_operations_max_page_size: usize,
    pub tree_default_page_size: usize,
    pub tree_max_page_size: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            maximum_action_timeout: Timeout::from_secs(3600),
            default_action_timeout: Some(Timeout::from_secs(600)),
            operation_poll_timeout: Duration::from_secs(10),
            operation_completed_delay: Duration::from_secs(10),
            list_operations_default_page_size: 100,
            list_operations_max_page_size: 1000,
            tree_default_page_size: 100,
            tree_max_page_size: 1000,
        }
    }
}

impl SchedulerConfig {
    /// Resolves the effective action timeout for the completion watchdog
    /// deadline: the action's own timeout if set, else the configured
    /// default, else `None` (no completion watchdog).
    pub fn resolve_action_timeout(&self, action_timeout: Option<Timeout>) -> Option<Duration> {
        action_timeout
            .or(self.default_action_timeout)
            .map(Duration::from)
    }

    pub fn completion_watchdog_interval(&self, action_timeout: Option<Timeout>) -> Option<Duration> {
        self.resolve_action_timeout(action_timeout)
            .map(|d| d + self.operation_completed_delay)
    }

    /// Parses a `SchedulerConfig` out of TOML text, merging over
    /// [`SchedulerConfig::default`]. Unknown keys are rejected as a
    /// precondition failure rather than silently ignored.
    pub fn load_from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let table: toml::Table = content.parse().map_err(|e| ConfigError::Parse(e.to_string()))?;
        for key in table.keys() {
            if !KNOWN_KEYS.contains(&key.as_str()) {
                return Err(ConfigError::UnknownKey(key.clone()));
            }
        }

        let mut config = Self::default();
        if let Some(secs) = read_u64(&table, "maximum_action_timeout_secs")? {
            config.maximum_action_timeout = Timeout::from_secs(secs);
        }
        if let Some(secs) = read_u64(&table, "default_action_timeout_secs")? {
            config.default_action_timeout = Some(Timeout::from_secs(secs));
        }
        if let Some(secs) = read_u64(&table, "operation_poll_timeout_secs")? {
            config.operation_poll_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = read_u64(&table, "operation_completed_delay_secs")? {
            config.operation_completed_delay = Duration::from_secs(secs);
        }
        if let Some(n) = read_u64(&table, "list_operations_default_page_size")? {
            config.list_operations_default_page_size = n as usize;
        }
        if let Some(n) = read_u64(&table, "list_operations_max_page_size")? {
            config.list_operations_max_page_size = n as usize;
        }
        if let Some(n) = read_u64(&table, "tree_default_page_size")? {
            config.tree_default_page_size = n as usize;
        }
        if let Some(n) = read_u64(&table, "tree_max_page_size")? {
            config.tree_max_page_size = n as usize;
        }
        Ok(config)
    }
}

fn read_u64(table: &toml::Table, key: &str) -> Result<Option<u64>, ConfigError> {
    match table.get(key) {
        None => Ok(None),
        Some(value) => value
            .as_integer()
            .map(|n| n as u64)
            .ok_or_else(|| ConfigError::WrongType {
                key: key.to_string(),
                expected: "a non-negative integer",
            })
            .map(Some),
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
