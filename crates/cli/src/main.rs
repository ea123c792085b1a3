// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! remex - a demonstration driver for the remote-execution scheduler
//! core. Wires `remex-engine`'s `Scheduler` to the in-process
//! `remex-adapters` bindings and runs a simulated client/worker
//! exchange end to end within a single process.
//!
//! There is no gRPC server here, and the scheduler keeps no state
//! across runs — this binary exists to exercise the full
//! `submit -> match -> poll -> complete` cycle in one shot, not to act
//! as a long-lived service.

mod demo;

use anyhow::{Context, Result};
use clap::Parser;
use remex_engine::SchedulerConfig;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "remex", version, about = "Remote execution scheduler demo driver")]
struct Cli {
    /// Number of actions to submit.
    #[arg(long, default_value_t = 3)]
    actions: usize,

    /// Number of simulated workers offering the `os=linux` platform.
    #[arg(long, default_value_t = 2)]
    workers: usize,

    /// Worker poll interval, in milliseconds.
    #[arg(long, default_value_t = 200)]
    poll_interval_ms: u64,

    /// Path to a TOML file overriding the scheduler's default config
    /// (see `SchedulerConfig::load_from_toml_str` for the accepted keys).
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Loads the effective `SchedulerConfig`: defaults, or a TOML file's
/// overrides if `config_path` is given. Split out from `main` so it's
/// unit-testable without a running tokio runtime.
fn load_scheduler_config(config_path: Option<&Path>) -> Result<SchedulerConfig> {
    match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("reading config file {}", path.display()))?;
            SchedulerConfig::load_from_toml_str(&content)
                .with_context(|| format!("parsing config file {}", path.display()))
        }
        None => Ok(SchedulerConfig::default()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let scheduler_config = load_scheduler_config(cli.config.as_deref())?;

    demo::run(demo::DemoConfig {
        actions: cli.actions,
        workers: cli.workers,
        poll_interval: std::time::Duration::from_millis(cli.poll_interval_ms),
        scheduler_config,
    })
    .await
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
